//! Settings infrastructure for tagsync.
//!
//! This module provides support for loading and parsing settings.toml files
//! to choose which documents get a tag sync session.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tower_lsp::lsp_types::Url;
use tracing::{debug, info, warn};

const SETTINGS_FILE: &str = "settings.toml";

/// Root settings structure loaded from settings.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Tag sync configuration.
    pub tag_sync: Option<TagSyncSettings>,
}

/// Settings for the tag sync engine.
#[derive(Debug, Default, Deserialize)]
pub struct TagSyncSettings {
    /// Whether tag sync runs at all (default: true).
    pub enabled: Option<bool>,

    /// File extensions to track, without the dot: ["html", "xml", "vue"].
    /// When absent every opened document is tracked.
    pub extensions: Option<Vec<String>>,
}

impl Settings {
    pub fn enabled(&self) -> bool {
        self.tag_sync
            .as_ref()
            .and_then(|s| s.enabled)
            .unwrap_or(true)
    }

    /// Whether a document opened at `uri` should get a tag sync session.
    pub fn tracks(&self, uri: &Url) -> bool {
        if !self.enabled() {
            return false;
        }

        let Some(extensions) = self.tag_sync.as_ref().and_then(|s| s.extensions.as_ref()) else {
            return true;
        };

        let path = uri.path();
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

/// Load settings from a settings.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("failed to parse {}: {}", path.display(), e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Find the settings.toml that applies to `start_dir`.
///
/// The nearest one at or above `start_dir` wins. Failing that, a settings.toml
/// in a direct child directory is used, so a workspace can keep its
/// configuration in e.g. `config/`.
pub fn find_settings_file(start_dir: &Path) -> Option<PathBuf> {
    let above = start_dir
        .ancestors()
        .map(|dir| dir.join(SETTINGS_FILE))
        .find(|candidate| candidate.is_file());
    if above.is_some() {
        return above;
    }

    let mut children: Vec<PathBuf> = std::fs::read_dir(start_dir)
        .ok()?
        .flatten()
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_dir()))
        .map(|entry| entry.path().join(SETTINGS_FILE))
        .filter(|candidate| candidate.is_file())
        .collect();
    // read_dir order is platform dependent
    children.sort();
    children.into_iter().next()
}

/// Load the settings that apply to a workspace rooted at `start_dir`.
pub fn discover_settings(start_dir: &Path) -> Settings {
    match find_settings_file(start_dir) {
        Some(path) => {
            info!(path = %path.display(), "loading settings");
            load_settings(&path)
        }
        None => {
            debug!(root = %start_dir.display(), "no settings.toml found, using defaults");
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn parse(content: &str) -> Settings {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn defaults_track_everything() {
        let settings = Settings::default();
        assert!(settings.enabled());
        assert!(settings.tracks(&url("file:///site/index.html")));
        assert!(settings.tracks(&url("file:///notes/README")));
    }

    #[test]
    fn disabled_tracks_nothing() {
        let settings = parse("[tag_sync]\nenabled = false\n");
        assert!(!settings.enabled());
        assert!(!settings.tracks(&url("file:///site/index.html")));
    }

    #[test]
    fn extensions_filter_documents() {
        let settings = parse("[tag_sync]\nextensions = [\"html\", \".XML\"]\n");
        assert!(settings.tracks(&url("file:///site/index.HTML")));
        assert!(settings.tracks(&url("file:///data/feed.xml")));
        assert!(!settings.tracks(&url("file:///src/main.rs")));
        assert!(!settings.tracks(&url("file:///site/Makefile")));
        assert!(!settings.tracks(&url("file:///site.d/Makefile")));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let settings = parse("[tag_sync]\nenabled = true\n\n[other]\nx = 1\n");
        assert!(settings.enabled());
    }

    /// A scratch directory under the system temp dir, removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(label: &str) -> Self {
            static NEXT: AtomicUsize = AtomicUsize::new(0);
            let n = NEXT.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!(
                "tagsync-{label}-{}-{n}",
                std::process::id()
            ));
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        /// Create `relative` (and its parents) and write `content` to it.
        fn write(&self, relative: &str, content: &str) -> PathBuf {
            let path = self.0.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
            path
        }

        fn dir(&self, relative: &str) -> PathBuf {
            let path = self.0.join(relative);
            fs::create_dir_all(&path).unwrap();
            path
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn load_settings_falls_back_on_parse_error() {
        let scratch = ScratchDir::new("invalid");
        let path = scratch.write("settings.toml", "[tag_sync\nenabled = ");
        assert!(load_settings(&path).tag_sync.is_none());
    }

    #[test]
    fn load_settings_missing_file_is_default() {
        let scratch = ScratchDir::new("missing");
        let settings = load_settings(&scratch.0.join("settings.toml"));
        assert!(settings.enabled());
    }

    #[test]
    fn settings_in_start_dir() {
        let scratch = ScratchDir::new("current");
        let path = scratch.write("settings.toml", "[tag_sync]\nenabled = false\n");

        assert_eq!(find_settings_file(&scratch.0), Some(path));
        assert!(!discover_settings(&scratch.0).enabled());
    }

    #[test]
    fn settings_above_start_dir() {
        let scratch = ScratchDir::new("above");
        let path = scratch.write("settings.toml", "[tag_sync]\nextensions = [\"svg\"]\n");
        let nested = scratch.dir("site/pages");

        assert_eq!(find_settings_file(&nested), Some(path));
        let settings = discover_settings(&nested);
        assert!(settings.tracks(&url("file:///site/logo.svg")));
        assert!(!settings.tracks(&url("file:///site/index.html")));
    }

    #[test]
    fn settings_in_child_dir() {
        let scratch = ScratchDir::new("child");
        scratch.dir("assets");
        let path = scratch.write("config/settings.toml", "[tag_sync]\nenabled = false\n");

        assert_eq!(find_settings_file(&scratch.0), Some(path));
        assert!(!discover_settings(&scratch.0).enabled());
    }

    #[test]
    fn nearest_ancestor_beats_child_dir() {
        let scratch = ScratchDir::new("priority");
        let path = scratch.write("settings.toml", "[tag_sync]\nenabled = true\n");
        scratch.write("nested/settings.toml", "[tag_sync]\nenabled = false\n");

        assert_eq!(find_settings_file(&scratch.0), Some(path));
        assert!(discover_settings(&scratch.0).enabled());
    }
}
