use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::TallyConfig;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub words: Option<WordsConfig>,
    pub inputs: Option<InputsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordsConfig {
    pub list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputsConfig {
    pub paths: Option<Vec<String>>,
    pub directory: Option<String>,
}

impl ConfigFile {
    /// Fill unset fields from [`TallyConfig::default`].
    pub fn resolve(&self) -> TallyConfig {
        let defaults = TallyConfig::default();
        TallyConfig {
            word_list: self
                .words
                .as_ref()
                .and_then(|w| w.list.clone())
                .unwrap_or(defaults.word_list),
            input_paths: self
                .inputs
                .as_ref()
                .and_then(|i| i.paths.as_ref())
                .map(|paths| paths.iter().map(PathBuf::from).collect())
                .unwrap_or(defaults.input_paths),
            corpus_dir: self
                .inputs
                .as_ref()
                .and_then(|i| i.directory.as_ref())
                .map(PathBuf::from)
                .or(defaults.corpus_dir),
        }
    }
}

/// Platform config directory path: `<config_dir>/wordtally/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wordtally").join("config.toml"))
}

/// Load config by cascading CWD `.wordtally.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".wordtally.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        words: Some(WordsConfig {
            list: overlay
                .words
                .as_ref()
                .and_then(|w| w.list.clone())
                .or_else(|| base.words.as_ref().and_then(|w| w.list.clone())),
        }),
        inputs: Some(InputsConfig {
            paths: overlay
                .inputs
                .as_ref()
                .and_then(|i| i.paths.clone())
                .or_else(|| base.inputs.as_ref().and_then(|i| i.paths.clone())),
            directory: overlay
                .inputs
                .as_ref()
                .and_then(|i| i.directory.clone())
                .or_else(|| base.inputs.as_ref().and_then(|i| i.directory.clone())),
        }),
    }
}
