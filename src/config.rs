use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Model used for usage records that don't name one
    #[serde(default)]
    pub(crate) model: Option<String>,
    #[serde(default)]
    pub(crate) json: bool,
    #[serde(default)]
    pub(crate) strict: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
}

impl Config {
    /// Load from `explicit` if given, otherwise from the first default location that parses.
    ///
    /// Read and parse failures are always reported; `verbose` adds a note
    /// naming the file that was used.
    pub(crate) fn load(explicit: Option<&Path>, verbose: bool) -> Self {
        match explicit {
            Some(path) => Self::load_from(path, verbose).unwrap_or_default(),
            None => Self::get_config_paths()
                .iter()
                .filter(|path| path.exists())
                .find_map(|path| Self::load_from(path, verbose))
                .unwrap_or_default(),
        }
    }

    fn load_from(path: &Path, verbose: bool) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Warning: Failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        match Self::parse(&content) {
            Ok(config) => {
                if verbose {
                    eprintln!("[DEBUG] Loaded config from {}", path.display());
                }
                Some(config)
            }
            Err(e) => {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/ccprice/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("ccprice").join("config.toml"));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support/ccprice/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("ccprice").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.ccprice.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".ccprice.toml"));
        }

        paths
    }
}
