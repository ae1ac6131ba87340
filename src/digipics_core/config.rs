use crate::digipics_core::cli::Cli;
use crate::digipics_core::error::{DigipicsError, Result};
use crate::digipics_core::import::ImportOptions;
use directories::BaseDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".digipics.cfg";

/// Values that may be preset in the config file. Flags given on the command
/// line take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub collection: Option<PathBuf>,
    pub nothing: bool,
    pub keep: bool,
    pub subdir: Option<String>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub import: ImportOptions,
    pub use_exif: bool,
}

pub fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
}

/// Load a config file. A missing file yields defaults unless `required`.
///
/// The file is read as TOML. Files written for the earlier Python tool use
/// bare `key = value` lines (`collection = /srv/pictures`); those are
/// accepted as well.
pub fn load_file_config(path: &Path, required: bool) -> Result<FileConfig> {
    if !path.exists() && !required {
        log::debug!("No config file at {}", path.display());
        return Ok(FileConfig::default());
    }

    let raw = fs::read_to_string(path).map_err(|source| DigipicsError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw).map_err(|source| DigipicsError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_config(raw: &str) -> std::result::Result<FileConfig, toml::de::Error> {
    match toml::from_str(raw) {
        Ok(config) => Ok(config),
        Err(e) => parse_plain_config(raw).ok_or(e),
    }
}

/// `key = value` (or `key: value`) lines, `#`/`;` comments, values unquoted.
fn parse_plain_config(raw: &str) -> Option<FileConfig> {
    let mut config = FileConfig::default();
    for line in raw.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(['#', ';', '[']) {
            continue;
        }
        let split = line.find(['=', ':'])?;
        let key = line[..split].trim();
        let value = unquote(line[split + 1..].trim());
        match key {
            "collection" => config.collection = Some(PathBuf::from(value)),
            "subdir" => config.subdir = Some(value.to_string()),
            "nothing" => config.nothing = parse_flag(value)?,
            "keep" => config.keep = parse_flag(value)?,
            other => log::debug!("Ignoring unknown config key '{}'", other),
        }
    }
    Some(config)
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q)?.strip_suffix(*q))
        .unwrap_or(value)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Read the config file named by `--config` (or the default one) and
    /// merge the command line over it.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (path, required) = match &cli.config {
            Some(path) => (Some(path.clone()), true),
            None => (default_config_path(), false),
        };
        let file = match &path {
            Some(path) => match load_file_config(path, required) {
                Ok(file) => file,
                Err(e) if !required => {
                    log::warn!("Ignoring config file: {}", e);
                    FileConfig::default()
                }
                Err(e) => return Err(e),
            },
            None => FileConfig::default(),
        };
        let shown = path.unwrap_or_else(|| PathBuf::from("~").join(CONFIG_FILE_NAME));
        Self::merge(cli, file, &shown)
    }

    pub fn merge(cli: &Cli, file: FileConfig, config_path: &Path) -> Result<Self> {
        let collection = cli
            .collection
            .clone()
            .or(file.collection)
            .ok_or_else(|| DigipicsError::MissingCollection(config_path.to_path_buf()))?;
        let collection = std::path::absolute(expand_home(&collection))?;

        let subdir = cli
            .subdir
            .clone()
            .or(file.subdir)
            .filter(|s| !s.is_empty());

        Ok(Settings {
            import: ImportOptions {
                collection,
                subdir,
                dry_run: cli.nothing || file.nothing,
                keep: cli.keep || file.keep,
            },
            use_exif: !cli.no_exif,
        })
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match BaseDirs::new() {
            Some(dirs) => dirs.home_dir().join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
