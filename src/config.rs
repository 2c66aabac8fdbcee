use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use thiserror::Error;

use crate::lexer::MAX_LINE_LENGTH;

pub const CONFIG_FILE_NAME: &str = ".simshrc";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt_format: String,
    pub show_banner: bool,
    pub log_level: String,
    pub assistant_command: Option<Vec<String>>,
    pub assistant_reply_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt_format: "%F %T ".to_string(),
            show_banner: true,
            log_level: "warn".to_string(),
            assistant_command: None,
            assistant_reply_limit: MAX_LINE_LENGTH * 2,
        }
    }

    /// The file to load: an explicit path wins, then `~/.simshrc` if present.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .filter(|path| path.is_file())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            let lineno = lineno + 1;
            let line = line.trim_start();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse {
                    line: lineno,
                    message: format!("no '=' found: {}", line),
                });
            };
            let key = key.trim();
            let invalid = |what: &str| ConfigError::Parse {
                line: lineno,
                message: format!("invalid {} for '{}': {}", what, key, value),
            };

            match key {
                // Kept untrimmed: trailing spaces in a prompt are significant.
                "prompt_format" => {
                    if StrftimeItems::new(value).any(|item| matches!(item, Item::Error)) {
                        return Err(invalid("strftime pattern"));
                    }
                    config.prompt_format = value.to_string();
                }
                "banner" => {
                    config.show_banner = match value.trim() {
                        "true" | "yes" | "on" => true,
                        "false" | "no" | "off" => false,
                        _ => return Err(invalid("boolean")),
                    };
                }
                "log_level" => config.log_level = value.trim().to_string(),
                "assistant_command" => {
                    let words: Vec<String> = value
                        .split(' ')
                        .filter(|w| !w.is_empty())
                        .map(str::to_string)
                        .collect();
                    config.assistant_command = (!words.is_empty()).then_some(words);
                }
                "assistant_reply_limit" => match value.trim().parse::<usize>() {
                    Ok(n) if n > 0 => config.assistant_reply_limit = n,
                    _ => return Err(invalid("size")),
                },
                _ => {
                    return Err(ConfigError::Parse {
                        line: lineno,
                        message: format!("unknown key: {}", key),
                    });
                }
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigLoader::load_from_str("").unwrap();
        assert_eq!(config, ConfigLoader::default_config());
        assert_eq!(config.assistant_reply_limit, 2048);
    }

    #[test]
    fn test_all_keys() {
        let src = concat!(
            "# simsh settings\n",
            "prompt_format=[%H:%M] \n",
            "banner = false\n",
            "log_level = debug\n",
            "\n",
            "assistant_command = ask-llm --short\n",
            "assistant_reply_limit = 512\n",
        );
        let config = ConfigLoader::load_from_str(src).unwrap();
        assert_eq!(config.prompt_format, "[%H:%M] ");
        assert!(!config.show_banner);
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.assistant_command,
            Some(vec!["ask-llm".to_string(), "--short".to_string()])
        );
        assert_eq!(config.assistant_reply_limit, 512);
    }

    #[test]
    fn test_unknown_key_reports_line() {
        let err = ConfigLoader::load_from_str("banner=true\ncolour=red\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_invalid_values() {
        assert!(ConfigLoader::load_from_str("banner=maybe").is_err());
        assert!(ConfigLoader::load_from_str("assistant_reply_limit=0").is_err());
        assert!(ConfigLoader::load_from_str("prompt_format=%").is_err());
        assert!(ConfigLoader::load_from_str("no equals sign").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "banner=off\n").unwrap();
        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert!(!config.show_banner);

        let missing = dir.path().join("missing");
        assert!(matches!(
            ConfigLoader::load_from_file(&missing),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let explicit = Path::new("/etc/simsh.conf");
        assert_eq!(
            ConfigLoader::locate(Some(explicit)),
            Some(PathBuf::from("/etc/simsh.conf"))
        );
    }
}
