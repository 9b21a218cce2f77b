#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    ConfigFile,
    Difficulty,
    RequestTimeout,
    ResetQuizOnDifficultyChange,
    SessionCookie,
}

pub struct Config {}

fn config_dir() -> path::PathBuf {
    #[cfg(not(target_os = "macos"))]
    let dir = dirs::config_dir().unwrap_or_else(|| return env::temp_dir());
    #[cfg(target_os = "macos")]
    let dir = env::var("HOME")
        .map(|home| return path::PathBuf::from(home).join(".config"))
        .unwrap_or_else(|_| return env::temp_dir());

    return dir.join("docvault");
}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = config_dir().join("config.toml");

        let res = match key {
            ConfigKey::ApiURL => "http://127.0.0.1:5000/api".to_string(),
            ConfigKey::Difficulty => "Medium".to_string(),
            ConfigKey::RequestTimeout => "120000".to_string(),
            ConfigKey::ResetQuizOnDifficultyChange => "true".to_string(),
            ConfigKey::SessionCookie => "".to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
        };

        return res;
    }

    /// Reads every known key out of a TOML document, validating values
    /// against the possible values of the matching CLI flag.
    pub fn from_toml(cmd: &Command, toml_str: &str) -> Result<Vec<(ConfigKey, String)>> {
        let doc = toml_str.parse::<toml_edit::Document>()?;
        let mut res = vec![];

        for key in ConfigKey::iter() {
            let val = match doc.get(&key.to_string()) {
                Some(val) => val,
                None => continue,
            };

            let mut possible_values = vec![];
            if let Some(arg) = cmd
                .get_arguments()
                .find(|e| return e.get_long() == Some(key.to_string().as_str()))
            {
                possible_values = arg
                    .get_possible_values()
                    .iter()
                    .map(|e| return e.get_name().to_string())
                    .collect::<Vec<String>>();
            }

            let val_str = if let Some(val_int) = val.as_integer() {
                val_int.to_string()
            } else if let Some(val_bool) = val.as_bool() {
                val_bool.to_string()
            } else if let Some(val_str) = val.as_str() {
                val_str.to_string()
            } else {
                bail!(format!(
                    "config.toml has an unsupported value type for key '{key}'"
                ));
            };

            if val_str.is_empty() {
                continue;
            }
            if !possible_values.is_empty() && !possible_values.contains(&val_str) {
                bail!(format!(
                    "config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}",
                    possible_values.join(", ")
                ));
            }

            res.push((key, val_str));
        }

        return Ok(res);
    }

    /// Value given for a key on the command line or through its env var.
    /// Numeric flags are parsed by clap, so they are read back as `u64`.
    pub fn arg_value(matches: &ArgMatches, key: ConfigKey) -> Option<String> {
        if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
            if val.is_empty() {
                return None;
            }
            return Some(val.to_string());
        }
        if let Ok(Some(val)) = matches.try_get_one::<u64>(&key.to_string()) {
            return Some(val.to_string());
        }

        return None;
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            for (key, val) in Config::from_toml(&cmd, &toml_str)? {
                Config::set(key, &val);
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Some(val) = Config::arg_value(matches, key) {
                    Config::set(key, &val)
                }
            }
        }

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            difficulty = Config::get(ConfigKey::Difficulty),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            reset_quiz_on_difficulty_change = Config::get(ConfigKey::ResetQuizOnDifficultyChange),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() || val.parse::<bool>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
