use std::fs;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::word::{DEFAULT_WORDS, WordSelector};

// CLI argument structure
#[derive(Parser, Debug)]
#[command(name = "secret-word-api")]
#[command(about = "Time-bucketed secret word service with per-client rate limiting")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080, env = "PORT")]
    pub port: u16,

    // Word rotation window in seconds
    #[arg(long, default_value_t = 180)]
    pub window_secs: u64,

    // Minimum seconds between requests from one client
    #[arg(long, default_value_t = 2)]
    pub min_interval: u64,

    // Rate limit entries older than this are swept
    #[arg(long, default_value_t = 3600)]
    pub max_age: u64,

    // Seconds between background sweeps
    #[arg(long, default_value_t = 3600)]
    pub sweep_interval: u64,

    // Custom word pool, one word per line (built-in pool if omitted)
    #[arg(long)]
    pub words_file: Option<PathBuf>,
}

// Anything wrong here is fatal: the service must not start
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("word pool is empty")]
    EmptyWordPool,

    #[error("--{name} must be positive")]
    NonPositive { name: &'static str },

    #[error("failed to read words file {path}: {source}")]
    WordsFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

// Validated configuration, built once at startup
pub struct Config {
    pub port: u16,
    pub min_interval: u64,
    pub max_age: u64,
    pub sweep_interval: u64,
    pub selector: WordSelector,
}

impl Args {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        for (name, value) in [
            ("min-interval", self.min_interval),
            ("max-age", self.max_age),
            ("sweep-interval", self.sweep_interval),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { name });
            }
        }

        let words = match &self.words_file {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|source| {
                    ConfigError::WordsFile {
                        path: path.clone(),
                        source,
                    }
                })?;
                parse_words(&contents)
            }
            None => DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        };

        // selector validates the pool and the window itself
        let selector = WordSelector::new(words, self.window_secs)?;

        Ok(Config {
            port: self.port,
            min_interval: self.min_interval,
            max_age: self.max_age,
            sweep_interval: self.sweep_interval,
            selector,
        })
    }
}

// One word per line; blanks and # comments skipped
fn parse_words(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            port: 8080,
            window_secs: 180,
            min_interval: 2,
            max_age: 3600,
            sweep_interval: 3600,
            words_file: None,
        }
    }

    #[test]
    fn defaults_validate() {
        let config = args().into_config().unwrap();
        assert_eq!(config.selector.pool_size(), 75);
        assert_eq!(config.min_interval, 2);
    }

    #[test]
    fn zero_min_interval_is_rejected() {
        let config = Args {
            min_interval: 0,
            ..args()
        }
        .into_config();
        assert!(matches!(config, Err(ConfigError::NonPositive { name: "min-interval" })));
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = Args {
            window_secs: 0,
            ..args()
        }
        .into_config();
        assert!(matches!(config, Err(ConfigError::NonPositive { .. })));
    }

    #[test]
    fn missing_words_file_is_rejected() {
        let config = Args {
            words_file: Some(PathBuf::from("/nonexistent/words.txt")),
            ..args()
        }
        .into_config();
        assert!(matches!(config, Err(ConfigError::WordsFile { .. })));
    }

    #[test]
    fn parse_words_skips_blanks_and_comments() {
        let words = parse_words("alpha\n\n# comment\n  beta  \ngamma\n");
        assert_eq!(words, vec!["alpha", "beta", "gamma"]);
    }
}
