use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "CONCEPT_SCRAPER";
const DEFAULT_CONFIG_FILE: &str = "concept_scraper";

const DEFAULT_INPUT: &str = "export";
const DEFAULT_OUTPUT: &str = "scraped-finalized-definitions.csv";
const DEFAULT_INVALID: &str = "invalid-links.csv";

/// Paths for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub invalid_path: PathBuf,
}

/// Values given on the command line; they win over every other source.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub input_dir: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub invalid_path: Option<PathBuf>,
}

impl Settings {
    /// Layering: defaults → config file → `CONCEPT_SCRAPER_*` env → overrides.
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = match &overrides.config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .set_default("input_dir", DEFAULT_INPUT)?
            .set_default("output_path", DEFAULT_OUTPUT)?
            .set_default("invalid_path", DEFAULT_INVALID)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("input_dir", path_value(&overrides.input_dir))?
            .set_override_option("output_path", path_value(&overrides.output_path))?
            .set_override_option("invalid_path", path_value(&overrides.invalid_path))?
            .build()?
            .try_deserialize()
    }
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
    path.as_deref()
        .map(Path::to_string_lossy)
        .map(|p| p.into_owned())
}
