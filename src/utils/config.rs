//! Loading conversion options from a TOML file

use std::fs;
use std::path::Path;

use crate::core::beamer2rmd::RmdOptions;

use super::error::{CliError, CliResult};

/// Parse options from TOML text; absent keys keep their defaults
pub fn parse_options(source: &str) -> Result<RmdOptions, toml::de::Error> {
    toml::from_str(source)
}

/// Load options from a TOML file
pub fn load_options(path: &Path) -> CliResult<RmdOptions> {
    let source = fs::read_to_string(path).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_options(&source).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
