use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::csv_reader::DEFAULT_ADDRESS_COLUMN;
use crate::dispatcher::{DEFAULT_CLI_BINARY, DEFAULT_FUNCTION_NAME, DEFAULT_MODULE_NAME};
use crate::error::{MinterError, MinterResult};
use crate::name_client::DEFAULT_NAME_SERVICE_URL;

/// Where `aptos init` writes its profiles, relative to the Move package
pub const DEFAULT_APTOS_CONFIG_PATH: &str = ".aptos/config.yaml";

/// Tool settings
#[derive(Debug, Clone, Deserialize)]
pub struct MinterConfig {
    pub aptos_config_path: PathBuf,
    pub cli_binary: String,
    pub name_service_url: String,
    pub address_column: usize,
    pub module_name: String,
    pub function_name: String,
}

impl MinterConfig {
    /// Defaults, then `minter.toml` (or the given file), then `MINTER_*` environment variables
    pub fn load(path: Option<&Path>) -> MinterResult<Self> {
        let mut builder = config::Config::builder()
            .set_default("aptos_config_path", DEFAULT_APTOS_CONFIG_PATH)?
            .set_default("cli_binary", DEFAULT_CLI_BINARY)?
            .set_default("name_service_url", DEFAULT_NAME_SERVICE_URL)?
            .set_default("address_column", DEFAULT_ADDRESS_COLUMN as u64)?
            .set_default("module_name", DEFAULT_MODULE_NAME)?
            .set_default("function_name", DEFAULT_FUNCTION_NAME)?;

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name("minter").required(false)),
        };

        let settings = builder
            .add_source(
                config::Environment::with_prefix("MINTER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for MinterConfig {
    fn default() -> Self {
        Self {
            aptos_config_path: PathBuf::from(DEFAULT_APTOS_CONFIG_PATH),
            cli_binary: DEFAULT_CLI_BINARY.to_string(),
            name_service_url: DEFAULT_NAME_SERVICE_URL.to_string(),
            address_column: DEFAULT_ADDRESS_COLUMN,
            module_name: DEFAULT_MODULE_NAME.to_string(),
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AptosProfile {
    pub account: String,
}

/// The profile store written by the Aptos CLI
#[derive(Debug, Clone, Deserialize)]
pub struct AptosCliConfig {
    #[serde(default)]
    pub profiles: HashMap<String, AptosProfile>,
}

impl AptosCliConfig {
    pub fn load(path: &Path) -> MinterResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Yaml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn profile(&self, name: &str) -> MinterResult<&AptosProfile> {
        self.profiles
            .get(name)
            .or_else(|| self.profiles.get(&name.to_lowercase()))
            .ok_or_else(|| MinterError::MissingProfile(name.to_string()))
    }

    pub fn account(&self, name: &str) -> MinterResult<&str> {
        Ok(self.profile(name)?.account.as_str())
    }
}
