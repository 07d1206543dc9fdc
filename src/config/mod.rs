pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "course-registry")]
#[command(about = "Department and course registry served over HTTP")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Registry data file (overrides storage.path)
    #[arg(long)]
    pub data_file: Option<String>,

    /// Start mode: fresh or restore (overrides storage.mode)
    #[arg(long)]
    pub mode: Option<String>,

    /// Replace the registry with the built-in seed data and save it
    #[arg(long)]
    pub setup: bool,

    /// Do not save the registry on shutdown
    #[arg(long)]
    pub no_save: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file (or the defaults when none is given) and applies
    /// the command line overrides on top.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data_file) = &self.data_file {
            config.storage.path = data_file.clone();
        }
        if let Some(mode) = &self.mode {
            config.storage.mode = mode.clone();
        }
        if self.no_save {
            config.storage.save_on_exit = Some(false);
        }
        if self.json_logs {
            let logging = config.logging.get_or_insert(toml_config::LoggingConfig {
                level: None,
                json: None,
            });
            logging.json = Some(true);
        }

        Ok(config)
    }
}
