pub mod file;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::{Parser, Subcommand};

pub const DEFAULT_DATA_PATH: &str = "./data";

#[derive(Debug, Clone, Parser)]
#[command(name = "enroll-session")]
#[command(about = "Session enrollment, group randomization and countdown pacing")]
pub struct CliConfig {
    /// Directory holding the persisted enrollment data
    #[arg(long)]
    pub data_path: Option<String>,

    /// Endpoint for out-of-band ledger submissions
    #[arg(long)]
    pub ledger_endpoint: Option<String>,

    /// TOML settings file supplying defaults for the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Record a new enrollment
    Enroll {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        age: i64,
        #[arg(long)]
        gender: String,
        /// Filename reference for an attached document (bytes are not stored)
        #[arg(long)]
        attachment: Option<String>,
    },
    /// Print the full roster in insertion order
    List,
    /// Randomize the roster into two groups
    Randomize,
    /// Remove all enrollment data
    Clear,
    /// Run a countdown and wait for it to complete
    Timer { minutes: u64, seconds: u64 },
}

impl CliConfig {
    /// Fills flags that were not given on the command line from the optional
    /// settings file.
    pub fn apply_settings(&mut self) -> Result<()> {
        let Some(path) = self.config.as_deref() else {
            return Ok(());
        };

        let settings = file::Settings::load(path)?;
        if self.data_path.is_none() {
            self.data_path = settings.data_path;
        }
        if self.ledger_endpoint.is_none() {
            self.ledger_endpoint = settings.ledger_endpoint;
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn data_path(&self) -> &str {
        self.data_path.as_deref().unwrap_or(DEFAULT_DATA_PATH)
    }

    fn ledger_endpoint(&self) -> Option<&str> {
        self.ledger_endpoint.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_path", self.data_path())?;
        if let Some(endpoint) = self.ledger_endpoint() {
            validate_url("ledger_endpoint", endpoint)?;
        }
        Ok(())
    }
}
