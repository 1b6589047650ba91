//! Error taxonomy and how each class is reported.

use mazda_sdk::ClientError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("email and password are required (config file, --email/--password, or mazda_api_email/mazda_api_password)")]
    MissingCredentials,

    #[error("no vehicle selected: pass --car_id, --name or --vin, set mazda_api_car_id, or use --list")]
    MissingVehicleId,

    #[error("--poi_name needs both --poi_lat and --poi_long")]
    IncompletePoi,

    #[error("invalid region in mazda_api_region: {0}")]
    InvalidRegion(String),

    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file {path} must contain a JSON object")]
    ConfigShape { path: PathBuf },

    #[error("no vehicle matches '{query}'")]
    NoMatch { query: String },

    #[error("'{query}' matches {count} vehicles, be more specific")]
    Ambiguous { query: String, count: usize },

    #[error(transparent)]
    Remote(#[from] ClientError),

    #[error("failed to format output")]
    Output(#[from] serde_json::Error),

    #[error("failed to write output")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ToolError::MissingCredentials
                | ToolError::MissingVehicleId
                | ToolError::IncompletePoi
                | ToolError::InvalidRegion(_)
                | ToolError::ConfigRead { .. }
                | ToolError::ConfigParse { .. }
                | ToolError::ConfigShape { .. }
        )
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::NoMatch { .. } | ToolError::Ambiguous { .. } => 3,
            ToolError::Remote(_) | ToolError::Output(_) | ToolError::Io(_) => 4,
            _ => 2,
        }
    }
}

/// Lines describing an error: the message, each cause in the chain, and a
/// usage hint for configuration problems.
pub fn error_lines(err: &ToolError) -> Vec<String> {
    let mut lines = vec![format!("Error: {err}")];
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        lines.push(format!("  caused by: {cause}"));
        source = std::error::Error::source(cause);
    }
    if err.is_config_error() {
        lines.push("Run with --help for usage.".to_string());
    }
    lines
}

/// Print an error to stderr.
pub fn display_error(err: &ToolError) {
    for line in error_lines(err) {
        eprintln!("{line}");
    }
}
