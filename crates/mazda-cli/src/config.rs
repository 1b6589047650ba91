//! Credential and vehicle resolution.
//!
//! Every field is taken from the first source that sets it: the config
//! file, then CLI flags, then environment variables.

use mazda_core::{Action, Credentials, Region, VehicleId, VehicleRef};
use mazda_sdk::DEFAULT_BASE_URL;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::error::ToolError;

pub const CONFIG_FILE_NAME: &str = "mazda_api_tool.json";

pub const ENV_EMAIL: &str = "mazda_api_email";
pub const ENV_PASSWORD: &str = "mazda_api_password";
pub const ENV_CAR_ID: &str = "mazda_api_car_id";
pub const ENV_REGION: &str = "mazda_api_region";
pub const ENV_API_URL: &str = "mazda_api_url";

/// Values read from the optional JSON config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileConfig {
    pub email: Option<String>,
    pub password: Option<String>,
    pub car_id: Option<VehicleId>,
    pub region: Option<Region>,
    pub api_url: Option<String>,
}

impl FileConfig {
    /// `mazda_api_tool.json` in the directory holding the executable.
    pub fn default_path() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        Some(exe.parent()?.join(CONFIG_FILE_NAME))
    }

    /// Load the file at `path`. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ToolError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| ToolError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| ToolError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        if !value.is_object() {
            return Err(ToolError::ConfigShape {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Some(Self::from_json(&value)))
    }

    /// Pick fields out of a JSON object. Fields with the wrong type are
    /// treated as unset.
    pub fn from_json(value: &Value) -> Self {
        let text = |key: &str| non_empty(value.get(key).and_then(Value::as_str));
        let region = text("region").and_then(|code| match code.parse::<Region>() {
            Ok(region) => Some(region),
            Err(err) => {
                tracing::warn!(%err, "ignoring region in config file");
                None
            }
        });
        Self {
            email: text("email"),
            password: text("password"),
            car_id: value.get("car_id").and_then(VehicleId::from_json),
            region,
            api_url: text("api_url"),
        }
    }
}

/// Everything the dispatcher needs for one invocation.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub credentials: Credentials,
    pub vehicle: Option<VehicleRef>,
    pub action: Action,
    pub region: Region,
    pub api_url: String,
}

impl ToolConfig {
    /// Resolve credentials, target vehicle and action.
    ///
    /// `env` looks up an environment variable by name.
    pub fn resolve<F>(args: &Args, file: Option<&FileConfig>, env: F) -> Result<Self, ToolError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| non_empty(env(key).as_deref());
        let file = file.cloned().unwrap_or_default();

        let email = file
            .email
            .or_else(|| non_empty(args.email.as_deref()))
            .or_else(|| env(ENV_EMAIL));
        let password = file
            .password
            .or_else(|| non_empty(args.password.as_deref()))
            .or_else(|| env(ENV_PASSWORD));
        let (Some(email), Some(password)) = (email, password) else {
            return Err(ToolError::MissingCredentials);
        };

        let car_id = file
            .car_id
            .or_else(|| non_empty(args.car_id.as_deref()).map(VehicleId::new))
            .or_else(|| env(ENV_CAR_ID).map(VehicleId::new));

        let vehicle = if let Some(name) = non_empty(args.name.as_deref()) {
            Some(VehicleRef::Nickname(name))
        } else if let Some(vin) = non_empty(args.vin.as_deref()) {
            Some(VehicleRef::Vin(vin))
        } else {
            car_id.map(VehicleRef::Id)
        };

        let action = args.action()?;
        if action.needs_vehicle() && vehicle.is_none() {
            return Err(ToolError::MissingVehicleId);
        }

        let region = match file.region.or(args.region) {
            Some(region) => region,
            None => match env(ENV_REGION) {
                Some(code) => code.parse::<Region>().map_err(ToolError::InvalidRegion)?,
                None => Region::default(),
            },
        };

        let api_url = file
            .api_url
            .or_else(|| non_empty(args.api_url.as_deref()))
            .or_else(|| env(ENV_API_URL))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            credentials: Credentials::new(email, password),
            vehicle,
            action,
            region,
            api_url,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
