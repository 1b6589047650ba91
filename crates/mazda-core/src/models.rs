//! Core data models for the remote command tool.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Account credentials, resolved once per invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identifier of a vehicle registered to the account.
///
/// The remote API hands out integers; the CLI and config file may carry
/// strings. Both deserialize into the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret a loose JSON value as an id. Strings and integers are
    /// accepted, anything else yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.trim().to_string())),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VehicleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom("vehicle id must be a string or an integer"))
    }
}

/// How the user asked to pick the target vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleRef {
    Id(VehicleId),
    Nickname(String),
    Vin(String),
}

impl VehicleRef {
    /// The user-facing text of the reference, used in error messages.
    pub fn query(&self) -> &str {
        match self {
            VehicleRef::Id(id) => id.as_str(),
            VehicleRef::Nickname(name) => name,
            VehicleRef::Vin(vin) => vin,
        }
    }
}

/// Matching view of a vehicle record returned by `get_vehicles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub vin: String,
    pub nickname: String,
}

impl Vehicle {
    /// Build the summary from a raw record. Returns `None` when the record
    /// carries no usable id.
    pub fn from_record(record: &Value) -> Option<Self> {
        let id = VehicleId::from_json(record.get("id")?)?;
        let text = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Some(Self {
            id,
            vin: text("vin"),
            nickname: text("nickname"),
        })
    }

    /// Case-insensitive match against a nickname or VIN reference.
    /// Nicknames are free text and fold full Unicode case; VINs are ASCII.
    /// Explicit ids match on equality.
    pub fn matches(&self, reference: &VehicleRef) -> bool {
        match reference {
            VehicleRef::Id(id) => &self.id == id,
            VehicleRef::Nickname(name) => {
                self.nickname.to_lowercase() == name.trim().to_lowercase()
            }
            VehicleRef::Vin(vin) => self.vin.eq_ignore_ascii_case(vin.trim()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EngineAction {
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DoorAction {
    Lock,
    Unlock,
}

/// A destination pushed to the vehicle's navigation system.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// The single remote action an invocation performs.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    List,
    Status,
    Engine(EngineAction),
    Doors(DoorAction),
    SendPoi(PointOfInterest),
}

impl Action {
    /// Only listing works without a target vehicle.
    pub fn needs_vehicle(&self) -> bool {
        !matches!(self, Action::List)
    }
}

/// Account region. Selects which regional backend the session talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Region {
    /// North America
    #[default]
    #[value(name = "MNAO")]
    Mnao,
    /// Europe
    #[value(name = "MME")]
    Mme,
    /// Japan
    #[value(name = "MJO")]
    Mjo,
}

impl Region {
    pub fn code(self) -> &'static str {
        match self {
            Region::Mnao => "MNAO",
            Region::Mme => "MME",
            Region::Mjo => "MJO",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MNAO" => Ok(Region::Mnao),
            "MME" => Ok(Region::Mme),
            "MJO" => Ok(Region::Mjo),
            other => Err(format!("unknown region: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vehicle_id_accepts_strings_and_integers() {
        let from_int: VehicleId = serde_json::from_value(json!(12345)).unwrap();
        let from_str: VehicleId = serde_json::from_value(json!("12345")).unwrap();
        assert_eq!(from_int, from_str);
        assert!(serde_json::from_value::<VehicleId>(json!(true)).is_err());
        assert!(VehicleId::from_json(&json!(1.5)).is_none());
    }

    #[test]
    fn vehicle_summary_tolerates_missing_fields() {
        let record = json!({"id": 7, "carlineName": "CX-5"});
        let vehicle = Vehicle::from_record(&record).unwrap();
        assert_eq!(vehicle.id.as_str(), "7");
        assert!(vehicle.nickname.is_empty());
        assert!(Vehicle::from_record(&json!({"vin": "JM3"})).is_none());
    }

    #[test]
    fn matching_ignores_case() {
        let vehicle = Vehicle {
            id: VehicleId::new("1"),
            vin: "JM3KFBCM1N0000001".to_string(),
            nickname: "Red".to_string(),
        };
        assert!(vehicle.matches(&VehicleRef::Nickname("red".into())));
        assert!(vehicle.matches(&VehicleRef::Vin("jm3kfbcm1n0000001".into())));
        assert!(!vehicle.matches(&VehicleRef::Nickname("blue".into())));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("a@example.com", "hunter2");
        let out = format!("{:?}", creds);
        assert!(out.contains("a@example.com"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn region_parses_case_insensitively() {
        assert_eq!("mme".parse::<Region>().unwrap(), Region::Mme);
        assert_eq!(Region::default().code(), "MNAO");
        assert!("XX".parse::<Region>().is_err());
    }
}
