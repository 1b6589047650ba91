//! Command line grammar.

use clap::{ArgGroup, Parser};
use mazda_core::{Action, DoorAction, EngineAction, PointOfInterest, Region};
use std::path::PathBuf;

use crate::error::ToolError;

/// MyMazda API tool
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "MyMazda API tool", long_about = None)]
#[command(group(ArgGroup::new("lookup").args(["name", "vin"])))]
pub struct Args {
    /// List all cars registered to your MyMazda account.
    #[arg(long)]
    pub list: bool,

    /// Select the vehicle by its nickname (case-insensitive).
    #[arg(long)]
    pub name: Option<String>,

    /// Select the vehicle by its VIN (case-insensitive).
    #[arg(long)]
    pub vin: Option<String>,

    /// Vehicle ID of the vehicle you want to control.
    #[arg(long = "car_id")]
    pub car_id: Option<String>,

    /// Print the vehicle status.
    #[arg(long)]
    pub status: bool,

    /// Control the engine.
    #[arg(long, value_enum)]
    pub engine: Option<EngineAction>,

    /// Control the door locks.
    #[arg(long, value_enum)]
    pub doors: Option<DoorAction>,

    /// MyMazda account email address.
    #[arg(long)]
    pub email: Option<String>,

    /// MyMazda account password.
    #[arg(long)]
    pub password: Option<String>,

    /// Point of interest name.
    #[arg(long = "poi_name", requires_all = ["poi_lat", "poi_long"])]
    pub poi_name: Option<String>,

    /// Point of interest latitude.
    #[arg(long = "poi_lat", allow_negative_numbers = true)]
    pub poi_lat: Option<f64>,

    /// Point of interest longitude.
    #[arg(long = "poi_long", allow_negative_numbers = true)]
    pub poi_long: Option<f64>,

    /// Account region.
    #[arg(long, value_enum)]
    pub region: Option<Region>,

    /// Base URL of the MyMazda gateway.
    #[arg(long = "api_url")]
    pub api_url: Option<String>,

    /// Path to a JSON config file (defaults to mazda_api_tool.json next to the executable).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The single action this invocation performs.
    ///
    /// Flags are checked in a fixed order: list, send-poi, status, engine,
    /// doors. With no action flag the vehicle status is printed.
    pub fn action(&self) -> Result<Action, ToolError> {
        if self.list {
            return Ok(Action::List);
        }
        if let Some(name) = &self.poi_name {
            let (Some(latitude), Some(longitude)) = (self.poi_lat, self.poi_long) else {
                return Err(ToolError::IncompletePoi);
            };
            return Ok(Action::SendPoi(PointOfInterest {
                name: name.clone(),
                latitude,
                longitude,
            }));
        }
        if self.status {
            return Ok(Action::Status);
        }
        if let Some(engine) = self.engine {
            return Ok(Action::Engine(engine));
        }
        if let Some(doors) = self.doors {
            return Ok(Action::Doors(doors));
        }
        Ok(Action::Status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mazda-tool").chain(args.iter().copied()))
            .expect("parse args")
    }

    #[test]
    fn underscore_flags_parse() {
        let args = parse(&[
            "--car_id",
            "42",
            "--poi_name",
            "Office",
            "--poi_lat",
            "33.68",
            "--poi_long",
            "-117.82",
        ]);
        assert_eq!(args.car_id.as_deref(), Some("42"));
        assert_eq!(
            args.action().unwrap(),
            Action::SendPoi(PointOfInterest {
                name: "Office".to_string(),
                latitude: 33.68,
                longitude: -117.82,
            })
        );
    }

    #[test]
    fn engine_wins_over_doors() {
        let args = parse(&["--engine", "start", "--doors", "lock"]);
        assert_eq!(args.action().unwrap(), Action::Engine(EngineAction::Start));
    }

    #[test]
    fn doors_action_comes_from_doors_flag() {
        let args = parse(&["--doors", "unlock"]);
        assert_eq!(args.action().unwrap(), Action::Doors(DoorAction::Unlock));
    }

    #[test]
    fn list_takes_priority_and_status_is_default() {
        let args = parse(&["--list", "--status", "--engine", "stop"]);
        assert_eq!(args.action().unwrap(), Action::List);

        let args = parse(&["--car_id", "1"]);
        assert_eq!(args.action().unwrap(), Action::Status);
    }

    #[test]
    fn poi_requires_coordinates() {
        let result = Args::try_parse_from(["mazda-tool", "--poi_name", "Home"]);
        assert!(result.is_err());
    }

    #[test]
    fn name_and_vin_conflict() {
        let result = Args::try_parse_from(["mazda-tool", "--name", "Red", "--vin", "JM3"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_engine_action_is_rejected() {
        let result = Args::try_parse_from(["mazda-tool", "--engine", "idle"]);
        assert!(result.is_err());
    }

    #[test]
    fn region_uses_upper_case_codes() {
        let args = parse(&["--region", "MJO", "--list"]);
        assert_eq!(args.region, Some(Region::Mjo));
    }
}
