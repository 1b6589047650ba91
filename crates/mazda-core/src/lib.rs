//! Shared types for the MyMazda remote command tool.

pub mod models;

pub use models::{
    Action, Credentials, DoorAction, EngineAction, PointOfInterest, Region, Vehicle, VehicleId,
    VehicleRef,
};
