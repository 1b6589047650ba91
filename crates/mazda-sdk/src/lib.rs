//! MyMazda SDK - remote vehicle command client
//!
//! Defines the `VehicleApi` seam the command tool is written against and a
//! reqwest-based implementation that talks to a JSON gateway.

pub mod api;
pub mod client;
pub mod error;

pub use api::VehicleApi;
pub use client::{MazdaClient, DEFAULT_BASE_URL};
pub use error::ClientError;
