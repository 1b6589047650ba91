//! The remote operations the command tool depends on.

use async_trait::async_trait;
use mazda_core::VehicleId;
use serde_json::Value;

use crate::error::Result;

/// An authenticated session against the vehicle cloud API.
///
/// Calls are issued one at a time; implementations need not be safe for
/// concurrent use. `close` releases the session and may be called once the
/// caller is done, on success and failure paths alike.
#[async_trait]
pub trait VehicleApi {
    /// All vehicles registered to the account, as returned by the API.
    async fn get_vehicles(&self) -> Result<Vec<Value>>;

    async fn get_vehicle_status(&self, vehicle_id: &VehicleId) -> Result<Value>;

    async fn start_engine(&self, vehicle_id: &VehicleId) -> Result<()>;

    async fn stop_engine(&self, vehicle_id: &VehicleId) -> Result<()>;

    async fn lock_doors(&self, vehicle_id: &VehicleId) -> Result<()>;

    async fn unlock_doors(&self, vehicle_id: &VehicleId) -> Result<()>;

    /// Push a destination to the vehicle's navigation.
    async fn send_poi(
        &self,
        vehicle_id: &VehicleId,
        latitude: f64,
        longitude: f64,
        name: &str,
    ) -> Result<Value>;

    async fn close(&self) -> Result<()>;
}
