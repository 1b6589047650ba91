//! Vehicle lookup by nickname or VIN.

use mazda_core::{Vehicle, VehicleId, VehicleRef};
use serde_json::Value;

use crate::error::ToolError;

/// Find the single vehicle in `records` matching `reference`.
pub fn find_vehicle(records: &[Value], reference: &VehicleRef) -> Result<VehicleId, ToolError> {
    let mut matches = records
        .iter()
        .filter_map(Vehicle::from_record)
        .filter(|vehicle| vehicle.matches(reference))
        .map(|vehicle| vehicle.id);

    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        (None, _) => Err(ToolError::NoMatch {
            query: reference.query().to_string(),
        }),
        (Some(_), Some(_)) => Err(ToolError::Ambiguous {
            query: reference.query().to_string(),
            count: 2 + matches.count(),
        }),
    }
}
