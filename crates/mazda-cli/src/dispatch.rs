//! Runs the one action an invocation asked for.

use mazda_core::{Action, DoorAction, EngineAction, VehicleId, VehicleRef};
use mazda_sdk::VehicleApi;
use std::io::Write;

use crate::config::ToolConfig;
use crate::error::ToolError;
use crate::output::{print_json, print_line};
use crate::resolve::find_vehicle;

/// Dispatch the configured action, then close the session.
///
/// The session is closed exactly once whichever branch ran, including when
/// the action failed. An action error takes precedence over a close error.
pub async fn execute<A, W>(api: &A, config: &ToolConfig, out: &mut W) -> Result<(), ToolError>
where
    A: VehicleApi + Sync + ?Sized,
    W: Write,
{
    let result = dispatch(api, config, out).await;
    let closed = api.close().await;

    match (result, closed) {
        (Err(err), Err(close_err)) => {
            tracing::warn!(error = %close_err, "failed to close session");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), closed) => closed.map_err(ToolError::from),
    }
}

async fn dispatch<A, W>(api: &A, config: &ToolConfig, out: &mut W) -> Result<(), ToolError>
where
    A: VehicleApi + Sync + ?Sized,
    W: Write,
{
    let vehicle = config.vehicle.as_ref();
    match &config.action {
        Action::List => list_vehicles(api, out).await,
        Action::SendPoi(poi) => {
            let vehicle_id = target_vehicle(api, vehicle).await?;
            let result = api
                .send_poi(&vehicle_id, poi.latitude, poi.longitude, &poi.name)
                .await?;
            print_json(out, &result)
        }
        Action::Status => {
            let vehicle_id = target_vehicle(api, vehicle).await?;
            let status = api.get_vehicle_status(&vehicle_id).await?;
            print_json(out, &status)
        }
        Action::Engine(action) => {
            let vehicle_id = target_vehicle(api, vehicle).await?;
            control_engine(api, &vehicle_id, *action, out).await
        }
        Action::Doors(action) => {
            let vehicle_id = target_vehicle(api, vehicle).await?;
            control_locks(api, &vehicle_id, *action, out).await
        }
    }
}

async fn list_vehicles<A, W>(api: &A, out: &mut W) -> Result<(), ToolError>
where
    A: VehicleApi + Sync + ?Sized,
    W: Write,
{
    tracing::info!("listing vehicles");
    let vehicles = api.get_vehicles().await?;
    print_json(out, &vehicles)
}

/// Turn the configured reference into a concrete id. Nickname and VIN
/// references cost one `get_vehicles` call.
async fn target_vehicle<A>(api: &A, reference: Option<&VehicleRef>) -> Result<VehicleId, ToolError>
where
    A: VehicleApi + Sync + ?Sized,
{
    let vehicle_id = match reference {
        None => return Err(ToolError::MissingVehicleId),
        Some(VehicleRef::Id(id)) => id.clone(),
        Some(reference) => {
            let vehicles = api.get_vehicles().await?;
            let id = find_vehicle(&vehicles, reference)?;
            tracing::debug!(query = reference.query(), vehicle = %id, "resolved vehicle");
            id
        }
    };
    tracing::info!(vehicle = %vehicle_id, "dispatching");
    Ok(vehicle_id)
}

async fn control_engine<A, W>(
    api: &A,
    vehicle_id: &VehicleId,
    action: EngineAction,
    out: &mut W,
) -> Result<(), ToolError>
where
    A: VehicleApi + Sync + ?Sized,
    W: Write,
{
    match action {
        EngineAction::Start => {
            api.start_engine(vehicle_id).await?;
            print_line(out, &format!("Engine start requested for vehicle {vehicle_id}"))
        }
        EngineAction::Stop => {
            api.stop_engine(vehicle_id).await?;
            print_line(out, &format!("Engine stop requested for vehicle {vehicle_id}"))
        }
    }
}

async fn control_locks<A, W>(
    api: &A,
    vehicle_id: &VehicleId,
    action: DoorAction,
    out: &mut W,
) -> Result<(), ToolError>
where
    A: VehicleApi + Sync + ?Sized,
    W: Write,
{
    match action {
        DoorAction::Lock => {
            api.lock_doors(vehicle_id).await?;
            print_line(out, &format!("Door lock requested for vehicle {vehicle_id}"))
        }
        DoorAction::Unlock => {
            api.unlock_doors(vehicle_id).await?;
            print_line(out, &format!("Door unlock requested for vehicle {vehicle_id}"))
        }
    }
}
