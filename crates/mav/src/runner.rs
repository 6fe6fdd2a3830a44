//! Blocking control-loop runner with per-tick logging
//!
//! Same tick/pause discipline as
//! [`run_to_completion`](skyguide_core::run_to_completion), plus a
//! telemetry log line on every tick so an operator can follow the
//! vehicle through each stage.

use tracing::{debug, info};

use skyguide_core::{
    ActuatorInterface, Controller, GuidanceError, Pacer, TickOutcome, VehicleState,
};

/// Drive a controller to completion, logging progress each tick
///
/// `tick_budget = None` blocks until the termination condition holds,
/// however long that takes.
pub fn run_logged<C, V>(
    controller: &mut C,
    vehicle: &mut V,
    tick_budget: Option<u32>,
) -> Result<(), GuidanceError>
where
    C: Controller,
    V: VehicleState + ActuatorInterface + Pacer,
{
    info!(stage = controller.name(), "stage started");
    let mut ticks: u32 = 0;
    loop {
        let outcome = controller.tick(vehicle)?;
        let position = vehicle.position();
        debug!(
            stage = controller.name(),
            tick = ticks,
            lat = position.lat_deg,
            lon = position.lon_deg,
            alt_m = vehicle.altitude_m(),
            heading_deg = vehicle.heading_deg(),
            "tick"
        );
        match outcome {
            TickOutcome::Complete => {
                info!(stage = controller.name(), ticks, "stage complete");
                return Ok(());
            }
            TickOutcome::Continue { pause_ms } => {
                ticks = ticks.saturating_add(1);
                if let Some(budget) = tick_budget {
                    if ticks >= budget {
                        return Err(GuidanceError::Timeout {
                            stage: controller.name(),
                            ticks,
                        });
                    }
                }
                if pause_ms > 0 {
                    vehicle.pause_ms(pause_ms);
                }
            }
        }
    }
}
