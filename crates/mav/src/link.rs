//! Synchronous MAVLink vehicle link
//!
//! `MavlinkVehicle` is the transport behind the core capability traits:
//! it pumps HEARTBEAT and GLOBAL_POSITION_INT into a cached state for
//! the [`VehicleState`] reads, shadow-merges the four override channels
//! and resends a full RC_CHANNELS_OVERRIDE on every actuator command,
//! and issues COMMAND_LONG for the mode change and arming.
//!
//! The link is deliberately synchronous: control-loop pacing pumps the
//! telemetry stream until the deadline instead of sleeping blind, so
//! state reads are as fresh as the stream allows.

use std::time::{Duration, Instant};

use mavlink::common::{
    MavAutopilot, MavCmd, MavMessage, MavModeFlag, MavState, COMMAND_LONG_DATA,
    RC_CHANNELS_OVERRIDE_DATA, REQUEST_DATA_STREAM_DATA,
};
use mavlink::{MavConnection, MavHeader, Message};
use tracing::{debug, info, warn};

use skyguide_core::{
    ActuatorInterface, ChannelOverrides, GeoPoint, Pacer, VehicleLifecycle, VehicleState,
};

use crate::error::LinkError;

/// Default autopilot endpoint (SITL TCP)
pub const DEFAULT_ADDRESS: &str = "tcpout:127.0.0.1:5762";

/// Requested rate for all telemetry streams (Hz)
const TELEMETRY_RATE_HZ: u16 = 4;

/// How long to wait for the first position fix during connect
const POSITION_WAIT: Duration = Duration::from_secs(30);

/// ArduCopter custom mode number for a flight mode name
fn custom_mode_for(mode: &'static str) -> Option<u32> {
    match mode {
        "STABILIZE" => Some(0),
        "ALT_HOLD" => Some(2),
        "GUIDED" => Some(4),
        "LOITER" => Some(5),
        "RTL" => Some(6),
        "LAND" => Some(9),
        _ => None,
    }
}

/// Merge a partial override map over the current channel shadow
///
/// Zero means "released" on the wire, so untouched channels stay
/// released until first commanded.
fn merge_overrides(mut current: [u16; 4], overrides: &ChannelOverrides) -> [u16; 4] {
    for (channel, pulse) in overrides.iter() {
        current[channel.index()] = pulse;
    }
    current
}

/// Telemetry fields cached from the incoming stream
#[derive(Debug, Clone, Copy, Default)]
struct TelemetryCache {
    position: GeoPoint,
    relative_alt_m: f32,
    heading_deg: f32,
    have_position: bool,
    armed: bool,
    standby_or_active: bool,
}

/// Live MAVLink connection to an autopilot
pub struct MavlinkVehicle {
    conn: Box<dyn MavConnection<MavMessage> + Sync + Send>,
    target_system: u8,
    target_component: u8,
    cache: TelemetryCache,
    overrides: [u16; 4],
}

impl MavlinkVehicle {
    /// Connect, request telemetry streams, and wait for the first
    /// position fix
    pub fn connect(address: &str) -> Result<Self, LinkError> {
        info!(address, "Connecting to vehicle");
        let conn = mavlink::connect::<MavMessage>(address)
            .map_err(|e| LinkError::ConnectionFailed(format!("{address}: {e}")))?;

        let mut vehicle = Self {
            conn,
            target_system: 1,
            target_component: 1,
            cache: TelemetryCache::default(),
            overrides: [0; 4],
        };
        vehicle.wait_heartbeat()?;
        vehicle.request_telemetry()?;
        vehicle.wait_position(POSITION_WAIT)?;
        info!(
            system = vehicle.target_system,
            "Vehicle ready: telemetry streaming"
        );
        Ok(vehicle)
    }

    /// Receive and cache one incoming message (blocking)
    pub fn pump_once(&mut self) -> Result<(), LinkError> {
        let (header, message) = self
            .conn
            .recv()
            .map_err(|e| LinkError::Protocol(e.to_string()))?;
        self.handle(header, message);
        Ok(())
    }

    fn wait_heartbeat(&mut self) -> Result<(), LinkError> {
        loop {
            let (header, message) = self
                .conn
                .recv()
                .map_err(|e| LinkError::Protocol(e.to_string()))?;
            if let MavMessage::HEARTBEAT(ref heartbeat) = message {
                if heartbeat.autopilot != MavAutopilot::MAV_AUTOPILOT_INVALID {
                    self.target_system = header.system_id;
                    self.handle(header, message);
                    return Ok(());
                }
            }
        }
    }

    fn wait_position(&mut self, timeout: Duration) -> Result<(), LinkError> {
        let deadline = Instant::now() + timeout;
        while !self.cache.have_position {
            if Instant::now() >= deadline {
                return Err(LinkError::Timeout("initial position fix"));
            }
            self.pump_once()?;
        }
        Ok(())
    }

    fn request_telemetry(&mut self) -> Result<(), LinkError> {
        // Stream id 0 = all streams.
        let request = MavMessage::REQUEST_DATA_STREAM(REQUEST_DATA_STREAM_DATA {
            req_message_rate: TELEMETRY_RATE_HZ,
            target_system: self.target_system,
            target_component: self.target_component,
            req_stream_id: 0,
            start_stop: 1,
        });
        self.send(&request)
    }

    fn send(&self, message: &MavMessage) -> Result<(), LinkError> {
        self.conn
            .send(&MavHeader::default(), message)
            .map(|_| ())
            .map_err(|e| LinkError::Protocol(e.to_string()))
    }

    fn send_command(&self, command: MavCmd, param1: f32, param2: f32) -> Result<(), LinkError> {
        let message = MavMessage::COMMAND_LONG(COMMAND_LONG_DATA {
            param1,
            param2,
            command,
            target_system: self.target_system,
            target_component: self.target_component,
            confirmation: 0,
            ..Default::default()
        });
        self.send(&message)
    }

    fn handle(&mut self, header: MavHeader, message: MavMessage) {
        if header.system_id != self.target_system {
            return;
        }
        match message {
            MavMessage::HEARTBEAT(heartbeat) => {
                self.cache.armed = heartbeat
                    .base_mode
                    .contains(MavModeFlag::MAV_MODE_FLAG_SAFETY_ARMED);
                self.cache.standby_or_active = matches!(
                    heartbeat.system_status,
                    MavState::MAV_STATE_STANDBY | MavState::MAV_STATE_ACTIVE
                );
            }
            MavMessage::GLOBAL_POSITION_INT(position) => {
                self.cache.position =
                    GeoPoint::new(position.lat as f64 / 1e7, position.lon as f64 / 1e7);
                self.cache.relative_alt_m = position.relative_alt as f32 / 1000.0;
                if position.hdg != u16::MAX {
                    self.cache.heading_deg = position.hdg as f32 / 100.0;
                }
                self.cache.have_position = true;
            }
            other => {
                debug!(id = other.message_id(), "ignoring telemetry message");
            }
        }
    }
}

impl VehicleState for MavlinkVehicle {
    fn position(&self) -> GeoPoint {
        self.cache.position
    }

    fn altitude_m(&self) -> f32 {
        self.cache.relative_alt_m
    }

    fn heading_deg(&self) -> f32 {
        self.cache.heading_deg
    }

    fn is_armable(&self) -> bool {
        self.cache.standby_or_active && self.cache.have_position
    }

    fn is_armed(&self) -> bool {
        self.cache.armed
    }
}

impl ActuatorInterface for MavlinkVehicle {
    fn apply_overrides(&mut self, overrides: &ChannelOverrides) -> Result<(), &'static str> {
        self.overrides = merge_overrides(self.overrides, overrides);
        let [roll, pitch, throttle, yaw] = self.overrides;
        let message = MavMessage::RC_CHANNELS_OVERRIDE(RC_CHANNELS_OVERRIDE_DATA {
            chan1_raw: roll,
            chan2_raw: pitch,
            chan3_raw: throttle,
            chan4_raw: yaw,
            target_system: self.target_system,
            target_component: self.target_component,
            ..Default::default()
        });
        debug!(roll, pitch, throttle, yaw, "channel overrides");
        self.send(&message).map_err(|_| "rc override send failed")
    }
}

impl Pacer for MavlinkVehicle {
    /// Pump the telemetry stream until the deadline instead of
    /// sleeping, so the next tick reads fresh state.
    fn pause_ms(&mut self, ms: u32) {
        let deadline = Instant::now() + Duration::from_millis(ms as u64);
        while Instant::now() < deadline {
            if let Err(err) = self.pump_once() {
                warn!(%err, "telemetry pump failed");
                std::thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

impl VehicleLifecycle for MavlinkVehicle {
    fn set_flight_mode(&mut self, mode: &'static str) -> Result<(), &'static str> {
        let custom_mode = custom_mode_for(mode).ok_or("unknown flight mode")?;
        info!(mode, custom_mode, "setting flight mode");
        // param1 = MAV_MODE_FLAG_CUSTOM_MODE_ENABLED
        self.send_command(MavCmd::MAV_CMD_DO_SET_MODE, 1.0, custom_mode as f32)
            .map_err(|_| "mode change send failed")
    }

    fn arm(&mut self) -> Result<(), &'static str> {
        info!("Arming motors");
        self.send_command(MavCmd::MAV_CMD_COMPONENT_ARM_DISARM, 1.0, 0.0)
            .map_err(|_| "arm command send failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyguide_core::Channel;

    #[test]
    fn merge_keeps_untouched_channels() {
        let current = [1500, 1000, 1500, 1450];
        let update = ChannelOverrides::new().set(Channel::Yaw, 1500);
        assert_eq!(merge_overrides(current, &update), [1500, 1000, 1500, 1500]);
    }

    #[test]
    fn merge_applies_multiple_channels() {
        let current = [0, 0, 0, 0];
        let update = ChannelOverrides::all_neutral();
        assert_eq!(merge_overrides(current, &update), [1500; 4]);
    }

    #[test]
    fn merge_of_empty_update_is_identity() {
        let current = [1500, 1400, 2000, 1550];
        assert_eq!(
            merge_overrides(current, &ChannelOverrides::new()),
            current
        );
    }

    #[test]
    fn known_copter_modes_resolve() {
        assert_eq!(custom_mode_for("ALT_HOLD"), Some(2));
        assert_eq!(custom_mode_for("GUIDED"), Some(4));
        assert_eq!(custom_mode_for("ACRO_PLUS"), None);
    }
}
