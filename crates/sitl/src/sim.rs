//! Channel-pulse-driven copter kinematics
//!
//! The model is intentionally minimal: yaw rate, climb rate, and
//! forward ground speed are each proportional to the deflection of the
//! corresponding RC channel from neutral, and position integrates in
//! the same flat-earth degree space the guidance math uses. RC pitch is
//! inverted - pulses below neutral move the vehicle forward.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use skyguide_core::nav::geo::{normalize_deg, METERS_PER_DEGREE};
use skyguide_core::{
    ActuatorInterface, Channel, ChannelOverrides, GeoPoint, Pacer, VehicleLifecycle, VehicleState,
    PULSE_NEUTRAL,
};

/// Configuration for the simulated vehicle.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Initial position.
    pub start: GeoPoint,
    /// Initial heading in degrees.
    pub start_heading_deg: f32,
    /// Yaw rate at full channel deflection (deg/s).
    pub max_yaw_rate_dps: f32,
    /// Climb rate at full channel deflection (m/s).
    pub max_climb_rate_ms: f32,
    /// Forward ground speed at full channel deflection (m/s).
    pub max_speed_ms: f32,
    /// Physics integration sub-step (ms).
    pub step_ms: u32,
    /// Simulated time before pre-arm checks pass (ms).
    pub armable_after_ms: u64,
    /// Uniform heading read noise amplitude (degrees). 0 = none.
    pub heading_noise_deg: f32,
    /// RNG seed for deterministic noise. None = entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start: GeoPoint::new(50.450739, 30.461242),
            start_heading_deg: 0.0,
            max_yaw_rate_dps: 60.0,
            max_climb_rate_ms: 5.0,
            max_speed_ms: 20.0,
            step_ms: 50,
            armable_after_ms: 0,
            heading_noise_deg: 0.0,
            seed: None,
        }
    }
}

/// Simulated vehicle implementing the full capability surface.
pub struct SimVehicle {
    config: SimConfig,
    lat_deg: f64,
    lon_deg: f64,
    alt_m: f32,
    heading_deg: f32,
    heading_read_deg: f32,
    overrides: [u16; 4],
    armed: bool,
    flight_mode: &'static str,
    sim_time_ms: u64,
    rng: StdRng,
    commands: Vec<(Channel, u16)>,
}

impl SimVehicle {
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            lat_deg: config.start.lat_deg,
            lon_deg: config.start.lon_deg,
            alt_m: 0.0,
            heading_deg: config.start_heading_deg,
            heading_read_deg: config.start_heading_deg,
            overrides: [0; 4],
            armed: false,
            flight_mode: "STABILIZE",
            sim_time_ms: 0,
            rng,
            commands: Vec::new(),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SimConfig::default())
    }

    /// Simulated time since power-on (ms).
    pub fn sim_time_ms(&self) -> u64 {
        self.sim_time_ms
    }

    /// Current flight mode name.
    pub fn flight_mode(&self) -> &'static str {
        self.flight_mode
    }

    /// Every override applied so far, in order.
    pub fn commands(&self) -> &[(Channel, u16)] {
        &self.commands
    }

    /// Commands sent to a single channel, in order.
    pub fn channel_commands(&self, channel: Channel) -> Vec<u16> {
        self.commands
            .iter()
            .filter(|(ch, _)| *ch == channel)
            .map(|&(_, pulse)| pulse)
            .collect()
    }

    /// Normalized deflection of a channel from neutral, -1.0 to +1.0.
    /// A released channel (0 on the wire) behaves as neutral.
    fn deflection(&self, channel: Channel) -> f32 {
        let pulse = self.overrides[channel.index()];
        if pulse == 0 {
            return 0.0;
        }
        ((pulse as f32 - PULSE_NEUTRAL as f32) / 500.0).clamp(-1.0, 1.0)
    }

    /// Integrate the kinematics for one sub-step.
    fn integrate(&mut self, dt_s: f32) {
        if !self.armed {
            // Disarmed: outputs are forced neutral regardless of the
            // commanded overrides.
            return;
        }

        let yaw_rate = self.deflection(Channel::Yaw) * self.config.max_yaw_rate_dps;
        self.heading_deg = normalize_deg(self.heading_deg, yaw_rate * dt_s);

        let climb = self.deflection(Channel::Throttle) * self.config.max_climb_rate_ms;
        self.alt_m = (self.alt_m + climb * dt_s).max(0.0);

        // Pitch below neutral moves forward along the current heading.
        let speed = -self.deflection(Channel::Pitch) * self.config.max_speed_ms;
        let heading_rad = self.heading_deg.to_radians();
        let north_m = speed * heading_rad.cos() * dt_s;
        let east_m = speed * heading_rad.sin() * dt_s;
        self.lat_deg += north_m as f64 / METERS_PER_DEGREE;
        self.lon_deg += east_m as f64 / METERS_PER_DEGREE;

        self.heading_read_deg = if self.config.heading_noise_deg > 0.0 {
            let noise = self
                .rng
                .gen_range(-self.config.heading_noise_deg..=self.config.heading_noise_deg);
            normalize_deg(self.heading_deg, noise)
        } else {
            self.heading_deg
        };
    }
}

impl VehicleState for SimVehicle {
    fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat_deg, self.lon_deg)
    }

    fn altitude_m(&self) -> f32 {
        self.alt_m
    }

    fn heading_deg(&self) -> f32 {
        self.heading_read_deg
    }

    fn is_armable(&self) -> bool {
        self.sim_time_ms >= self.config.armable_after_ms
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

impl ActuatorInterface for SimVehicle {
    fn apply_overrides(&mut self, overrides: &ChannelOverrides) -> Result<(), &'static str> {
        for (channel, pulse) in overrides.iter() {
            self.overrides[channel.index()] = pulse;
            self.commands.push((channel, pulse));
        }
        Ok(())
    }
}

impl VehicleLifecycle for SimVehicle {
    fn set_flight_mode(&mut self, mode: &'static str) -> Result<(), &'static str> {
        self.flight_mode = mode;
        Ok(())
    }

    fn arm(&mut self) -> Result<(), &'static str> {
        if !self.is_armable() {
            return Err("vehicle not armable");
        }
        self.armed = true;
        Ok(())
    }
}

impl Pacer for SimVehicle {
    /// Lockstep time: advance the physics by the requested pause in
    /// fixed sub-steps instead of sleeping.
    fn pause_ms(&mut self, ms: u32) {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(self.config.step_ms);
            self.integrate(step as f32 / 1000.0);
            self.sim_time_ms += step as u64;
            remaining -= step;
        }
    }
}
