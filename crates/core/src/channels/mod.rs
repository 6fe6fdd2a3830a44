//! RC channel ids, pulse-width conventions, and partial override maps
//!
//! The vehicle is actuated through four RC-style channels addressed by
//! conventional channel numbering (roll=1, pitch=2, throttle=3, yaw=4).
//! Commands are pulse widths in microseconds: 1500 is neutral, the
//! usable range is roughly 1000..=2000.
//!
//! A [`ChannelOverrides`] value is always a *partial* update: only the
//! channels present in the map change, the vehicle keeps every other
//! channel at its last commanded value. The read-modify-write merge
//! into the persistent override set is owned by the
//! [`ActuatorInterface`](crate::traits::ActuatorInterface)
//! implementation, not by the controllers.

/// Minimum usable pulse width (μs)
pub const PULSE_MIN: u16 = 1000;
/// Neutral pulse width (μs)
pub const PULSE_NEUTRAL: u16 = 1500;
/// Maximum usable pulse width (μs)
pub const PULSE_MAX: u16 = 2000;

/// RC control channel, numbered per the conventional mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Roll,
    Pitch,
    Throttle,
    Yaw,
}

impl Channel {
    /// All four channels in numbering order
    pub const ALL: [Channel; 4] = [
        Channel::Roll,
        Channel::Pitch,
        Channel::Throttle,
        Channel::Yaw,
    ];

    /// RC channel number (1-based, matches the wire encoding)
    pub fn number(self) -> u8 {
        match self {
            Channel::Roll => 1,
            Channel::Pitch => 2,
            Channel::Throttle => 3,
            Channel::Yaw => 4,
        }
    }

    /// Slot index (0-based)
    pub fn index(self) -> usize {
        self.number() as usize - 1
    }
}

/// Partial mapping from channel to pulse width command
///
/// Only the channels that were explicitly `set` take part in the merge;
/// the rest are left untouched on the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelOverrides {
    slots: [Option<u16>; 4],
}

impl ChannelOverrides {
    /// Create an empty (no-op) override map
    pub fn new() -> Self {
        Self::default()
    }

    /// Override map that re-centers all four channels to neutral
    ///
    /// Sent once before takeoff so no stale override survives from a
    /// previous flight.
    pub fn all_neutral() -> Self {
        let mut overrides = Self::new();
        for channel in Channel::ALL {
            overrides.slots[channel.index()] = Some(PULSE_NEUTRAL);
        }
        overrides
    }

    /// Set a channel command, consuming and returning the map
    pub fn set(mut self, channel: Channel, pulse_us: u16) -> Self {
        self.slots[channel.index()] = Some(pulse_us);
        self
    }

    /// Commanded pulse for a channel, if present in this update
    pub fn get(&self, channel: Channel) -> Option<u16> {
        self.slots[channel.index()]
    }

    /// True if no channel is commanded
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Iterate over the commanded (channel, pulse) pairs
    pub fn iter(&self) -> impl Iterator<Item = (Channel, u16)> + '_ {
        Channel::ALL
            .iter()
            .filter_map(|&channel| self.slots[channel.index()].map(|pulse| (channel, pulse)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_numbers_match_rc_convention() {
        assert_eq!(Channel::Roll.number(), 1);
        assert_eq!(Channel::Pitch.number(), 2);
        assert_eq!(Channel::Throttle.number(), 3);
        assert_eq!(Channel::Yaw.number(), 4);
    }

    #[test]
    fn empty_overrides_command_nothing() {
        let overrides = ChannelOverrides::new();
        assert!(overrides.is_empty());
        assert_eq!(overrides.iter().count(), 0);
        for channel in Channel::ALL {
            assert_eq!(overrides.get(channel), None);
        }
    }

    #[test]
    fn set_is_partial() {
        let overrides = ChannelOverrides::new().set(Channel::Yaw, 1550);
        assert_eq!(overrides.get(Channel::Yaw), Some(1550));
        assert_eq!(overrides.get(Channel::Pitch), None);
        assert_eq!(overrides.iter().count(), 1);
    }

    #[test]
    fn all_neutral_covers_every_channel() {
        let overrides = ChannelOverrides::all_neutral();
        for channel in Channel::ALL {
            assert_eq!(overrides.get(channel), Some(PULSE_NEUTRAL));
        }
    }

    #[test]
    fn iter_yields_channels_in_numbering_order() {
        let overrides = ChannelOverrides::new()
            .set(Channel::Yaw, 1450)
            .set(Channel::Pitch, 1000);
        let commands: [(Channel, u16); 2] = {
            let mut iter = overrides.iter();
            [iter.next().unwrap(), iter.next().unwrap()]
        };
        assert_eq!(commands[0], (Channel::Pitch, 1000));
        assert_eq!(commands[1], (Channel::Yaw, 1450));
    }
}
