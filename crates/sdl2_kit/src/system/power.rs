//! Battery and power supply state

use std::time::Duration;

use crate::backend::Core;

/// Power supply state
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PowerState {
    /// Cannot determine power status
    #[default]
    Unknown = 0,
    /// Not plugged in, running on the battery
    OnBattery = 1,
    /// Plugged in, no battery available
    NoBattery = 2,
    /// Plugged in, charging battery
    Charging = 3,
    /// Plugged in, battery charged
    Charged = 4,
}

impl PowerState {
    /// Map a native value, unknown values become [`PowerState::Unknown`]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::OnBattery,
            2 => Self::NoBattery,
            3 => Self::Charging,
            4 => Self::Charged,
            _ => Self::Unknown,
        }
    }
}

/// Snapshot of the power supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerInfo {
    /// Supply state
    pub state: PowerState,
    /// Battery time left, when known
    pub time_left: Option<Duration>,
    /// Battery charge in percent, when known
    pub percentage: Option<i32>,
}

/// Query the power supply
pub fn info<B: Core>() -> PowerInfo {
    let (mut seconds, mut percent) = (-1, -1);
    let state = PowerState::from_raw(B::power_info(&mut seconds, &mut percent));
    PowerInfo {
        state,
        time_left: u64::try_from(seconds).ok().map(Duration::from_secs),
        percentage: (percent >= 0).then_some(percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::Headless;

    #[test]
    fn test_headless_reports_mains_power() {
        let info = info::<Headless>();
        assert_eq!(info.state, PowerState::NoBattery);
        assert_eq!(info.time_left, None);
        assert_eq!(info.percentage, None);
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(PowerState::from_raw(3), PowerState::Charging);
        assert_eq!(PowerState::from_raw(-1), PowerState::Unknown);
    }
}
