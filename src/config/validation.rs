//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::rig::Axis;

use super::ChairConfig;

/// Validate a chair configuration.
///
/// Checks:
/// - Drive train values are positive
/// - Speed/acceleration clamp ranges satisfy 0 < min <= max
/// - Axis travel ranges satisfy min < max
/// - Choreography tuning values are usable
pub fn validate_config(config: &ChairConfig) -> Result<()> {
    validate_drive(config)?;
    validate_speed(config)?;
    validate_axes(config)?;
    validate_choreography(config)?;
    Ok(())
}

fn validate_drive(config: &ChairConfig) -> Result<()> {
    if config.drive.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.drive.steps_per_revolution,
        )));
    }

    if config.drive.gear_ratio <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidGearRatio(
            config.drive.gear_ratio,
        )));
    }

    Ok(())
}

fn validate_speed(config: &ChairConfig) -> Result<()> {
    let speed = &config.speed;

    if speed.min_speed <= 0.0 || speed.min_speed > speed.max_speed {
        return Err(Error::Config(ConfigError::InvalidSpeedRange {
            min: speed.min_speed,
            max: speed.max_speed,
        }));
    }

    if speed.min_acceleration <= 0.0 || speed.min_acceleration > speed.max_acceleration {
        return Err(Error::Config(ConfigError::InvalidAccelerationRange {
            min: speed.min_acceleration,
            max: speed.max_acceleration,
        }));
    }

    Ok(())
}

fn validate_axes(config: &ChairConfig) -> Result<()> {
    for axis in Axis::ALL {
        let range = config.axes.axis(axis);
        if !range.is_valid() {
            return Err(Error::Config(ConfigError::InvalidAxisLimits {
                axis,
                min: range.min.value(),
                max: range.max.value(),
            }));
        }
    }

    Ok(())
}

fn validate_choreography(config: &ChairConfig) -> Result<()> {
    let chor = &config.choreography;

    if chor.slow_climb.increments == 0 || chor.level_out.increments == 0 {
        return Err(invalid_choreography("increments must be > 0"));
    }

    if chor.level_out.delay_divisor <= 0.0 {
        return Err(invalid_choreography("level_out delay_divisor must be > 0"));
    }

    if chor.level_out.min_delay_ms > chor.level_out.max_delay_ms {
        return Err(invalid_choreography("level_out delay bounds are inverted"));
    }

    for fraction in [
        chor.fast_fall.fraction,
        chor.gentle_dip.fraction,
        chor.small_hill.fraction,
    ] {
        if fraction <= 0.0 || fraction > 1.0 {
            return Err(invalid_choreography("fractions must be in (0, 1]"));
        }
    }

    if chor.rumble.interval_ms == 0 {
        return Err(invalid_choreography("rumble interval_ms must be > 0"));
    }

    Ok(())
}

fn invalid_choreography(msg: &str) -> Error {
    Error::Config(ConfigError::InvalidChoreography(
        heapless::String::try_from(msg).unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Degrees;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ChairConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_gear_ratio() {
        let mut config = ChairConfig::default();
        config.drive.gear_ratio = -1.0;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidGearRatio(_)))
        ));
    }

    #[test]
    fn test_inverted_axis_range() {
        let mut config = ChairConfig::default();
        config.axes.roll.min = Degrees(10.0);
        config.axes.roll.max = Degrees(-10.0);

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidAxisLimits { axis: Axis::Roll, .. }))
        ));
    }

    #[test]
    fn test_zero_min_speed() {
        let mut config = ChairConfig::default();
        config.speed.min_speed = 0.0;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidSpeedRange { .. }))
        ));
    }

    #[test]
    fn test_bad_fraction() {
        let mut config = ChairConfig::default();
        config.choreography.gentle_dip.fraction = 1.5;

        assert!(validate_config(&config).is_err());
    }
}
