//! Tests for the centralized configuration constants.

use super::*;

/// Ensures default settings pass their own validation.
///
/// # Examples
/// ```
/// use config::constants::EngineSettings;
/// let settings = EngineSettings::default();
/// assert!(settings.full_fog_distance > settings.min_fog_distance);
/// ```
#[test]
fn default_settings_are_valid() {
    let d = EngineSettings::default();
    let rebuilt = EngineSettings::new(
        d.perspective_k,
        d.near_z,
        d.far_z,
        d.min_fog_distance,
        d.full_fog_distance,
        d.worker_count,
    );
    assert_eq!(rebuilt, Ok(d));
}

/// Validates the builder rejects invalid values.
///
/// # Examples
/// ```
/// use config::constants::EngineSettings;
/// assert!(EngineSettings::new(0.5, 1.0, 0.0, 0.0, 10.0, 1).is_err());
/// ```
#[test]
fn new_validates_inputs() {
    assert_eq!(
        EngineSettings::new(0.5, 1.0, 0.0, 0.0, 10.0, 1).unwrap_err(),
        ConfigError::InvalidPerspective(0.5)
    );
    assert_eq!(
        EngineSettings::new(10.0, 1.0, 0.0, 50.0, 50.0, 1).unwrap_err(),
        ConfigError::InvalidFogRange { min: 50.0, full: 50.0 }
    );
    assert_eq!(
        EngineSettings::new(10.0, 1.0, 0.0, 0.0, 50.0, 0).unwrap_err(),
        ConfigError::InvalidWorkerCount(0)
    );
}

#[test]
fn nan_perspective_is_rejected() {
    assert!(matches!(
        EngineSettings::new(f32::NAN, 1.0, 0.0, 0.0, 10.0, 1),
        Err(ConfigError::InvalidPerspective(_))
    ));
}

#[test]
fn error_messages_name_the_field() {
    let err = ConfigError::InvalidWorkerCount(0);
    assert!(err.to_string().contains("worker_count"));
    let err = ConfigError::InvalidFogRange { min: 5.0, full: 1.0 };
    assert!(err.to_string().contains("full_fog_distance"));
}
