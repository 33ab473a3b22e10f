//! Per-run game settings
//!
//! Loaded from a JSON document by the host. Missing keys fall back to the
//! defaults, so `{}` is a valid settings file.

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::{Dimension, SimError};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Play-field width in pixels
    pub field_width: f32,
    /// Play-field height in pixels
    pub field_height: f32,

    // === Rules ===
    /// Lives at the start of a game
    pub starting_lives: u32,
    /// An extra life is granted every time the score passes a multiple of this
    pub extra_life_threshold: u32,
    /// Asteroid belt size is this plus the level number
    pub belt_base: u32,
    /// Alien salvo cap is this plus the level number
    pub alien_salvo_base: u32,

    // === Randomness ===
    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            starting_lives: 3,
            extra_life_threshold: 10_000,
            belt_base: 3,
            alien_salvo_base: 3,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)?;
        if let Err(e) = settings.validate() {
            log::warn!("Rejected settings: {e}");
            return Err(e);
        }
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Same settings with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        let field_ok = |v: f32| v.is_finite() && v > 0.0;
        if !field_ok(self.field_width) || !field_ok(self.field_height) {
            return Err(SimError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.starting_lives == 0 {
            return Err(SimError::NoStartingLives);
        }
        if self.extra_life_threshold == 0 {
            return Err(SimError::ZeroExtraLifeThreshold);
        }
        Ok(())
    }

    pub fn field(&self) -> Dimension {
        Dimension::new(self.field_width, self.field_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let settings = Settings::from_json("{}").expect("empty object is valid");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_document() {
        let settings = Settings::from_json(r#"{"starting_lives": 5, "seed": 9}"#)
            .expect("partial settings are valid");
        assert_eq!(settings.starting_lives, 5);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.belt_base, 3);
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings::default().with_seed(77);
        let json = settings.to_json().expect("settings serialize");
        assert_eq!(Settings::from_json(&json).expect("round trip parses"), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{"field_width": 0.0}"#),
            Err(SimError::InvalidField { .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{"starting_lives": 0}"#),
            Err(SimError::NoStartingLives)
        ));
        assert!(matches!(
            Settings::from_json(r#"{"extra_life_threshold": 0}"#),
            Err(SimError::ZeroExtraLifeThreshold)
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SimError::Parse(_))
        ));
    }
}
