//! Construction-time failures
//!
//! Nothing on the tick path returns an error. These only come out of
//! building a [`World`](super::World) from [`Settings`](crate::Settings).

/// Settings the simulation refuses to start with
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    /// Field width or height is not a positive finite number
    #[error("invalid play-field size: {width}x{height}")]
    InvalidField { width: f32, height: f32 },

    /// A game must start with at least one life
    #[error("starting lives must be at least 1")]
    NoStartingLives,

    /// Extra-life threshold of zero would make `score % threshold` meaningless
    #[error("extra-life threshold must be non-zero")]
    ZeroExtraLifeThreshold,

    /// Settings document could not be parsed
    #[error("could not parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_keeps_source() {
        let json_err = serde_json::from_str::<u32>("nope").expect_err("not a number");
        let err = SimError::from(json_err);
        assert!(err.to_string().starts_with("could not parse settings"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_validation_errors_have_no_source() {
        assert!(SimError::NoStartingLives.source().is_none());
        assert_eq!(
            SimError::InvalidField {
                width: 0.0,
                height: 10.0
            }
            .to_string(),
            "invalid play-field size: 0x10"
        );
    }
}
