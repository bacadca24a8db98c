use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Device position attached to clock actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Pick the coordinates to send: explicit flags first, then the configured position.
    /// Flags outside the valid ranges are an error, never a silent fallback.
    pub fn resolve(
        lat: Option<f64>,
        lon: Option<f64>,
        configured: Option<Coordinates>,
    ) -> AppResult<Option<Coordinates>> {
        match (lat, lon) {
            (Some(la), Some(lo)) => {
                if !(-90.0..=90.0).contains(&la) {
                    return Err(AppError::InvalidCoordinates(format!(
                        "latitude {la} must be within ±90"
                    )));
                }
                if !(-180.0..=180.0).contains(&lo) {
                    return Err(AppError::InvalidCoordinates(format!(
                        "longitude {lo} must be within ±180"
                    )));
                }
                Ok(Coordinates::new(la, lo))
            }
            _ => Ok(configured),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(Coordinates::new(91.0, 0.0).is_none());
        assert!(Coordinates::new(0.0, -181.0).is_none());
        assert!(Coordinates::new(-18.91, -48.18).is_some());
    }

    #[test]
    fn flags_take_precedence_over_config() {
        let cfg = Coordinates::new(1.0, 2.0);
        assert_eq!(
            Coordinates::resolve(Some(3.0), Some(4.0), cfg).unwrap(),
            Coordinates::new(3.0, 4.0)
        );
        // a single flag is not a position
        assert_eq!(Coordinates::resolve(Some(3.0), None, cfg).unwrap(), cfg);
        assert_eq!(Coordinates::resolve(None, None, None).unwrap(), None);
    }

    #[test]
    fn out_of_range_flags_do_not_fall_back_to_config() {
        let cfg = Coordinates::new(1.0, 2.0);
        match Coordinates::resolve(Some(91.0), Some(0.0), cfg) {
            Err(AppError::InvalidCoordinates(m)) => assert!(m.contains("latitude")),
            other => panic!("unexpected: {other:?}"),
        }
        match Coordinates::resolve(Some(0.0), Some(500.0), None) {
            Err(AppError::InvalidCoordinates(m)) => assert!(m.contains("longitude")),
            other => panic!("unexpected: {other:?}"),
        }
        // the bounds themselves are valid
        assert!(Coordinates::resolve(Some(-90.0), Some(180.0), None).unwrap().is_some());
    }
}
