//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Interpret coordinates as sent by a client.
    ///
    /// Clients send `0` (or nothing) for a coordinate they could not
    /// determine, so a pair is only taken when both values are present and
    /// non-zero. Anything else means "resolve from the address".
    pub fn from_client(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some(Self::new(lat, lng)),
            _ => None,
        }
    }

    /// Both values lie within the WGS84 ranges.
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}
