//! Address geocoding contract.

use async_trait::async_trait;

use crate::domain::value_objects::Coordinates;

/// Reasons an address could not be turned into coordinates.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(String),

    #[error("geocoding service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no location found for address")]
    NoMatch,

    #[error("malformed geocoding response: {0}")]
    MalformedResponse(String),

    #[error("address is empty")]
    EmptyAddress,
}

/// Resolves a street address to coordinates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn coordinates_from_address(&self, address: &str) -> Result<Coordinates, GeocodeError>;
}
