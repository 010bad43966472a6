//! Geocoding Adapters
//!
//! HTTP clients implementing the domain `Geocoder` trait.

pub mod kakao;

pub use kakao::KakaoGeocoder;
