//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong
//! to a single entity.
//!
//! ## Services
//!
//! - **Geocoder**: contract for resolving addresses to coordinates
//! - **PhotoPathPolicy**: which stored photo paths are permissible

mod geocoder;
mod photo_path_policy;

pub use geocoder::*;
pub use photo_path_policy::*;
