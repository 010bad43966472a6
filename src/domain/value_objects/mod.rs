//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **SubmissionId**: `PN` + `yyMMddHHmmss` application identifier
//! - **Coordinates**: latitude/longitude pair
//! - **BusinessHours**: sparse weekday → hours mapping

mod business_hours;
mod coordinates;
mod submission_id;

pub use business_hours::*;
pub use coordinates::*;
pub use submission_id::*;
