//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **PartnershipService**: Partnership application intake and lookup

pub mod partnership_service;

pub use partnership_service::{
    CreatePartnershipDto, PartnershipError, PartnershipService, PartnershipServiceImpl,
    RegisterPartnershipDto,
};
