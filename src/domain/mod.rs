//! Domain entities of the card management service.

pub mod card;
pub mod issuer;
pub mod transaction;
pub mod types;
