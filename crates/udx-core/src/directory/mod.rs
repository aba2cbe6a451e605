//! Typed gateway to the user-management service.
//!
//! One client, five operations plus login. Failures are normalized into
//! [`DirectoryError`]; inputs are validated locally before anything touches
//! the network.

mod client;
mod error;
mod types;
mod validate;

pub use client::{DEFAULT_BASE_URL, DirectoryClient, DirectoryConfig};
pub use error::DirectoryError;
pub use types::{LoginResponse, UserRecord};
pub use validate::{validate_phone, validate_required};
