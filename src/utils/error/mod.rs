//! Error handling for the admin backend
//!
//! This module defines the closed error taxonomy used throughout the crate
//! and its mapping onto HTTP responses.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::ErrorBody;
pub use types::{AdminError, Result};
