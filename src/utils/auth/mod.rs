//! Authentication and security utilities
//!
//! Password hashing and random token helpers shared by the login and reset flows.

pub mod crypto;

pub use crypto::*;
