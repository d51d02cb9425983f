//! Cryptographic utilities for the admin backend

pub mod keys;
pub mod password;

pub use keys::{generate_jwt_secret, generate_reset_token, hash_reset_token};
pub use password::{hash_password, verify_password};
