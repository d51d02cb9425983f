//! Configuration validation
//!
//! - `trait_def`: the `Validate` trait
//! - `server_validators`: server and CORS checks
//! - `auth_validators`: session, reset and storage checks
//! - `tests`: test suite for all validators

mod auth_validators;
mod server_validators;
mod trait_def;

pub use trait_def::Validate;
