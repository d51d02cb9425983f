//! Session tokens
//!
//! HS256-signed JWTs carrying the admin identity. Verification is purely
//! cryptographic and never touches the store; there is no revocation list, so
//! expiry is the only way a token stops being valid.

mod handler;
pub mod types;
mod utils;


pub use types::{Claims, JwtHandler, TokenIdentity};
