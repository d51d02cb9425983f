//! Outbound collaborators of the admin backend

pub mod email;

pub use email::{LogMailer, Mailer, PasswordResetNotice};
