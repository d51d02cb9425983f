//! Integration tests for estate-admin
//!
//! These run the real SeaORM store on in-memory SQLite, no mocks.

pub mod auth_flow_tests;
pub mod config_validation_tests;
pub mod database_tests;
pub mod http_tests;
pub mod management_tests;
