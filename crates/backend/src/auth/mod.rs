//! Authentication module for username/password accounts with JWT sessions.
//!
//! This module provides:
//! - Argon2 password hashing
//! - JWT token creation and validation
//! - signup/signin/signout handlers
//! - `require_auth` middleware for protecting routes

mod handlers;
mod jwt;
mod middleware;
mod password;
pub mod types;

pub use handlers::{me, signin, signout, signup};
pub use middleware::{build_auth_cookie, clear_auth_cookie, require_auth};
