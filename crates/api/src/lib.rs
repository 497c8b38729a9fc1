// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application services for the Campus Roll attendance system.
//!
//! This crate sits between the HTTP server and the persistence layer. It
//! owns authentication, authorization, input validation, and the explicit
//! translation of domain and persistence errors into the API contract.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

pub mod attendance;
pub mod auth;
pub mod departments;
mod error;
pub mod export;
mod password_policy;
pub mod request_response;
pub mod users;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService, AuthorizationService};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
