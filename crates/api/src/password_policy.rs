// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! Students are tracked for attendance only and never log in, so they carry
//! no password. Every other role must set one at registration time.

use campus_roll_domain::Role;
use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// The role requires a password but none was supplied.
    #[error("Role '{role}' requires a password")]
    Required { role: String },

    /// A password was supplied for a role that cannot log in.
    #[error("Role '{role}' cannot log in and must not have a password")]
    NotAllowed { role: String },

    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    /// Validates a password for a role being registered.
    ///
    /// # Arguments
    ///
    /// * `password` - The plain-text password, if one was supplied
    /// * `role` - The role being registered
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` if the password does not meet policy
    /// requirements for the role.
    pub fn validate(
        &self,
        password: Option<&str>,
        role: Role,
    ) -> Result<(), PasswordPolicyError> {
        match password {
            None => {
                if role.can_log_in() {
                    return Err(PasswordPolicyError::Required {
                        role: role.to_string(),
                    });
                }
                Ok(())
            }
            Some(password) => {
                if !role.can_log_in() {
                    return Err(PasswordPolicyError::NotAllowed {
                        role: role.to_string(),
                    });
                }
                if password.len() < self.min_length {
                    return Err(PasswordPolicyError::TooShort {
                        min_length: self.min_length,
                    });
                }
                Ok(())
            }
        }
    }
}
