// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.

use campus_roll_domain::{Role, format_timestamp, parse_timestamp};
use campus_roll_persistence::{Persistence, SessionData, UserData};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::error::AuthError;

/// An authenticated user with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's internal identifier.
    pub user_id: i64,
    /// The user's display name.
    pub name: String,
    /// The role assigned to this user.
    pub role: Role,
}

/// Authentication service for login, session validation, and logout.
pub struct AuthenticationService;

impl AuthenticationService {
    /// How long a session remains valid after login.
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a user by name and password and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `username` - The login name
    /// * `password` - The plain-text password
    ///
    /// # Returns
    ///
    /// The session token and the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown, has no login, the password
    /// does not match, or the session cannot be created. The reason strings
    /// for unknown users and wrong passwords are identical so login probing
    /// reveals nothing.
    pub fn login(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedUser), AuthError> {
        let user: UserData = persistence
            .get_user_by_name(username)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid username or password"),
            })?;

        let role: Role = Self::parse_role(&user.role)?;
        if !role.can_log_in() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("This account cannot log in"),
            });
        }

        let password_hash: &str =
            user.password_hash
                .as_deref()
                .ok_or_else(|| AuthError::AuthenticationFailed {
                    reason: String::from("Invalid username or password"),
                })?;

        let verified: bool =
            bcrypt::verify(password, password_hash).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Password verification error: {e}"),
            })?;
        if !verified {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid username or password"),
            });
        }

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let pruned: usize = persistence
            .prune_expired_sessions(&format_timestamp(now))
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to prune sessions: {e}"),
            })?;
        if pruned > 0 {
            debug!("Pruned {pruned} expired session(s)");
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: String = format_timestamp(now + Self::DEFAULT_SESSION_EXPIRATION);

        persistence
            .create_session(user.user_id, &session_token, &expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        info!("User '{}' logged in", user.name);

        let authenticated: AuthenticatedUser = AuthenticatedUser {
            user_id: user.user_id,
            name: user.name,
            role,
        };

        Ok((session_token, authenticated))
    }

    /// Validates a session token and refreshes its activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown, the session has expired,
    /// or the user behind it no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            parse_timestamp(&session.expires_at).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            debug!("Rejected expired session");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        let role: Role = Self::parse_role(&user.role)?;

        persistence
            .touch_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to refresh session: {e}"),
            })?;

        Ok(AuthenticatedUser {
            user_id: user.user_id,
            name: user.name,
            role,
        })
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist or cannot be deleted.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    fn parse_role(role: &str) -> Result<Role, AuthError> {
        role.parse()
            .map_err(|_| AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {role}"),
            })
    }

    /// Generates an unguessable session token.
    fn generate_session_token() -> String {
        format!(
            "{:016x}{:016x}{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a user is authorized to register users.
    ///
    /// Only admins may register users.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the admin role.
    pub fn authorize_register_user(user: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require_admin(user, "register_user")
    }

    /// Checks if a user is authorized to control fingerprint enrollment.
    ///
    /// Only admins may start or cancel enrollments.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the admin role.
    pub fn authorize_manage_enrollment(user: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require_admin(user, "manage_enrollment")
    }

    /// Checks if a user is authorized to manage departments.
    ///
    /// Only admins may create, update, or delete departments.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the admin role.
    pub fn authorize_manage_departments(user: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require_admin(user, "manage_departments")
    }

    /// Checks if a user is authorized to edit or delete users.
    ///
    /// Only admins may modify registrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the admin role.
    pub fn authorize_manage_users(user: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require_admin(user, "manage_users")
    }

    /// Checks if a user is authorized to browse attendance and dashboards.
    ///
    /// Any role that can log in may view records.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot log in (students never reach
    /// this point, but the check keeps the invariant explicit).
    pub fn authorize_view_records(user: &AuthenticatedUser) -> Result<(), AuthError> {
        if user.role.can_log_in() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("view_records"),
                required_role: String::from("admin, staff, or hod"),
            })
        }
    }

    /// Checks if a user is authorized to delete attendance rows.
    ///
    /// Admins, staff, and heads of department may correct the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot log in.
    pub fn authorize_delete_attendance(user: &AuthenticatedUser) -> Result<(), AuthError> {
        if user.role.can_log_in() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("delete_attendance"),
                required_role: String::from("admin, staff, or hod"),
            })
        }
    }

    fn require_admin(user: &AuthenticatedUser, action: &str) -> Result<(), AuthError> {
        if user.role == Role::Admin {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("admin"),
            })
        }
    }
}
