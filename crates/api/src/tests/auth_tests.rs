// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::{AuthenticatedUser, AuthenticationService, AuthorizationService};
use crate::error::AuthError;
use crate::tests::{admin_request, create_test_persistence, student_request};
use crate::users;
use campus_roll_domain::{Role, format_timestamp};
use campus_roll_persistence::Persistence;
use time::{Duration, OffsetDateTime};

#[test]
fn test_login_and_validate_session() {
    let mut persistence: Persistence = create_test_persistence();
    users::register_user(
        &mut persistence,
        &admin_request("Admin", "STAFF-001", "a-strong-password"),
    )
    .unwrap();

    let (token, user): (String, AuthenticatedUser) =
        AuthenticationService::login(&mut persistence, "Admin", "a-strong-password").unwrap();
    assert_eq!(user.name, "Admin");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(token.len(), 64);

    let validated: AuthenticatedUser =
        AuthenticationService::validate_session(&mut persistence, &token).unwrap();
    assert_eq!(validated.user_id, user.user_id);
}

#[test]
fn test_login_rejects_wrong_password() {
    let mut persistence: Persistence = create_test_persistence();
    users::register_user(
        &mut persistence,
        &admin_request("Admin", "STAFF-001", "a-strong-password"),
    )
    .unwrap();

    let result = AuthenticationService::login(&mut persistence, "Admin", "wrong-password");
    assert_eq!(
        result.unwrap_err(),
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid username or password"),
        }
    );
}

#[test]
fn test_login_unknown_user_matches_wrong_password_reason() {
    let mut persistence: Persistence = create_test_persistence();

    let result = AuthenticationService::login(&mut persistence, "Nobody", "whatever");
    assert_eq!(
        result.unwrap_err(),
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid username or password"),
        }
    );
}

#[test]
fn test_students_cannot_log_in() {
    let mut persistence: Persistence = create_test_persistence();
    users::register_user(&mut persistence, &student_request("Asha Rao", "CS2024-001")).unwrap();

    let result = AuthenticationService::login(&mut persistence, "Asha Rao", "anything");
    assert_eq!(
        result.unwrap_err(),
        AuthError::AuthenticationFailed {
            reason: String::from("This account cannot log in"),
        }
    );
}

#[test]
fn test_expired_session_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let registered = users::register_user(
        &mut persistence,
        &admin_request("Admin", "STAFF-001", "a-strong-password"),
    )
    .unwrap();

    let expired_at: String = format_timestamp(OffsetDateTime::now_utc() - Duration::hours(1));
    persistence
        .create_session(registered.user.user_id, "stale-token", &expired_at)
        .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, "stale-token");
    assert_eq!(
        result.unwrap_err(),
        AuthError::AuthenticationFailed {
            reason: String::from("Session expired"),
        }
    );
}

#[test]
fn test_logout_invalidates_session() {
    let mut persistence: Persistence = create_test_persistence();
    users::register_user(
        &mut persistence,
        &admin_request("Admin", "STAFF-001", "a-strong-password"),
    )
    .unwrap();

    let (token, _user) =
        AuthenticationService::login(&mut persistence, "Admin", "a-strong-password").unwrap();
    AuthenticationService::logout(&mut persistence, &token).unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, &token);
    assert_eq!(
        result.unwrap_err(),
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid session token"),
        }
    );
}

#[test]
fn test_admin_only_actions_require_admin() {
    let admin: AuthenticatedUser = AuthenticatedUser {
        user_id: 1,
        name: String::from("Admin"),
        role: Role::Admin,
    };
    let staff: AuthenticatedUser = AuthenticatedUser {
        user_id: 2,
        name: String::from("Staff"),
        role: Role::Staff,
    };

    assert!(AuthorizationService::authorize_register_user(&admin).is_ok());
    assert!(AuthorizationService::authorize_manage_enrollment(&admin).is_ok());
    assert!(AuthorizationService::authorize_manage_departments(&admin).is_ok());
    assert!(AuthorizationService::authorize_manage_users(&admin).is_ok());

    assert_eq!(
        AuthorizationService::authorize_register_user(&staff).unwrap_err(),
        AuthError::Unauthorized {
            action: String::from("register_user"),
            required_role: String::from("admin"),
        }
    );
    assert!(AuthorizationService::authorize_manage_enrollment(&staff).is_err());
}

#[test]
fn test_any_login_role_can_view_records() {
    for role in [Role::Admin, Role::Staff, Role::Hod] {
        let user: AuthenticatedUser = AuthenticatedUser {
            user_id: 1,
            name: String::from("Viewer"),
            role,
        };
        assert!(AuthorizationService::authorize_view_records(&user).is_ok());
        assert!(AuthorizationService::authorize_delete_attendance(&user).is_ok());
    }

    let student: AuthenticatedUser = AuthenticatedUser {
        user_id: 2,
        name: String::from("Student"),
        role: Role::Student,
    };
    assert!(AuthorizationService::authorize_view_records(&student).is_err());
}

#[test]
fn test_login_prunes_expired_sessions() {
    let mut persistence: Persistence = create_test_persistence();
    let registered = users::register_user(
        &mut persistence,
        &admin_request("Admin", "STAFF-001", "a-strong-password"),
    )
    .unwrap();

    let expired_at: String = format_timestamp(OffsetDateTime::now_utc() - Duration::hours(1));
    persistence
        .create_session(registered.user.user_id, "stale-token", &expired_at)
        .unwrap();

    let (token, _user) =
        AuthenticationService::login(&mut persistence, "Admin", "a-strong-password").unwrap();

    // The stale row is gone; the fresh session stands.
    assert!(persistence.get_session_by_token("stale-token").unwrap().is_none());
    assert!(persistence.get_session_by_token(&token).unwrap().is_some());
}
