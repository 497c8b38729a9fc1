// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::password_policy::{PasswordPolicy, PasswordPolicyError};
use crate::request_response::RegisterUserRequest;
use crate::tests::{admin_request, create_test_persistence, student_request};
use crate::users;
use campus_roll_domain::Role;
use campus_roll_persistence::Persistence;

#[test]
fn test_login_roles_require_a_password() {
    let policy: PasswordPolicy = PasswordPolicy::default();

    for role in [Role::Admin, Role::Staff, Role::Hod] {
        assert_eq!(
            policy.validate(None, role).unwrap_err(),
            PasswordPolicyError::Required {
                role: role.to_string(),
            }
        );
        assert!(policy.validate(Some("a-strong-password"), role).is_ok());
    }
}

#[test]
fn test_students_must_not_have_a_password() {
    let policy: PasswordPolicy = PasswordPolicy::default();

    assert!(policy.validate(None, Role::Student).is_ok());
    assert_eq!(
        policy.validate(Some("whatever!"), Role::Student).unwrap_err(),
        PasswordPolicyError::NotAllowed {
            role: String::from("student"),
        }
    );
}

#[test]
fn test_minimum_length_enforced() {
    let policy: PasswordPolicy = PasswordPolicy::default();

    assert_eq!(
        policy.validate(Some("short"), Role::Admin).unwrap_err(),
        PasswordPolicyError::TooShort { min_length: 8 }
    );
    assert!(policy.validate(Some("exactly8"), Role::Admin).is_ok());
}

#[test]
fn test_registration_rejects_policy_violations() {
    let mut persistence: Persistence = create_test_persistence();

    let no_password: RegisterUserRequest = RegisterUserRequest {
        password: None,
        ..admin_request("Admin", "STAFF-001", "unused")
    };
    assert!(matches!(
        users::register_user(&mut persistence, &no_password),
        Err(ApiError::PasswordPolicyViolation { .. })
    ));

    let student_with_password: RegisterUserRequest = RegisterUserRequest {
        password: Some(String::from("a-strong-password")),
        ..student_request("Asha Rao", "CS2024-001")
    };
    assert!(matches!(
        users::register_user(&mut persistence, &student_with_password),
        Err(ApiError::PasswordPolicyViolation { .. })
    ));

    // Nothing persisted on either failure.
    assert!(persistence.list_users(None, None).unwrap().is_empty());
}
