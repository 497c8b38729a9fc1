// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::request_response::{RegisterUserRequest, UpdateUserRequest};
use crate::tests::{admin_request, create_test_persistence, student_request};
use crate::users;
use crate::users::RegisteredUser;
use campus_roll_persistence::{Persistence, UserData};

#[test]
fn test_register_student_auto_assigns_finger_id() {
    let mut persistence: Persistence = create_test_persistence();

    let first: RegisteredUser =
        users::register_user(&mut persistence, &student_request("Asha Rao", "CS2024-001"))
            .unwrap();
    assert_eq!(first.user.finger_id, Some(1));
    assert_eq!(first.finger_id.unwrap().value(), 1);

    let second: RegisteredUser =
        users::register_user(&mut persistence, &student_request("Binod Iyer", "CS2024-002"))
            .unwrap();
    assert_eq!(second.user.finger_id, Some(2));
}

#[test]
fn test_register_admin_gets_no_finger_id() {
    let mut persistence: Persistence = create_test_persistence();

    let registered: RegisteredUser = users::register_user(
        &mut persistence,
        &admin_request("Admin", "STAFF-001", "a-strong-password"),
    )
    .unwrap();

    assert_eq!(registered.user.finger_id, None);
    assert!(registered.user.password_hash.is_some());
}

#[test]
fn test_register_with_explicit_finger_id() {
    let mut persistence: Persistence = create_test_persistence();

    let request: RegisterUserRequest = RegisterUserRequest {
        finger_id: Some(9),
        ..student_request("Asha Rao", "CS2024-001")
    };
    let registered: RegisteredUser = users::register_user(&mut persistence, &request).unwrap();
    assert_eq!(registered.user.finger_id, Some(9));

    // The next auto-assignment continues past the explicit slot.
    let next: RegisteredUser =
        users::register_user(&mut persistence, &student_request("Binod Iyer", "CS2024-002"))
            .unwrap();
    assert_eq!(next.user.finger_id, Some(10));
}

#[test]
fn test_duplicate_reg_no_is_classified() {
    let mut persistence: Persistence = create_test_persistence();

    let _first: RegisteredUser =
        users::register_user(&mut persistence, &student_request("Asha Rao", "CS2024-001"))
            .unwrap();
    let result: Result<RegisteredUser, ApiError> =
        users::register_user(&mut persistence, &student_request("Binod Iyer", "CS2024-001"));

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_reg_no"
    ));

    // Exactly one row persisted.
    assert_eq!(persistence.list_users(None, None).unwrap().len(), 1);
}

#[test]
fn test_duplicate_finger_id_is_classified() {
    let mut persistence: Persistence = create_test_persistence();

    let request: RegisterUserRequest = RegisterUserRequest {
        finger_id: Some(5),
        ..student_request("Asha Rao", "CS2024-001")
    };
    let _first: RegisteredUser = users::register_user(&mut persistence, &request).unwrap();

    let colliding: RegisterUserRequest = RegisterUserRequest {
        finger_id: Some(5),
        ..student_request("Binod Iyer", "CS2024-002")
    };
    let result: Result<RegisteredUser, ApiError> =
        users::register_user(&mut persistence, &colliding);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_finger_id"
    ));
}

#[test]
fn test_register_rejects_invalid_input() {
    let mut persistence: Persistence = create_test_persistence();

    let bad_role: RegisterUserRequest = RegisterUserRequest {
        role: String::from("janitor"),
        ..student_request("Asha Rao", "CS2024-001")
    };
    assert!(matches!(
        users::register_user(&mut persistence, &bad_role),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "role"
    ));

    let bad_mac: RegisterUserRequest = RegisterUserRequest {
        mac_address: Some(String::from("not-a-mac")),
        ..student_request("Asha Rao", "CS2024-001")
    };
    assert!(matches!(
        users::register_user(&mut persistence, &bad_mac),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "mac_address"
    ));

    let blank_name: RegisterUserRequest = RegisterUserRequest {
        name: String::from("   "),
        ..student_request("Asha Rao", "CS2024-001")
    };
    assert!(matches!(
        users::register_user(&mut persistence, &blank_name),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_update_user_and_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let registered: RegisteredUser =
        users::register_user(&mut persistence, &student_request("Asha Rao", "CS2024-001"))
            .unwrap();

    let update: UpdateUserRequest = UpdateUserRequest {
        name: String::from("Asha R. Rao"),
        role: String::from("student"),
        department: Some(String::from("Physics")),
        batch_year: Some(String::from("2024")),
        mac_address: None,
    };
    let updated: UserData =
        users::update_user(&mut persistence, registered.user.user_id, &update).unwrap();
    assert_eq!(updated.name, "Asha R. Rao");
    assert_eq!(updated.department.as_deref(), Some("Physics"));

    let result: Result<UserData, ApiError> = users::update_user(&mut persistence, 999, &update);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_set_mac_normalizes_format() {
    let mut persistence: Persistence = create_test_persistence();

    let registered: RegisteredUser =
        users::register_user(&mut persistence, &student_request("Asha Rao", "CS2024-001"))
            .unwrap();

    let updated: UserData = users::set_mac_address(
        &mut persistence,
        registered.user.user_id,
        Some("AA-BB-CC-DD-EE-FF"),
    )
    .unwrap();
    assert_eq!(updated.mac_address.as_deref(), Some("aa:bb:cc:dd:ee:ff"));

    let cleared: UserData =
        users::set_mac_address(&mut persistence, registered.user.user_id, None).unwrap();
    assert_eq!(cleared.mac_address, None);
}

#[test]
fn test_clear_fingerprint_and_delete_user() {
    let mut persistence: Persistence = create_test_persistence();

    let registered: RegisteredUser =
        users::register_user(&mut persistence, &student_request("Asha Rao", "CS2024-001"))
            .unwrap();

    let cleared: UserData =
        users::clear_fingerprint(&mut persistence, registered.user.user_id).unwrap();
    assert_eq!(cleared.finger_id, None);

    users::delete_user(&mut persistence, registered.user.user_id).unwrap();
    let result: Result<UserData, ApiError> =
        users::get_user(&mut persistence, registered.user.user_id);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_assign_fingerprint_reassigns_and_auto_assigns() {
    let mut persistence: Persistence = create_test_persistence();

    let registered: RegisteredUser =
        users::register_user(&mut persistence, &student_request("Asha Rao", "CS2024-001"))
            .unwrap();
    assert_eq!(registered.user.finger_id, Some(1));

    // Move the student onto an explicit slot.
    let moved: UserData =
        users::assign_fingerprint(&mut persistence, registered.user.user_id, Some(7)).unwrap();
    assert_eq!(moved.finger_id, Some(7));

    // Re-requesting a user's own slot is a no-op.
    let kept: UserData =
        users::assign_fingerprint(&mut persistence, registered.user.user_id, Some(7)).unwrap();
    assert_eq!(kept.finger_id, Some(7));

    // With no slot requested the next free one past 7 is taken.
    let admin: RegisteredUser =
        users::register_user(&mut persistence, &admin_request("Admin", "STAFF-001", "a-strong-password"))
            .unwrap();
    let assigned: UserData =
        users::assign_fingerprint(&mut persistence, admin.user.user_id, None).unwrap();
    assert_eq!(assigned.finger_id, Some(8));
}

#[test]
fn test_assign_fingerprint_refuses_occupied_slot() {
    let mut persistence: Persistence = create_test_persistence();

    let asha: RegisteredUser =
        users::register_user(&mut persistence, &student_request("Asha Rao", "CS2024-001"))
            .unwrap();
    let binod: RegisteredUser =
        users::register_user(&mut persistence, &student_request("Binod Iyer", "CS2024-002"))
            .unwrap();
    assert_eq!(asha.user.finger_id, Some(1));

    let result: Result<UserData, ApiError> =
        users::assign_fingerprint(&mut persistence, binod.user.user_id, Some(1));
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_finger_id"
    ));

    let result: Result<UserData, ApiError> = users::assign_fingerprint(&mut persistence, 999, None);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
