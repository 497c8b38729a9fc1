// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_persistence, new_admin, new_student};
use crate::{Persistence, PersistenceError, UserData, UserUpdate};
use campus_roll_domain::FingerId;

#[test]
fn test_create_and_fetch_user() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = persistence
        .create_user(&new_student("Asha Rao", "CS2024-001", Some(3)))
        .unwrap();

    let user: UserData = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.name, "Asha Rao");
    assert_eq!(user.reg_no, "CS2024-001");
    assert_eq!(user.role, "student");
    assert_eq!(user.finger_id, Some(3));
    assert_eq!(user.department.as_deref(), Some("Computer Science"));
    assert!(!user.created_at.is_empty());
}

#[test]
fn test_duplicate_reg_no_is_a_constraint_violation() {
    let mut persistence: Persistence = create_test_persistence();

    let _first: i64 = persistence
        .create_user(&new_student("Asha Rao", "CS2024-001", None))
        .unwrap();
    let result: Result<i64, PersistenceError> =
        persistence.create_user(&new_student("Binod Iyer", "CS2024-001", None));

    assert!(matches!(
        result,
        Err(PersistenceError::UniqueConstraintViolation(_))
    ));
}

#[test]
fn test_duplicate_finger_id_is_a_constraint_violation() {
    let mut persistence: Persistence = create_test_persistence();

    let _first: i64 = persistence
        .create_user(&new_student("Asha Rao", "CS2024-001", Some(5)))
        .unwrap();
    let result: Result<i64, PersistenceError> =
        persistence.create_user(&new_student("Binod Iyer", "CS2024-002", Some(5)));

    assert!(matches!(
        result,
        Err(PersistenceError::UniqueConstraintViolation(_))
    ));
}

#[test]
fn test_lookup_by_finger_id() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = persistence
        .create_user(&new_student("Asha Rao", "CS2024-001", Some(7)))
        .unwrap();

    let finger_id: FingerId = FingerId::new(7).unwrap();
    let user: UserData = persistence
        .get_user_by_finger_id(finger_id)
        .unwrap()
        .unwrap();
    assert_eq!(user.user_id, user_id);

    let missing: Option<UserData> = persistence
        .get_user_by_finger_id(FingerId::new(99).unwrap())
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_next_finger_id_starts_at_one() {
    let mut persistence: Persistence = create_test_persistence();
    assert_eq!(persistence.next_finger_id().unwrap(), 1);
}

#[test]
fn test_next_finger_id_is_max_plus_one() {
    let mut persistence: Persistence = create_test_persistence();

    let _a: i64 = persistence
        .create_user(&new_student("Asha Rao", "CS2024-001", Some(2)))
        .unwrap();
    let _b: i64 = persistence
        .create_user(&new_student("Binod Iyer", "CS2024-002", Some(9)))
        .unwrap();

    assert_eq!(persistence.next_finger_id().unwrap(), 10);
}

#[test]
fn test_next_finger_id_ignores_users_without_slots() {
    let mut persistence: Persistence = create_test_persistence();

    let _admin: i64 = persistence.create_user(&new_admin("Admin", "STAFF-001")).unwrap();
    assert_eq!(persistence.next_finger_id().unwrap(), 1);
}

#[test]
fn test_list_users_filters_by_role_and_department() {
    let mut persistence: Persistence = create_test_persistence();

    let _a: i64 = persistence
        .create_user(&new_student("Asha Rao", "CS2024-001", None))
        .unwrap();
    let _b: i64 = persistence.create_user(&new_admin("Admin", "STAFF-001")).unwrap();

    let students: Vec<UserData> = persistence.list_users(Some("student"), None).unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].reg_no, "CS2024-001");

    let cs_users: Vec<UserData> = persistence
        .list_users(None, Some("Computer Science"))
        .unwrap();
    assert_eq!(cs_users.len(), 1);

    let all_users: Vec<UserData> = persistence.list_users(None, None).unwrap();
    assert_eq!(all_users.len(), 2);
}

#[test]
fn test_update_user_replaces_profile_fields() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = persistence
        .create_user(&new_student("Asha Rao", "CS2024-001", Some(3)))
        .unwrap();

    persistence
        .update_user(
            user_id,
            &UserUpdate {
                name: String::from("Asha R. Rao"),
                role: String::from("student"),
                department: Some(String::from("Physics")),
                batch_year: None,
                mac_address: None,
            },
        )
        .unwrap();

    let user: UserData = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.name, "Asha R. Rao");
    assert_eq!(user.department.as_deref(), Some("Physics"));
    assert_eq!(user.batch_year, None);
    // The fingerprint slot is not touched by profile updates.
    assert_eq!(user.finger_id, Some(3));
}

#[test]
fn test_update_missing_user_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<(), PersistenceError> = persistence.update_user(
        42,
        &UserUpdate {
            name: String::from("Nobody"),
            role: String::from("student"),
            department: None,
            batch_year: None,
            mac_address: None,
        },
    );

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_set_and_clear_mac_address() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = persistence
        .create_user(&new_student("Asha Rao", "CS2024-001", None))
        .unwrap();

    persistence
        .set_mac_address(user_id, Some("aa:bb:cc:dd:ee:ff"))
        .unwrap();
    let user: UserData = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.mac_address.as_deref(), Some("aa:bb:cc:dd:ee:ff"));

    persistence.set_mac_address(user_id, None).unwrap();
    let user: UserData = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.mac_address, None);
}

#[test]
fn test_set_and_clear_finger_id() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = persistence
        .create_user(&new_student("Asha Rao", "CS2024-001", None))
        .unwrap();

    persistence
        .set_finger_id(user_id, FingerId::new(4).unwrap())
        .unwrap();
    let user: UserData = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.finger_id, Some(4));

    persistence.clear_finger_id(user_id).unwrap();
    let user: UserData = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.finger_id, None);
}

#[test]
fn test_delete_user_removes_row() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = persistence
        .create_user(&new_student("Asha Rao", "CS2024-001", None))
        .unwrap();

    persistence.delete_user(user_id).unwrap();
    assert!(persistence.get_user_by_id(user_id).unwrap().is_none());

    let result: Result<(), PersistenceError> = persistence.delete_user(user_id);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
