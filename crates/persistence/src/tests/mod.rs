// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod attendance_tests;
mod stats_tests;
mod user_tests;

use crate::{NewUser, Persistence};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn new_student(name: &str, reg_no: &str, finger_id: Option<i64>) -> NewUser {
    NewUser {
        name: String::from(name),
        reg_no: String::from(reg_no),
        role: String::from("student"),
        department: Some(String::from("Computer Science")),
        batch_year: Some(String::from("2024")),
        finger_id,
        mac_address: None,
        password_hash: None,
        photo_path: None,
    }
}

pub fn new_admin(name: &str, reg_no: &str) -> NewUser {
    NewUser {
        name: String::from(name),
        reg_no: String::from(reg_no),
        role: String::from("admin"),
        department: None,
        batch_year: None,
        finger_id: None,
        mac_address: None,
        password_hash: Some(String::from("$2b$12$test-hash")),
        photo_path: None,
    }
}
