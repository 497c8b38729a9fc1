// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod auth_tests;
mod password_tests;
mod user_tests;

use crate::request_response::RegisterUserRequest;
use campus_roll_persistence::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn student_request(name: &str, reg_no: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        name: String::from(name),
        reg_no: String::from(reg_no),
        role: String::from("student"),
        department: Some(String::from("Computer Science")),
        batch_year: Some(String::from("2024")),
        finger_id: None,
        mac_address: None,
        password: None,
        enroll_now: false,
    }
}

pub fn admin_request(name: &str, reg_no: &str, password: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        name: String::from(name),
        reg_no: String::from(reg_no),
        role: String::from("admin"),
        department: None,
        batch_year: None,
        finger_id: None,
        mac_address: None,
        password: Some(String::from(password)),
        enroll_now: false,
    }
}
