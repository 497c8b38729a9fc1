// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::create_test_persistence;
use crate::{AttendanceData, AttendanceFilter, Persistence, PersistenceError};

fn log(persistence: &mut Persistence, reg_no: &str, timestamp: &str, department: &str) -> i64 {
    persistence
        .log_attendance(
            "Test Student",
            reg_no,
            timestamp,
            "Present",
            Some(department),
            Some("2024"),
        )
        .unwrap()
}

#[test]
fn test_log_and_list_attendance() {
    let mut persistence: Persistence = create_test_persistence();

    let log_id: i64 = log(
        &mut persistence,
        "CS2024-001",
        "2026-03-02 09:05:07",
        "Computer Science",
    );
    assert!(log_id > 0);

    let rows: Vec<AttendanceData> = persistence
        .list_attendance(&AttendanceFilter::default())
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].reg_no, "CS2024-001");
    assert_eq!(rows[0].status, "Present");
    assert_eq!(rows[0].timestamp, "2026-03-02 09:05:07");
}

#[test]
fn test_list_attendance_is_newest_first() {
    let mut persistence: Persistence = create_test_persistence();

    let _a: i64 = log(
        &mut persistence,
        "CS2024-001",
        "2026-03-01 09:00:00",
        "Computer Science",
    );
    let _b: i64 = log(
        &mut persistence,
        "CS2024-002",
        "2026-03-02 09:00:00",
        "Computer Science",
    );

    let rows: Vec<AttendanceData> = persistence
        .list_attendance(&AttendanceFilter::default())
        .unwrap();
    assert_eq!(rows[0].reg_no, "CS2024-002");
    assert_eq!(rows[1].reg_no, "CS2024-001");
}

#[test]
fn test_filter_by_date_and_department() {
    let mut persistence: Persistence = create_test_persistence();

    let _a: i64 = log(
        &mut persistence,
        "CS2024-001",
        "2026-03-01 09:00:00",
        "Computer Science",
    );
    let _b: i64 = log(
        &mut persistence,
        "PH2024-001",
        "2026-03-01 10:00:00",
        "Physics",
    );
    let _c: i64 = log(
        &mut persistence,
        "CS2024-001",
        "2026-03-02 09:00:00",
        "Computer Science",
    );

    let march_first: Vec<AttendanceData> = persistence
        .list_attendance(&AttendanceFilter {
            date: Some(String::from("2026-03-01")),
            ..AttendanceFilter::default()
        })
        .unwrap();
    assert_eq!(march_first.len(), 2);

    let physics: Vec<AttendanceData> = persistence
        .list_attendance(&AttendanceFilter {
            department: Some(String::from("Physics")),
            ..AttendanceFilter::default()
        })
        .unwrap();
    assert_eq!(physics.len(), 1);
    assert_eq!(physics[0].reg_no, "PH2024-001");

    let combined: Vec<AttendanceData> = persistence
        .list_attendance(&AttendanceFilter {
            date: Some(String::from("2026-03-01")),
            reg_no: Some(String::from("CS2024-001")),
            ..AttendanceFilter::default()
        })
        .unwrap();
    assert_eq!(combined.len(), 1);
}

#[test]
fn test_pagination_and_count() {
    let mut persistence: Persistence = create_test_persistence();

    for hour in 1..=5 {
        let _id: i64 = log(
            &mut persistence,
            "CS2024-001",
            &format!("2026-03-01 0{hour}:00:00"),
            "Computer Science",
        );
    }

    let filter: AttendanceFilter = AttendanceFilter {
        limit: Some(2),
        offset: Some(2),
        ..AttendanceFilter::default()
    };
    let page: Vec<AttendanceData> = persistence.list_attendance(&filter).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].timestamp, "2026-03-01 03:00:00");

    // The count ignores pagination.
    assert_eq!(persistence.count_attendance(&filter).unwrap(), 5);
}

#[test]
fn test_recent_attendance_orders_by_insertion() {
    let mut persistence: Persistence = create_test_persistence();

    let _a: i64 = log(
        &mut persistence,
        "CS2024-001",
        "2026-03-01 09:00:00",
        "Computer Science",
    );
    let _b: i64 = log(
        &mut persistence,
        "CS2024-002",
        "2026-03-01 09:30:00",
        "Computer Science",
    );

    let recent: Vec<AttendanceData> = persistence.recent_attendance(1).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].reg_no, "CS2024-002");
}

#[test]
fn test_delete_attendance() {
    let mut persistence: Persistence = create_test_persistence();

    let log_id: i64 = log(
        &mut persistence,
        "CS2024-001",
        "2026-03-01 09:00:00",
        "Computer Science",
    );

    persistence.delete_attendance(log_id).unwrap();
    assert!(
        persistence
            .list_attendance(&AttendanceFilter::default())
            .unwrap()
            .is_empty()
    );

    let result: Result<(), PersistenceError> = persistence.delete_attendance(log_id);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
