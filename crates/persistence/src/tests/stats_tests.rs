// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_persistence, new_admin, new_student};
use crate::{AttendanceStats, MonthlyAttendance, Persistence, StudentAttendanceTotals};

fn log(persistence: &mut Persistence, name: &str, reg_no: &str, timestamp: &str) {
    let _id: i64 = persistence
        .log_attendance(
            name,
            reg_no,
            timestamp,
            "Present",
            Some("Computer Science"),
            Some("2024"),
        )
        .unwrap();
}

#[test]
fn test_attendance_stats_today_and_week() {
    let mut persistence: Persistence = create_test_persistence();

    let _asha: i64 = persistence
        .create_user(&new_student("Asha", "CS2024-001", Some(1)))
        .unwrap();
    let _ravi: i64 = persistence
        .create_user(&new_student("Ravi", "CS2024-002", Some(2)))
        .unwrap();

    // Two marks today (one student twice), one the day before, one outside
    // the week window.
    log(&mut persistence, "Asha", "CS2024-001", "2026-03-08 09:00:00");
    log(&mut persistence, "Asha", "CS2024-001", "2026-03-08 14:00:00");
    log(&mut persistence, "Ravi", "CS2024-002", "2026-03-07 09:00:00");
    log(&mut persistence, "Ravi", "CS2024-002", "2026-02-20 09:00:00");

    let stats: AttendanceStats = persistence
        .attendance_stats("2026-03-08", "2026-03-01")
        .unwrap();

    assert_eq!(stats.today_count, 2);
    assert_eq!(stats.unique_students, 1);

    assert_eq!(stats.daily.len(), 2);
    assert_eq!(stats.daily[0].date, "2026-03-07");
    assert_eq!(stats.daily[0].count, 1);
    assert_eq!(stats.daily[1].date, "2026-03-08");
    assert_eq!(stats.daily[1].count, 2);
}

#[test]
fn test_attendance_stats_role_counts_cover_absent_roles() {
    let mut persistence: Persistence = create_test_persistence();

    let _admin: i64 = persistence.create_user(&new_admin("Admin", "STAFF-001")).unwrap();
    let _asha: i64 = persistence
        .create_user(&new_student("Asha", "CS2024-001", Some(1)))
        .unwrap();

    log(&mut persistence, "Asha", "CS2024-001", "2026-03-08 09:00:00");

    let stats: AttendanceStats = persistence
        .attendance_stats("2026-03-08", "2026-03-01")
        .unwrap();

    // Roles with no marks today still appear, with a zero count.
    assert_eq!(stats.by_role.len(), 2);
    assert_eq!(stats.by_role[0].role, "admin");
    assert_eq!(stats.by_role[0].count, 0);
    assert_eq!(stats.by_role[1].role, "student");
    assert_eq!(stats.by_role[1].count, 1);
}

#[test]
fn test_attendance_stats_top_performers_ranked_by_volume() {
    let mut persistence: Persistence = create_test_persistence();

    let _admin: i64 = persistence.create_user(&new_admin("Admin", "STAFF-001")).unwrap();
    let _asha: i64 = persistence
        .create_user(&new_student("Asha", "CS2024-001", Some(1)))
        .unwrap();
    let _ravi: i64 = persistence
        .create_user(&new_student("Ravi", "CS2024-002", Some(2)))
        .unwrap();

    log(&mut persistence, "Ravi", "CS2024-002", "2026-03-07 09:00:00");
    log(&mut persistence, "Ravi", "CS2024-002", "2026-03-08 09:00:00");
    log(&mut persistence, "Asha", "CS2024-001", "2026-03-08 09:30:00");

    let stats: AttendanceStats = persistence
        .attendance_stats("2026-03-08", "2026-03-01")
        .unwrap();

    // Students only; staff never rank.
    assert_eq!(stats.top_performers.len(), 2);
    assert_eq!(stats.top_performers[0].reg_no, "CS2024-002");
    assert_eq!(stats.top_performers[0].count, 2);
    assert_eq!(stats.top_performers[1].reg_no, "CS2024-001");
    assert_eq!(stats.top_performers[1].count, 1);
}

#[test]
fn test_monthly_trends_bucket_by_month() {
    let mut persistence: Persistence = create_test_persistence();

    log(&mut persistence, "Asha", "CS2024-001", "2026-01-15 09:00:00");
    log(&mut persistence, "Asha", "CS2024-001", "2026-02-10 09:00:00");
    log(&mut persistence, "Ravi", "CS2024-002", "2026-02-11 09:00:00");
    // Before the cutoff; must not appear.
    log(&mut persistence, "Asha", "CS2024-001", "2025-11-01 09:00:00");

    let trends: Vec<MonthlyAttendance> = persistence.monthly_trends("2026-01-01").unwrap();

    assert_eq!(trends.len(), 2);
    assert_eq!(trends[0].month, "2026-01");
    assert_eq!(trends[0].count, 1);
    assert_eq!(trends[0].unique_students, 1);
    assert_eq!(trends[1].month, "2026-02");
    assert_eq!(trends[1].count, 2);
    assert_eq!(trends[1].unique_students, 2);
}

#[test]
fn test_student_attendance_totals_windows() {
    let mut persistence: Persistence = create_test_persistence();

    log(&mut persistence, "Asha", "CS2024-001", "2026-03-08 09:00:00");
    log(&mut persistence, "Asha", "CS2024-001", "2026-03-05 09:00:00");
    log(&mut persistence, "Asha", "CS2024-001", "2026-02-20 09:00:00");
    log(&mut persistence, "Asha", "CS2024-001", "2025-12-01 09:00:00");
    // Another student's marks never bleed in.
    log(&mut persistence, "Ravi", "CS2024-002", "2026-03-08 10:00:00");

    let totals: StudentAttendanceTotals = persistence
        .student_attendance_totals("CS2024-001", "2026-03-08", "2026-03-01", "2026-02-06")
        .unwrap();

    assert_eq!(totals.total, 4);
    assert_eq!(totals.today, 1);
    assert_eq!(totals.this_week, 2);
    assert_eq!(totals.this_month, 3);
}
