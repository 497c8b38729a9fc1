// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use campus_roll::{HardwareState, StatusOutcome};
use campus_roll_api::{
    ApiError, AuthError, AuthenticatedUser, AuthenticationService, AuthorizationService,
    attendance, departments, export, translate_domain_error, users,
};
use campus_roll_api::request_response::{
    AssignFingerprintRequest, AttendanceListResponse, AttendanceQuery, DepartmentRequest,
    EnrollmentStatusResponse, LoginRequest, LoginResponse, ModeResponse, RecentQuery,
    RegisterUserRequest, RegisterUserResponse, SetMacRequest, StatusResponse,
    StudentAttendanceResponse, UpdateDepartmentRequest, UpdateUserRequest, UserResponse,
    VerifyResponse,
};
use campus_roll_domain::{FingerId, format_timestamp};
use campus_roll_persistence::{
    AttendanceData, AttendanceFilter, AttendanceStats, DashboardStats, DepartmentData,
    DepartmentStats, MonthlyAttendance, Persistence, StudentAttendanceTotals, UserData,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

mod session;
mod wake;

use session::SessionUser;

/// Campus Roll Server - HTTP server for the Campus Roll attendance system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Broadcast address for Wake-on-LAN frames
    #[arg(long, default_value = "255.255.255.255")]
    wol_broadcast: String,
}

/// Application state shared across handlers.
///
/// The persistence layer and the hardware state machine are each wrapped in
/// a Mutex to allow safe concurrent access; every hardware transition goes
/// through that lock.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer for users, attendance, departments, sessions.
    persistence: Arc<Mutex<Persistence>>,
    /// The reader-facing state machine: current mode plus enrollment progress.
    hardware: Arc<Mutex<HardwareState>>,
    /// Broadcast address Wake-on-LAN frames are sent to.
    wol_broadcast: String,
}

/// Query parameters for listing users.
#[derive(Debug, Deserialize)]
struct UsersQuery {
    /// Restrict to a role.
    #[serde(default)]
    role: Option<String>,
    /// Restrict to a department.
    #[serde(default)]
    department: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    /// A 400 response with the given message.
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match &err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { rule, .. } => Self {
                // Duplicate identifiers are conflicts; other rule breaches
                // are semantic errors.
                status: if rule.starts_with("unique_") {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                },
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::PasswordPolicyViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        ApiError::from(err).into()
    }
}

/// Pulls a required integer field out of a device push body.
///
/// The reader firmware posts loosely-shaped JSON; missing or mis-typed
/// fields are a 400, not a deserialization failure.
fn require_i64_field(body: &Value, field: &str) -> Result<i64, HttpError> {
    body.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| HttpError::bad_request(format!("Missing or invalid '{field}'")))
}

/// Pulls a required string field out of a device push body.
fn require_str_field<'a>(body: &'a Value, field: &str) -> Result<&'a str, HttpError> {
    body.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| HttpError::bad_request(format!("Missing or invalid '{field}'")))
}

/// The current date in the system's `YYYY-MM-DD` convention.
fn today() -> String {
    let now: String = format_timestamp(OffsetDateTime::now_utc());
    now.get(..10).unwrap_or(&now).to_string()
}

/// The calendar day `days` days back, in `YYYY-MM-DD`.
fn days_ago(days: i64) -> String {
    let then: String = format_timestamp(OffsetDateTime::now_utc() - Duration::days(days));
    then.get(..10).unwrap_or(&then).to_string()
}

/// Handler for GET `/hardware/mode` endpoint.
///
/// Polled by the fingerprint reader; unauthenticated because the device
/// carries no credentials.
async fn handle_hardware_mode(AxumState(app_state): AxumState<AppState>) -> Json<ModeResponse> {
    let hardware = app_state.hardware.lock().await;
    let response: ModeResponse = hardware.mode().into();
    drop(hardware);

    Json(response)
}

/// Handler for POST `/hardware/enrollment_status` endpoint.
///
/// Receives enrollment progress pushes from the reader. Terminal statuses
/// complete the enrollment only when the pushed finger identifier matches
/// the active one; a mismatched terminal push is rejected with 409 and
/// leaves the state untouched.
async fn handle_push_enrollment_status(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<StatusResponse>, HttpError> {
    let raw_finger_id: i64 = require_i64_field(&body, "finger_id")?;
    let status: &str = require_str_field(&body, "status")?;
    let finger_id: FingerId = FingerId::new(raw_finger_id).map_err(translate_domain_error)?;

    let mut hardware = app_state.hardware.lock().await;
    let outcome: StatusOutcome = hardware.record_status(status, finger_id);
    drop(hardware);

    match outcome {
        StatusOutcome::Updated => Ok(Json(StatusResponse::ok())),
        StatusOutcome::Completed { finger_id, success } => {
            info!(
                finger_id = finger_id.value(),
                success = success,
                "Enrollment completed"
            );
            Ok(Json(StatusResponse::ok()))
        }
        StatusOutcome::Rejected { active } => {
            warn!(
                finger_id = finger_id.value(),
                active = ?active.map(FingerId::value),
                status = %status,
                "Rejected terminal status for non-active enrollment"
            );
            Err(HttpError {
                status: StatusCode::CONFLICT,
                message: format!(
                    "Terminal status '{status}' for finger id {finger_id} does not match the active enrollment"
                ),
            })
        }
    }
}

/// Handler for POST `/hardware/verify` endpoint.
///
/// Receives verification pushes from the reader. The attendance write
/// commits before the Wake-on-LAN attempt; a failed send is reported in
/// the response but never rolls back the record.
async fn handle_verify(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<VerifyResponse>, HttpError> {
    let raw_finger_id: i64 = require_i64_field(&body, "finger_id")?;
    let finger_id: FingerId = FingerId::new(raw_finger_id).map_err(translate_domain_error)?;

    let mut persistence = app_state.persistence.lock().await;
    let outcome = attendance::verify_fingerprint(&mut persistence, finger_id)?;
    drop(persistence);

    let wake: Option<String> = match outcome.wake_target {
        Some(mac) => match wake::send_magic_packet(mac, &app_state.wol_broadcast).await {
            Ok(()) => Some(format!("Wake-on-LAN packet sent to {mac}")),
            Err(e) => {
                warn!(error = %e, mac = %mac, "Wake-on-LAN send failed");
                Some(format!("Wake-on-LAN send failed: {e}"))
            }
        },
        None => None,
    };

    Ok(Json(VerifyResponse {
        status: String::from("success"),
        name: outcome.user.name,
        reg_no: outcome.user.reg_no,
        timestamp: outcome.timestamp,
        wake,
    }))
}

/// Handler for GET `/hardware/enrollment_status` endpoint.
///
/// Polled by the browser while an enrollment is in progress.
async fn handle_poll_enrollment_status(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<EnrollmentStatusResponse>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let hardware = app_state.hardware.lock().await;
    let response: EnrollmentStatusResponse = hardware.enrollment().into();
    drop(hardware);

    Ok(Json(response))
}

/// Handler for POST `/hardware/enroll/{finger_id}` endpoint.
///
/// Activates enrollment for a fingerprint slot. Admin only.
async fn handle_activate_enroll(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(raw_finger_id): Path<i64>,
) -> Result<Json<StatusResponse>, HttpError> {
    AuthorizationService::authorize_manage_enrollment(&user)?;

    let finger_id: FingerId = FingerId::new(raw_finger_id).map_err(translate_domain_error)?;

    let mut hardware = app_state.hardware.lock().await;
    hardware.activate_enroll(finger_id);
    drop(hardware);

    info!(
        finger_id = finger_id.value(),
        by = %user.name,
        "Enrollment activated"
    );

    Ok(Json(StatusResponse::ok()))
}

/// Handler for POST `/hardware/enroll/cancel` endpoint.
///
/// Cancels any enrollment and returns to attendance mode. Admin only.
async fn handle_cancel_enroll(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<StatusResponse>, HttpError> {
    AuthorizationService::authorize_manage_enrollment(&user)?;

    let mut hardware = app_state.hardware.lock().await;
    hardware.cancel_enroll();
    drop(hardware);

    info!(by = %user.name, "Enrollment cancelled");

    Ok(Json(StatusResponse::ok()))
}

/// Handler for POST `/login` endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let (token, user): (String, AuthenticatedUser) =
        AuthenticationService::login(&mut persistence, &req.username, &req.password)
            .map_err(ApiError::from)?;
    drop(persistence);

    Ok(Json(LoginResponse {
        session_token: token,
        user_id: user.user_id,
        name: user.name,
        role: user.role.to_string(),
    }))
}

/// Handler for POST `/logout` endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, token): SessionUser,
) -> Result<Json<StatusResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, &token).map_err(ApiError::from)?;
    drop(persistence);

    info!(name = %user.name, "User logged out");

    Ok(Json(StatusResponse::ok()))
}

/// Handler for POST `/users` endpoint.
///
/// Registers a user; with `enroll_now` set the assigned fingerprint slot
/// is immediately activated for enrollment. Admin only.
async fn handle_register_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<RegisterUserRequest>,
) -> Result<Json<RegisterUserResponse>, HttpError> {
    AuthorizationService::authorize_register_user(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let registered = users::register_user(&mut persistence, &req)?;
    drop(persistence);

    let mut enrollment_started: bool = false;
    if req.enroll_now
        && let Some(finger_id) = registered.finger_id
    {
        let mut hardware = app_state.hardware.lock().await;
        hardware.activate_enroll(finger_id);
        drop(hardware);
        enrollment_started = true;
        info!(
            finger_id = finger_id.value(),
            "Enrollment activated at registration"
        );
    }

    Ok(Json(RegisterUserResponse {
        user: registered.user.into(),
        enrollment_started,
    }))
}

/// Handler for GET `/users` endpoint.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(params): Query<UsersQuery>,
) -> Result<Json<Vec<UserResponse>>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let listed = users::list_users(
        &mut persistence,
        params.role.as_deref(),
        params.department.as_deref(),
    )?;
    drop(persistence);

    Ok(Json(listed.into_iter().map(UserResponse::from).collect()))
}

/// Handler for GET `/users/{id}` endpoint.
async fn handle_get_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let fetched = users::get_user(&mut persistence, user_id)?;
    drop(persistence);

    Ok(Json(fetched.into()))
}

/// Handler for PUT `/users/{id}` endpoint. Admin only.
async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, HttpError> {
    AuthorizationService::authorize_manage_users(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let updated = users::update_user(&mut persistence, user_id, &req)?;
    drop(persistence);

    Ok(Json(updated.into()))
}

/// Handler for DELETE `/users/{id}` endpoint. Admin only.
async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<StatusResponse>, HttpError> {
    AuthorizationService::authorize_manage_users(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    users::delete_user(&mut persistence, user_id)?;
    drop(persistence);

    info!(user_id = user_id, by = %user.name, "User deleted");

    Ok(Json(StatusResponse::ok()))
}

/// Handler for POST `/users/{id}/mac` endpoint.
///
/// Sets or clears a user's Wake-on-LAN address. Admin only.
async fn handle_set_mac(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(user_id): Path<i64>,
    Json(req): Json<SetMacRequest>,
) -> Result<Json<UserResponse>, HttpError> {
    AuthorizationService::authorize_manage_users(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let updated = users::set_mac_address(&mut persistence, user_id, req.mac_address.as_deref())?;
    drop(persistence);

    Ok(Json(updated.into()))
}

/// Handler for DELETE `/users/{id}/fingerprint` endpoint. Admin only.
async fn handle_clear_fingerprint(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, HttpError> {
    AuthorizationService::authorize_manage_users(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let updated = users::clear_fingerprint(&mut persistence, user_id)?;
    drop(persistence);

    Ok(Json(updated.into()))
}

/// Handler for GET `/attendance` endpoint.
///
/// Filterable by date, department, batch year, and registration number;
/// paginated.
async fn handle_list_attendance(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(params): Query<AttendanceQuery>,
) -> Result<Json<AttendanceListResponse>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let (records, total): (Vec<AttendanceData>, i64) =
        attendance::browse_attendance(&mut persistence, &params.to_filter())?;
    drop(persistence);

    Ok(Json(AttendanceListResponse {
        records,
        total,
        page: params.page.unwrap_or(1).max(1),
        per_page: params
            .per_page
            .unwrap_or(AttendanceQuery::DEFAULT_PER_PAGE)
            .max(1),
    }))
}

/// Handler for GET `/attendance/recent` endpoint.
async fn handle_recent_attendance(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(params): Query<RecentQuery>,
) -> Result<Json<Vec<AttendanceData>>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let records: Vec<AttendanceData> =
        attendance::recent_attendance(&mut persistence, params.limit.unwrap_or(10))?;
    drop(persistence);

    Ok(Json(records))
}

/// Handler for DELETE `/attendance/{log_id}` endpoint.
///
/// Admins, staff, and heads of department may correct the log.
async fn handle_delete_attendance(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(log_id): Path<i64>,
) -> Result<Json<StatusResponse>, HttpError> {
    AuthorizationService::authorize_delete_attendance(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    attendance::delete_attendance(&mut persistence, log_id)?;
    drop(persistence);

    info!(log_id = log_id, by = %user.name, "Attendance record deleted");

    Ok(Json(StatusResponse::ok()))
}

/// Handler for GET `/attendance/export` endpoint.
///
/// Streams the filtered attendance log as a CSV download. The same filters
/// as the browse endpoint apply; pagination does not.
async fn handle_export_attendance(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(params): Query<AttendanceQuery>,
) -> Result<Response, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let (records, _total): (Vec<AttendanceData>, i64) =
        attendance::browse_attendance(&mut persistence, &params.to_unpaginated_filter())?;
    drop(persistence);

    let csv: String = export::attendance_csv(&records)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"attendance.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// Handler for POST `/departments` endpoint. Admin only.
async fn handle_create_department(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<DepartmentRequest>,
) -> Result<Json<DepartmentData>, HttpError> {
    AuthorizationService::authorize_manage_departments(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let created: DepartmentData = departments::create_department(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(created))
}

/// Handler for GET `/departments` endpoint.
async fn handle_list_departments(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<Vec<DepartmentData>>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let listed: Vec<DepartmentData> = departments::list_departments(&mut persistence)?;
    drop(persistence);

    Ok(Json(listed))
}

/// Handler for PUT `/departments/{name}` endpoint. Admin only.
async fn handle_update_department(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(name): Path<String>,
    Json(req): Json<UpdateDepartmentRequest>,
) -> Result<Json<DepartmentData>, HttpError> {
    AuthorizationService::authorize_manage_departments(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let updated: DepartmentData = departments::update_department(&mut persistence, &name, &req)?;
    drop(persistence);

    Ok(Json(updated))
}

/// Handler for DELETE `/departments/{name}` endpoint.
///
/// Refused while students remain assigned. Admin only.
async fn handle_delete_department(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(name): Path<String>,
) -> Result<Json<StatusResponse>, HttpError> {
    AuthorizationService::authorize_manage_departments(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    departments::delete_department(&mut persistence, &name)?;
    drop(persistence);

    info!(department = %name, by = %user.name, "Department deleted");

    Ok(Json(StatusResponse::ok()))
}

/// Handler for GET `/departments/{name}/stats` endpoint.
async fn handle_department_stats(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(name): Path<String>,
) -> Result<Json<DepartmentStats>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let today: String = today();

    let mut persistence = app_state.persistence.lock().await;
    let stats: DepartmentStats = departments::department_stats(&mut persistence, &name, &today)?;
    drop(persistence);

    Ok(Json(stats))
}

/// Handler for GET `/stats` endpoint.
///
/// Dashboard counters: total students, total staff, total departments,
/// today's attendance count.
async fn handle_dashboard_stats(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<DashboardStats>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let today: String = today();

    let mut persistence = app_state.persistence.lock().await;
    let stats: DashboardStats = persistence
        .dashboard_stats(&today)
        .map_err(ApiError::from)?;
    drop(persistence);

    Ok(Json(stats))
}

/// Handler for GET `/stats/daily` endpoint.
///
/// Today's totals, per-day volumes over the trailing week, today's
/// role-wise counts, and the top students by all-time volume.
async fn handle_daily_stats(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<AttendanceStats>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let today: String = today();
    let week_ago: String = days_ago(7);

    let mut persistence = app_state.persistence.lock().await;
    let stats: AttendanceStats = persistence
        .attendance_stats(&today, &week_ago)
        .map_err(ApiError::from)?;
    drop(persistence);

    Ok(Json(stats))
}

/// Handler for GET `/stats/trends` endpoint.
///
/// Monthly attendance volumes over the trailing six months.
async fn handle_attendance_trends(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<Vec<MonthlyAttendance>>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let since: String = days_ago(180);

    let mut persistence = app_state.persistence.lock().await;
    let trends: Vec<MonthlyAttendance> = persistence
        .monthly_trends(&since)
        .map_err(ApiError::from)?;
    drop(persistence);

    Ok(Json(trends))
}

/// Handler for GET `/users/{id}/attendance` endpoint.
///
/// A per-student summary: the user, their attendance totals over the
/// standard windows, and their fifty most recent records.
async fn handle_student_attendance(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<StudentAttendanceResponse>, HttpError> {
    AuthorizationService::authorize_view_records(&user)?;

    let today: String = today();
    let week_ago: String = days_ago(7);
    let month_ago: String = days_ago(30);

    let mut persistence = app_state.persistence.lock().await;
    let fetched: UserData = users::get_user(&mut persistence, user_id)?;
    let totals: StudentAttendanceTotals = persistence
        .student_attendance_totals(&fetched.reg_no, &today, &week_ago, &month_ago)
        .map_err(ApiError::from)?;
    let filter: AttendanceFilter = AttendanceFilter {
        reg_no: Some(fetched.reg_no.clone()),
        limit: Some(50),
        ..AttendanceFilter::default()
    };
    let (records, _total): (Vec<AttendanceData>, i64) =
        attendance::browse_attendance(&mut persistence, &filter)?;
    drop(persistence);

    Ok(Json(StudentAttendanceResponse {
        user: fetched.into(),
        totals,
        records,
    }))
}

/// Handler for POST `/users/{id}/fingerprint` endpoint.
///
/// Assigns or reassigns a fingerprint slot; with no slot in the body the
/// next free one is taken. Admin only.
async fn handle_assign_fingerprint(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(user_id): Path<i64>,
    Json(req): Json<AssignFingerprintRequest>,
) -> Result<Json<UserResponse>, HttpError> {
    AuthorizationService::authorize_manage_users(&user)?;

    let mut persistence = app_state.persistence.lock().await;
    let updated = users::assign_fingerprint(&mut persistence, user_id, req.finger_id)?;
    drop(persistence);

    Ok(Json(updated.into()))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/hardware/mode", get(handle_hardware_mode))
        .route(
            "/hardware/enrollment_status",
            post(handle_push_enrollment_status),
        )
        .route(
            "/hardware/enrollment_status",
            get(handle_poll_enrollment_status),
        )
        .route("/hardware/verify", post(handle_verify))
        .route("/hardware/enroll/{finger_id}", post(handle_activate_enroll))
        .route("/hardware/enroll/cancel", post(handle_cancel_enroll))
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/users", post(handle_register_user))
        .route("/users", get(handle_list_users))
        .route("/users/{id}", get(handle_get_user))
        .route("/users/{id}", put(handle_update_user))
        .route("/users/{id}", delete(handle_delete_user))
        .route("/users/{id}/mac", post(handle_set_mac))
        .route("/users/{id}/fingerprint", post(handle_assign_fingerprint))
        .route("/users/{id}/fingerprint", delete(handle_clear_fingerprint))
        .route("/users/{id}/attendance", get(handle_student_attendance))
        .route("/attendance", get(handle_list_attendance))
        .route("/attendance/recent", get(handle_recent_attendance))
        .route("/attendance/export", get(handle_export_attendance))
        .route("/attendance/{log_id}", delete(handle_delete_attendance))
        .route("/departments", post(handle_create_department))
        .route("/departments", get(handle_list_departments))
        .route("/departments/{name}", put(handle_update_department))
        .route("/departments/{name}", delete(handle_delete_department))
        .route("/departments/{name}/stats", get(handle_department_stats))
        .route("/stats", get(handle_dashboard_stats))
        .route("/stats/daily", get(handle_daily_stats))
        .route("/stats/trends", get(handle_attendance_trends))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Campus Roll Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        hardware: Arc::new(Mutex::new(HardwareState::new())),
        wol_broadcast: args.wol_broadcast,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
