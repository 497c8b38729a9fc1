// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User registration and management services.

use campus_roll_domain::{BatchYear, DomainError, FingerId, MacAddress, RegNo, Role};
use campus_roll_persistence::{NewUser, Persistence, UserData, UserUpdate};
use tracing::info;

use crate::error::{ApiError, translate_domain_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{RegisterUserRequest, UpdateUserRequest};

/// The result of registering a user.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    /// The stored user row.
    pub user: UserData,
    /// The fingerprint slot assigned to the user, if any.
    pub finger_id: Option<FingerId>,
}

/// Registers a new user.
///
/// Students are auto-assigned the next free fingerprint slot unless one is
/// supplied; other roles get a slot only when explicitly requested. The
/// password policy is enforced per role before hashing.
///
/// # Errors
///
/// Returns an error on validation failure, duplicate registration number
/// or fingerprint slot, or persistence failure.
pub fn register_user(
    persistence: &mut Persistence,
    request: &RegisterUserRequest,
) -> Result<RegisteredUser, ApiError> {
    let reg_no: RegNo = RegNo::new(&request.reg_no).map_err(translate_domain_error)?;
    let role: Role = request
        .role
        .parse()
        .map_err(translate_domain_error)?;

    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("must not be empty"),
        });
    }

    let batch_year: Option<BatchYear> = match &request.batch_year {
        Some(raw) => Some(BatchYear::new(raw).map_err(translate_domain_error)?),
        None => None,
    };

    let mac_address: Option<MacAddress> = match &request.mac_address {
        Some(raw) => Some(raw.parse().map_err(translate_domain_error)?),
        None => None,
    };

    PasswordPolicy::default().validate(request.password.as_deref(), role)?;

    let password_hash: Option<String> = match &request.password {
        Some(password) => Some(bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
            ApiError::Internal {
                message: format!("Failed to hash password: {e}"),
            }
        })?),
        None => None,
    };

    if persistence.get_user_by_reg_no(reg_no.value())?.is_some() {
        return Err(translate_domain_error(DomainError::DuplicateRegNo {
            reg_no: reg_no.value().to_string(),
        }));
    }

    let finger_id: Option<FingerId> = match request.finger_id {
        Some(raw) => {
            let finger_id: FingerId = FingerId::new(raw).map_err(translate_domain_error)?;
            if persistence.get_user_by_finger_id(finger_id)?.is_some() {
                return Err(translate_domain_error(DomainError::DuplicateFingerId {
                    finger_id: finger_id.value(),
                }));
            }
            Some(finger_id)
        }
        None if role == Role::Student => {
            let next: i64 = persistence.next_finger_id()?;
            Some(FingerId::new(next).map_err(translate_domain_error)?)
        }
        None => None,
    };

    let new_user: NewUser = NewUser {
        name: request.name.trim().to_string(),
        reg_no: reg_no.value().to_string(),
        role: role.to_string(),
        department: request.department.clone(),
        batch_year: batch_year.map(|b| b.value().to_string()),
        finger_id: finger_id.map(FingerId::value),
        mac_address: mac_address.map(|m| m.to_string()),
        password_hash,
        photo_path: None,
    };

    let user_id: i64 = persistence.create_user(&new_user)?;
    let user: UserData = persistence
        .get_user_by_id(user_id)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("User {user_id} missing immediately after creation"),
        })?;

    info!("Registered {} '{}' ({})", role, user.name, user.reg_no);

    Ok(RegisteredUser { user, finger_id })
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no user has the given ID.
pub fn get_user(persistence: &mut Persistence, user_id: i64) -> Result<UserData, ApiError> {
    persistence
        .get_user_by_id(user_id)?
        .ok_or_else(|| translate_domain_error(DomainError::UserNotFound { user_id }))
}

/// Lists users, optionally restricted by role and department.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_users(
    persistence: &mut Persistence,
    role: Option<&str>,
    department: Option<&str>,
) -> Result<Vec<UserData>, ApiError> {
    Ok(persistence.list_users(role, department)?)
}

/// Replaces a user's editable profile fields.
///
/// # Errors
///
/// Returns an error on validation failure or if no user has the given ID.
pub fn update_user(
    persistence: &mut Persistence,
    user_id: i64,
    request: &UpdateUserRequest,
) -> Result<UserData, ApiError> {
    let role: Role = request
        .role
        .parse()
        .map_err(translate_domain_error)?;

    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("must not be empty"),
        });
    }

    let batch_year: Option<BatchYear> = match &request.batch_year {
        Some(raw) => Some(BatchYear::new(raw).map_err(translate_domain_error)?),
        None => None,
    };

    let mac_address: Option<MacAddress> = match &request.mac_address {
        Some(raw) => Some(raw.parse().map_err(translate_domain_error)?),
        None => None,
    };

    let _existing: UserData = get_user(persistence, user_id)?;

    let update: UserUpdate = UserUpdate {
        name: request.name.trim().to_string(),
        role: role.to_string(),
        department: request.department.clone(),
        batch_year: batch_year.map(|b| b.value().to_string()),
        mac_address: mac_address.map(|m| m.to_string()),
    };
    persistence.update_user(user_id, &update)?;

    get_user(persistence, user_id)
}

/// Sets or clears a user's Wake-on-LAN address.
///
/// # Errors
///
/// Returns an error on an invalid address or if no user has the given ID.
pub fn set_mac_address(
    persistence: &mut Persistence,
    user_id: i64,
    mac_address: Option<&str>,
) -> Result<UserData, ApiError> {
    let normalized: Option<String> = match mac_address {
        Some(raw) => {
            let mac: MacAddress = raw.parse().map_err(translate_domain_error)?;
            Some(mac.to_string())
        }
        None => None,
    };

    let _existing: UserData = get_user(persistence, user_id)?;
    persistence.set_mac_address(user_id, normalized.as_deref())?;

    get_user(persistence, user_id)
}

/// Clears a user's fingerprint slot.
///
/// The sensor-side template is removed by the reader on its next
/// enrollment pass; only the mapping is cleared here.
///
/// # Errors
///
/// Returns an error if no user has the given ID.
pub fn clear_fingerprint(
    persistence: &mut Persistence,
    user_id: i64,
) -> Result<UserData, ApiError> {
    let _existing: UserData = get_user(persistence, user_id)?;
    persistence.clear_finger_id(user_id)?;

    get_user(persistence, user_id)
}

/// Assigns or reassigns a user's fingerprint slot.
///
/// When no slot is requested the next free one is taken. Re-requesting the
/// slot a user already holds is a no-op; a slot held by someone else is
/// refused.
///
/// # Errors
///
/// Returns an error if no user has the given ID, if the requested slot is
/// invalid or held by another user, or on persistence failure.
pub fn assign_fingerprint(
    persistence: &mut Persistence,
    user_id: i64,
    requested: Option<i64>,
) -> Result<UserData, ApiError> {
    let _existing: UserData = get_user(persistence, user_id)?;

    let finger_id: FingerId = match requested {
        Some(raw) => {
            let finger_id: FingerId = FingerId::new(raw).map_err(translate_domain_error)?;
            if let Some(owner) = persistence.get_user_by_finger_id(finger_id)?
                && owner.user_id != user_id
            {
                return Err(translate_domain_error(DomainError::DuplicateFingerId {
                    finger_id: finger_id.value(),
                }));
            }
            finger_id
        }
        None => {
            let next: i64 = persistence.next_finger_id()?;
            FingerId::new(next).map_err(translate_domain_error)?
        }
    };

    persistence.set_finger_id(user_id, finger_id)?;
    info!("Assigned fingerprint slot {} to user {user_id}", finger_id.value());

    get_user(persistence, user_id)
}

/// Deletes a user.
///
/// # Errors
///
/// Returns an error if no user has the given ID.
pub fn delete_user(persistence: &mut Persistence, user_id: i64) -> Result<(), ApiError> {
    let _existing: UserData = get_user(persistence, user_id)?;
    persistence.delete_user(user_id)?;
    Ok(())
}
