// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department management services.

use campus_roll_domain::DomainError;
use campus_roll_persistence::{DepartmentData, DepartmentStats, Persistence};
use tracing::info;

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{DepartmentRequest, UpdateDepartmentRequest};

/// Creates a department.
///
/// # Errors
///
/// Returns an error on validation failure or a duplicate name.
pub fn create_department(
    persistence: &mut Persistence,
    request: &DepartmentRequest,
) -> Result<DepartmentData, ApiError> {
    let name: &str = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("must not be empty"),
        });
    }
    if request.hod_name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("hod_name"),
            message: String::from("must not be empty"),
        });
    }

    if persistence.get_department_by_name(name)?.is_some() {
        return Err(translate_domain_error(DomainError::DuplicateDepartment {
            name: name.to_string(),
        }));
    }

    let _department_id: i64 =
        persistence.create_department(name, request.hod_name.trim(), request.description.as_deref())?;

    info!("Created department '{}'", name);

    get_department(persistence, name)
}

/// Retrieves a department by name.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no department has the given name.
pub fn get_department(
    persistence: &mut Persistence,
    name: &str,
) -> Result<DepartmentData, ApiError> {
    persistence.get_department_by_name(name)?.ok_or_else(|| {
        translate_domain_error(DomainError::DepartmentNotFound {
            name: name.to_string(),
        })
    })
}

/// Lists all departments.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_departments(persistence: &mut Persistence) -> Result<Vec<DepartmentData>, ApiError> {
    Ok(persistence.list_departments()?)
}

/// Updates a department's head and description.
///
/// # Errors
///
/// Returns an error if no department has the given name.
pub fn update_department(
    persistence: &mut Persistence,
    name: &str,
    request: &UpdateDepartmentRequest,
) -> Result<DepartmentData, ApiError> {
    let _existing: DepartmentData = get_department(persistence, name)?;

    persistence.update_department(name, request.hod_name.trim(), request.description.as_deref())?;

    get_department(persistence, name)
}

/// Deletes a department, refusing while students remain assigned.
///
/// # Errors
///
/// Returns a domain-rule error while students remain, or
/// `ResourceNotFound` if no department has the given name.
pub fn delete_department(persistence: &mut Persistence, name: &str) -> Result<(), ApiError> {
    let _existing: DepartmentData = get_department(persistence, name)?;
    persistence.delete_department(name)?;
    Ok(())
}

/// Computes headcounts and today's presence for a department.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no department has the given name.
pub fn department_stats(
    persistence: &mut Persistence,
    name: &str,
    today: &str,
) -> Result<DepartmentStats, ApiError> {
    let _existing: DepartmentData = get_department(persistence, name)?;
    Ok(persistence.department_stats(name, today)?)
}
