// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;

/// Creates a session for a user.
///
/// # Returns
///
/// The session ID assigned to the new row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    user_id: i64,
    session_token: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating session for user ID: {}", user_id);

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;

    Ok(session_id)
}

/// Refreshes the activity timestamp on a session.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn touch_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    debug!("Refreshing session activity timestamp");

    diesel::update(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .set(sessions::last_activity_at
            .eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")))
        .execute(conn)?;

    Ok(())
}

/// Deletes a session by token.
///
/// # Errors
///
/// Returns `SessionNotFound` if no session has the given token, or an error
/// if the delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    info!("Deleting session");

    let affected: usize = diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::SessionNotFound(
            session_token.to_string(),
        ));
    }

    Ok(())
}

/// Deletes all sessions that expired before the given instant.
///
/// # Returns
///
/// The number of sessions removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn prune_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(now))
        .execute(conn)?;

    if removed > 0 {
        info!("Pruned {} expired session(s)", removed);
    }

    Ok(removed)
}
