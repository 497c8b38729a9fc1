// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific database utilities.
//!
//! All domain queries and mutations are expressed in backend-agnostic
//! Diesel DSL; this module holds the pieces that cannot be (connection
//! setup, PRAGMA statements, migrations).

pub mod sqlite;
