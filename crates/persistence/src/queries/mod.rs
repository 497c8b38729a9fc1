// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only database queries.

pub mod attendance;
pub mod departments;
pub mod sessions;
pub mod stats;
pub mod users;
