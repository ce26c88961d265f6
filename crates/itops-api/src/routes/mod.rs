//! # HTTP Routes
//!
//! | Path            | Module             |
//! |-----------------|--------------------|
//! | `/issue`        | [`issues`]         |
//! | `/issues`       | [`issues`]         |
//! | `/issue/{id}`   | [`issues`]         |
//! | `/users`        | [`users`]          |

pub mod issues;
pub mod users;
