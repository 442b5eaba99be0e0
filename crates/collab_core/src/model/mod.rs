//! Domain model for the collaboration/notification core.
//!
//! # Responsibility
//! - Define canonical records shared by core logic, repositories and services.
//! - Provide validation helpers enforced on every persistence boundary.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID.
//! - `User`, `Project` and `Task` are read-only inside core logic.
//! - `Invitation` status only moves out of `Waiting`; its read flag is monotonic.

pub mod invitation;
pub mod project;
pub mod task;
pub mod user;
pub mod validation;
