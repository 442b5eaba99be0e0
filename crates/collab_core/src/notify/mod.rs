//! Pure notification logic: invitation lifecycle, grouping and deadlines.
//!
//! # Responsibility
//! - Compute display models and mutation plans from in-memory values.
//!
//! # Invariants
//! - Nothing in this module performs I/O or logs; services bracket these
//!   calls with repository access.

pub mod aggregator;
pub mod deadline;
pub mod lifecycle;
