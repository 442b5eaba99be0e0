//! Core use-case services.
//!
//! # Responsibility
//! - Bracket pure notification logic with repository reads and writes.
//! - Keep UI/CLI layers decoupled from storage details.

pub mod invite_service;
pub mod notification_service;
