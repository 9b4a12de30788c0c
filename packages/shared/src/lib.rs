//! Shared utilities for Huddle.

pub mod logger;
pub mod time;
