//! Command implementations.

pub mod ca_info;
pub mod enroll;
pub mod list;
