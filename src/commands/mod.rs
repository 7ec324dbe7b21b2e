//! Command implementations

pub mod status;
pub mod validate;
pub mod version;
