//! CLI command implementations

pub mod info;
pub mod mipmap;
pub mod transform;
