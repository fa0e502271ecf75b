//! Conformance validators.

pub mod codes;
pub mod layout;
pub mod pass;
