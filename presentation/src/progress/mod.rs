//! Turn progress feedback

pub mod reporter;
