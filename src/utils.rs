//! Shared helpers.

pub mod logging;
pub(crate) mod serialization;
