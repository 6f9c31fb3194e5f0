//! Cross-crate helpers.

pub mod logging;
