//! Derive macros shared across the crate's modules.

#[allow(unused_imports)]
pub use derive_more::Display;
