//! Common types for lifedice.

pub mod dice;
