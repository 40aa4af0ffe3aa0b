//! Chart data preparation.
//!
//! # Responsibility
//! - Turn a name/period selection into per-metric series ready for drawing.
//! - Stay independent of any GUI toolkit; drawing lives in the desktop crate.

pub mod series;
