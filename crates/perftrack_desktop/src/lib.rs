//! Desktop front end for PerfTrack.
//!
//! # Responsibility
//! - Render the entry form, results table, chart window and export controls.
//! - Route every user action through [`api`], which owns error-to-notice
//!   mapping.

pub mod api;
pub mod app;
pub mod chart_view;

pub use app::PerfTrackApp;
