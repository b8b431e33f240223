//! Common utilities for the atomic model viewer
//!
//! This crate provides shared graphics setup, orbital camera controls, and
//! rendering helpers used by the viewer binary.

pub mod camera;
pub mod error;
pub mod graphics;

pub use camera::*;
pub use error::*;
pub use graphics::*;
