//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the crate. Types here
//! have no framework dependencies (reqwest, tiny-skia, etc.) to avoid
//! circular dependencies.

pub mod annotation;
pub mod geometry;
pub mod photo;

pub use annotation::*;
pub use geometry::*;
pub use photo::*;
