//! Nutrition Labels Library
//!
//! Expands recipes into serving-size and salt-level label variants and
//! renders each variant as a PDF or PNG nutrition-facts label.

pub mod batch;
pub mod config;
pub mod emit;
pub mod error;
pub mod models;
pub mod render;
pub mod variants;

pub use error::{LabelError, LabelResult};
