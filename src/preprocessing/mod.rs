//! Image preprocessing ahead of plate localization
//!
//! Converts the input to grayscale and smooths it with an edge-preserving
//! filter so that plate borders survive while texture noise is suppressed.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, Preprocessed, StepTiming};
