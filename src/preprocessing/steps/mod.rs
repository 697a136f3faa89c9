//! Individual preprocessing steps

pub mod bilateral;
pub mod grayscale;
