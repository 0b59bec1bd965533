//! Domain models for the patient records system.

mod patient;
mod row;

pub use patient::*;
pub use row::*;
