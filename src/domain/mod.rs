//! Core domain types and logic.

pub mod bar;
pub mod series;
pub mod indicator;
pub mod detect;
pub mod regime;
pub mod fundamentals;
pub mod scan;
pub mod error;
