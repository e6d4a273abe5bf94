//! Core fiscal types, lenient field parsing, and need/value assessment.
//!
//! This module provides the NF-e fiscal data model consumed by the GNRE
//! builders, together with the pure evaluator that decides whether a
//! guide is needed and which values it carries.

mod assess;
mod error;
pub mod fields;
mod types;

pub use assess::*;
pub use error::*;
pub use fields::{dec_or_zero, fmt_valor, municipio5};
pub use types::*;
