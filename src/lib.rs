//! # gnre
//!
//! Brazilian GNRE (Guia Nacional de Recolhimento de Tributos Estaduais)
//! library: decides whether a guide must be issued for an NF-e, derives
//! the revenue code and monetary values, and builds the GNRE v2.00 XML
//! documents (lote submission, lote query, result consultation, UF
//! configuration query).
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Tax amounts already computed on the NF-e (ST, DIFAL, FCP) are consumed
//! as-is; this crate never recomputes taxes.
//!
//! ## Quick Start
//!
//! ```rust
//! use gnre::core::*;
//! use rust_decimal_macros::dec;
//!
//! let nfe = Nfe {
//!     valores: ValoresNfe {
//!         v_icms_uf_dest: Some("150.00".into()),
//!         v_fcp_uf_dest: Some("20.00".into()),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! let a = assess(&nfe, None, None);
//! assert_eq!(a.receita.as_deref(), Some("100102"));
//! assert_eq!(a.valor_total, dec!(170.00));
//! assert_eq!(a.need, GuideNeed::Needed);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | NF-e fiscal types, lenient field parsing, need/value assessment |
//! | `xml` | GNRE v2.00 XML builders (lote, consulta, resultado, config UF) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod xml;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
