//! GNRE v2.00 XML document builders.
//!
//! Four independent builders, one per document the GNRE web service
//! accepts:
//!
//! - [`lote_xml`] — submission lot (`TLote_GNRE`) carrying one guide
//! - [`consulta_lote_xml`] — lot query (`TLote_ConsultaGNRE`)
//! - [`consulta_resultado_xml`] — processing-result consultation
//!   (`TConsLote_GNRE`)
//! - [`consulta_config_uf_xml`] — UF configuration query
//!   (`TConsultaConfigUf`)
//!
//! Each builder validates its preconditions up-front, then writes the
//! element sequence in the exact order the service schema expects.
//! Output is a UTF-8 string without XML declaration, all elements in the
//! default GNRE namespace.
//!
//! # Example
//!
//! ```no_run
//! use gnre::core::Nfe;
//! use gnre::xml::{GuideOptions, lote_xml};
//!
//! let nfe: Nfe = todo!(); // extracted from the invoice
//! let xml = lote_xml(&nfe, &GuideOptions::new()).unwrap();
//! ```

mod consulta;
mod lote;
pub(crate) mod xml_utils;

pub use consulta::{ConsultaLote, consulta_config_uf_xml, consulta_lote_xml, consulta_resultado_xml};
pub use lote::{GuideOptions, lote_xml};

/// Default namespace of every GNRE document.
pub const GNRE_NS: &str = "http://www.gnre.pe.gov.br";

/// Schema version carried by the versioned root elements.
pub const GNRE_VERSAO: &str = "2.00";

/// Accepted `tipoConsulta` codes for the lot query.
pub const TIPOS_CONSULTA: [&str; 7] = ["C", "N", "D", "CD", "ND", "CR", "NR"];
