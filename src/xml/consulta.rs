use super::xml_utils::{XmlResult, XmlWriter};
use super::{GNRE_NS, GNRE_VERSAO, TIPOS_CONSULTA};
use crate::core::{Ambiente, GnreError};

/// Parameters for the lot query (`TLote_ConsultaGNRE`).
///
/// `uf` and `tipo_consulta` are required; everything else narrows the
/// query when present. The origin document is only emitted when both
/// its number and its type code are set.
#[derive(Debug, Clone, Default)]
pub struct ConsultaLote {
    uf: String,
    tipo_consulta: String,
    emitente_cnpj: Option<String>,
    emitente_cpf: Option<String>,
    emitente_ie: Option<String>,
    cod_barras: Option<String>,
    num_controle: Option<String>,
    doc_origem: Option<(String, String)>,
}

impl ConsultaLote {
    /// `tipo_consulta` must be one of [`TIPOS_CONSULTA`]; checked at
    /// build time, not here.
    pub fn new(uf: impl Into<String>, tipo_consulta: impl Into<String>) -> Self {
        Self {
            uf: uf.into(),
            tipo_consulta: tipo_consulta.into(),
            ..Default::default()
        }
    }

    pub fn emitente_cnpj(mut self, cnpj: impl Into<String>) -> Self {
        self.emitente_cnpj = Some(cnpj.into());
        self
    }

    pub fn emitente_cpf(mut self, cpf: impl Into<String>) -> Self {
        self.emitente_cpf = Some(cpf.into());
        self
    }

    pub fn emitente_ie(mut self, ie: impl Into<String>) -> Self {
        self.emitente_ie = Some(ie.into());
        self
    }

    pub fn cod_barras(mut self, cod: impl Into<String>) -> Self {
        self.cod_barras = Some(cod.into());
        self
    }

    pub fn num_controle(mut self, num: impl Into<String>) -> Self {
        self.num_controle = Some(num.into());
        self
    }

    /// Origin document number plus its type code (e.g. "10" for NF-e).
    pub fn doc_origem(mut self, numero: impl Into<String>, tipo: impl Into<String>) -> Self {
        self.doc_origem = Some((numero.into(), tipo.into()));
        self
    }
}

/// Build the lot-query document (`TLote_ConsultaGNRE` v2.00).
pub fn consulta_lote_xml(consulta: &ConsultaLote) -> XmlResult {
    if consulta.uf.trim().is_empty() {
        return Err(GnreError::invalid("uf is required"));
    }
    if !TIPOS_CONSULTA.contains(&consulta.tipo_consulta.as_str()) {
        return Err(GnreError::invalid(format!(
            "tipoConsulta '{}' is not one of {:?}",
            consulta.tipo_consulta, TIPOS_CONSULTA
        )));
    }

    let mut w = XmlWriter::new();
    w.start_element_with_attrs(
        "TLote_ConsultaGNRE",
        &[("xmlns", GNRE_NS), ("versao", GNRE_VERSAO)],
    )?;
    w.start_element("consulta")?;
    w.text_element("uf", consulta.uf.trim())?;

    let has_emitente = [
        &consulta.emitente_cnpj,
        &consulta.emitente_cpf,
        &consulta.emitente_ie,
    ]
    .iter()
    .any(|f| f.as_deref().is_some_and(|s| !s.is_empty()));
    if has_emitente {
        w.start_element("emitenteId")?;
        w.opt_text_element("CNPJ", consulta.emitente_cnpj.as_deref())?;
        w.opt_text_element("CPF", consulta.emitente_cpf.as_deref())?;
        w.opt_text_element("IE", consulta.emitente_ie.as_deref())?;
        w.end_element("emitenteId")?;
    }

    w.opt_text_element("codBarras", consulta.cod_barras.as_deref())?;
    w.opt_text_element("numControle", consulta.num_controle.as_deref())?;
    if let Some((numero, tipo)) = &consulta.doc_origem {
        if !numero.is_empty() && !tipo.is_empty() {
            w.text_element_with_attrs("docOrigem", numero, &[("tipo", tipo)])?;
        }
    }
    w.text_element("tipoConsulta", &consulta.tipo_consulta)?;

    w.end_element("consulta")?;
    w.end_element("TLote_ConsultaGNRE")?;
    w.into_string()
}

/// Build the processing-result consultation (`TConsLote_GNRE`).
///
/// Each `incluir_*` flag adds its request element with text "S" when
/// true; a false flag omits the element entirely, never rendering "N".
pub fn consulta_resultado_xml(
    ambiente: Ambiente,
    numero_recibo: &str,
    incluir_pdf: bool,
    incluir_arquivo_pagamento: bool,
    incluir_noticias: bool,
) -> XmlResult {
    if numero_recibo.trim().is_empty() {
        return Err(GnreError::invalid("numeroRecibo is required"));
    }

    let mut w = XmlWriter::new();
    w.start_element_with_attrs("TConsLote_GNRE", &[("xmlns", GNRE_NS)])?;
    w.text_element("ambiente", ambiente.code())?;
    w.text_element("numeroRecibo", numero_recibo.trim())?;
    if incluir_pdf {
        w.text_element("incluirPDFGuias", "S")?;
    }
    if incluir_arquivo_pagamento {
        w.text_element("incluirArquivoPagamento", "S")?;
    }
    if incluir_noticias {
        w.text_element("incluirNoticias", "S")?;
    }
    w.end_element("TConsLote_GNRE")?;
    w.into_string()
}

/// Build the UF configuration query (`TConsultaConfigUf`).
///
/// `tipos_gnre` is tri-state: emitted only when exactly "S" or "N",
/// silently omitted for anything else.
pub fn consulta_config_uf_xml(
    ambiente: Ambiente,
    uf: &str,
    receita: Option<&str>,
    tipos_gnre: Option<&str>,
) -> XmlResult {
    if uf.trim().is_empty() {
        return Err(GnreError::invalid("uf is required"));
    }

    let mut w = XmlWriter::new();
    w.start_element_with_attrs("TConsultaConfigUf", &[("xmlns", GNRE_NS)])?;
    w.text_element("ambiente", ambiente.code())?;
    w.text_element("uf", uf.trim())?;
    w.opt_text_element("receita", receita)?;
    if let Some(t) = tipos_gnre.filter(|t| *t == "S" || *t == "N") {
        w.text_element("tiposGnre", t)?;
    }
    w.end_element("TConsultaConfigUf")?;
    w.into_string()
}
