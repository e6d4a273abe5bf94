use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;

use super::xml_utils::{XmlResult, XmlWriter};
use super::{GNRE_NS, GNRE_VERSAO};
use crate::core::fields::{data_only, dec_or_zero, digits, fmt_valor, is_receita};
use crate::core::{GnreError, Nfe, RECEITA_DIFAL, RECEITA_ST};

/// Guide-level parameters for the submission lot.
///
/// Everything is optional; the builder falls back to the NF-e fields
/// where the schema allows it. `incluir_campo_107` defaults to on; the
/// access key is echoed only when it is a genuine 44-digit NF-e key.
///
/// ```
/// use gnre::xml::GuideOptions;
///
/// let opts = GuideOptions::new()
///     .receita("100102")
///     .produto("DIFAL")
///     .incluir_campo_107(false);
/// ```
#[derive(Debug, Clone)]
pub struct GuideOptions {
    uf_favorecida: Option<String>,
    receita: Option<String>,
    detalhamento_receita: Option<String>,
    produto: Option<String>,
    doc_origem_tipo: Option<String>,
    incluir_campo_107: bool,
    valor_principal: Option<String>,
    data_vencimento: Option<NaiveDate>,
    razao_social: Option<String>,
    data_pagamento: Option<NaiveDate>,
}

impl Default for GuideOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl GuideOptions {
    pub fn new() -> Self {
        Self {
            uf_favorecida: None,
            receita: None,
            detalhamento_receita: None,
            produto: None,
            doc_origem_tipo: None,
            incluir_campo_107: true,
            valor_principal: None,
            data_vencimento: None,
            razao_social: None,
            data_pagamento: None,
        }
    }

    /// Favored UF. Falls back to the NF-e recipient UF when unset.
    pub fn uf_favorecida(mut self, uf: impl Into<String>) -> Self {
        self.uf_favorecida = Some(uf.into());
        self
    }

    /// 6-digit revenue code. When unset (or not 6 digits) the code is
    /// inferred from the NF-e amounts; inference failure is an error.
    pub fn receita(mut self, receita: impl Into<String>) -> Self {
        self.receita = Some(receita.into());
        self
    }

    pub fn detalhamento_receita(mut self, det: impl Into<String>) -> Self {
        self.detalhamento_receita = Some(det.into());
        self
    }

    pub fn produto(mut self, produto: impl Into<String>) -> Self {
        self.produto = Some(produto.into());
        self
    }

    /// Origin-document type code. Defaults to "10" (NF-e).
    pub fn doc_origem_tipo(mut self, tipo: impl Into<String>) -> Self {
        self.doc_origem_tipo = Some(tipo.into());
        self
    }

    /// Echo the 44-digit access key as campo extra 107.
    pub fn incluir_campo_107(mut self, incluir: bool) -> Self {
        self.incluir_campo_107 = incluir;
        self
    }

    /// Override the derived principal value (lenient decimal string).
    pub fn valor_principal(mut self, valor: impl Into<String>) -> Self {
        self.valor_principal = Some(valor.into());
        self
    }

    /// Due date. Falls back to the NF-e issue date, then to today.
    pub fn data_vencimento(mut self, data: NaiveDate) -> Self {
        self.data_vencimento = Some(data);
        self
    }

    /// Issuer legal name override; takes priority over the NF-e name.
    pub fn razao_social(mut self, nome: impl Into<String>) -> Self {
        self.razao_social = Some(nome.into());
        self
    }

    pub fn data_pagamento(mut self, data: NaiveDate) -> Self {
        self.data_pagamento = Some(data);
        self
    }
}

/// Build the GNRE submission lot (`TLote_GNRE` v2.00) for one NF-e.
///
/// Validates all preconditions before writing a single element, then
/// emits the guide in the fixed order the lot schema expects. The
/// monetary values are re-derived here with the same code-based rule as
/// [`crate::core::assess`]; the two entry points stay independently
/// correct.
pub fn lote_xml(nfe: &Nfe, opts: &GuideOptions) -> XmlResult {
    let uf = opts
        .uf_favorecida
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or(nfe.destinatario.uf.as_deref())
        .map(str::trim)
        .unwrap_or("")
        .to_string();
    if uf.is_empty() {
        return Err(GnreError::invalid("ufFavorecida is required"));
    }

    let v_st = dec_or_zero(nfe.valores.v_st.as_deref());
    let v_icms_uf = dec_or_zero(nfe.valores.v_icms_uf_dest.as_deref());

    let receita = match opts.receita.as_deref().filter(|r| is_receita(r)) {
        Some(r) => r.to_string(),
        None if v_icms_uf > Decimal::ZERO => RECEITA_DIFAL.to_string(),
        None if v_st > Decimal::ZERO => RECEITA_ST.to_string(),
        None => {
            return Err(GnreError::invalid(
                "receita must be a 6-digit code or derivable from the NF-e amounts",
            ));
        }
    };
    // Submission is strict: unlike the evaluator, a 6-digit code is only
    // accepted when it exists in the published receitas table.
    if !crate::core::receita_conhecida(&receita) {
        return Err(GnreError::invalid(format!(
            "receita '{receita}' is not in the GNRE receitas table"
        )));
    }

    if !nfe.emitente.has_id() {
        return Err(GnreError::invalid("emitente must carry a CNPJ or CPF"));
    }

    let chave = nfe.chave.as_deref().unwrap_or("").trim();
    if chave.is_empty() || chave.len() > 44 || !chave.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GnreError::invalid("documentoOrigem: invalid NF-e key"));
    }

    let principal = match opts.valor_principal.as_deref() {
        Some(v) => dec_or_zero(Some(v)),
        None => crate::core::principal_for(Some(&receita), v_st, v_icms_uf),
    };
    if principal < Decimal::ZERO {
        return Err(GnreError::invalid("principal value must not be negative"));
    }

    let fcp = dec_or_zero(nfe.valores.v_fcp_uf_dest.as_deref())
        + dec_or_zero(nfe.valores.v_fcp_st.as_deref());
    let total = principal + fcp;

    let vencimento = opts
        .data_vencimento
        .or_else(|| data_only(nfe.data_emissao.as_deref()))
        .unwrap_or_else(|| Local::now().date_naive());

    let mut w = XmlWriter::new();
    w.start_element_with_attrs(
        "TLote_GNRE",
        &[("xmlns", GNRE_NS), ("versao", GNRE_VERSAO)],
    )?;
    w.start_element("guias")?;
    w.start_element_with_attrs("TDadosGNRE", &[("versao", GNRE_VERSAO)])?;

    w.text_element("ufFavorecida", &uf)?;
    // 0 = normal guide
    w.text_element("tipoGnre", "0")?;

    write_emitente(&mut w, nfe, &uf, opts.razao_social.as_deref())?;

    w.start_element("itensGNRE")?;
    w.start_element("item")?;
    w.text_element("receita", &receita)?;
    w.opt_text_element("detalhamentoReceita", opts.detalhamento_receita.as_deref())?;
    w.opt_text_element("produto", opts.produto.as_deref())?;

    let doc_tipo = opts
        .doc_origem_tipo
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("10");
    let doc_num = digits(
        nfe.numero
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(chave),
    );
    w.text_element_with_attrs("documentoOrigem", &doc_num, &[("tipo", doc_tipo)])?;

    w.start_element("referencia")?;
    w.text_element("periodo", "0")?;
    w.text_element("mes", &format!("{:02}", vencimento.month()))?;
    w.text_element("ano", &vencimento.year().to_string())?;
    w.end_element("referencia")?;

    w.text_element("dataVencimento", &vencimento.to_string())?;

    // tipo 11: principal, tipo 21: item total, tipo 27: FCP (only when
    // there is FCP to collect)
    w.text_element_with_attrs("valor", &fmt_valor(principal), &[("tipo", "11")])?;
    w.text_element_with_attrs("valor", &fmt_valor(total), &[("tipo", "21")])?;
    if fcp > Decimal::ZERO {
        w.text_element_with_attrs("valor", &fmt_valor(fcp), &[("tipo", "27")])?;
    }

    if nfe.destinatario.has_id() {
        write_destinatario(&mut w, nfe)?;
    }

    if opts.incluir_campo_107 && digits(chave).len() == 44 {
        w.start_element("camposExtras")?;
        w.start_element("campoExtra")?;
        w.text_element("codigo", "107")?;
        w.text_element("valor", &digits(chave))?;
        w.end_element("campoExtra")?;
        w.end_element("camposExtras")?;
    }

    w.end_element("item")?;
    w.end_element("itensGNRE")?;

    w.text_element("valorGNRE", &fmt_valor(total))?;
    if let Some(dp) = opts.data_pagamento {
        w.text_element("dataPagamento", &dp.to_string())?;
    }

    w.end_element("TDadosGNRE")?;
    w.end_element("guias")?;
    w.end_element("TLote_GNRE")?;
    w.into_string()
}

fn write_emitente(
    w: &mut XmlWriter,
    nfe: &Nfe,
    uf_favorecida: &str,
    razao_social: Option<&str>,
) -> Result<(), GnreError> {
    let emit = &nfe.emitente;
    w.start_element("contribuinteEmitente")?;
    w.start_element("identificacao")?;
    if let Some(cnpj) = emit.cnpj.as_deref().filter(|s| !s.is_empty()) {
        w.text_element("CNPJ", cnpj)?;
    } else {
        w.opt_text_element("CPF", emit.cpf.as_deref())?;
    }
    // IE only when the issuer is registered in the favored UF itself
    if emit.uf.as_deref() == Some(uf_favorecida) {
        w.opt_text_element("IE", emit.ie.as_deref())?;
    }
    w.end_element("identificacao")?;

    w.opt_text_element("razaoSocial", razao_social.or(emit.nome.as_deref()))?;
    w.opt_text_element("endereco", emit.endereco.as_deref())?;
    w.opt_text_element(
        "municipio",
        crate::core::municipio5(emit.cod_municipio.as_deref()).as_deref(),
    )?;
    w.opt_text_element("uf", emit.uf.as_deref())?;
    w.opt_text_element("cep", emit.cep.as_deref())?;
    w.opt_text_element("telefone", emit.telefone.as_deref())?;
    w.end_element("contribuinteEmitente")?;
    Ok(())
}

fn write_destinatario(w: &mut XmlWriter, nfe: &Nfe) -> Result<(), GnreError> {
    let dest = &nfe.destinatario;
    w.start_element("contribuinteDestinatario")?;
    w.start_element("identificacao")?;
    if let Some(cnpj) = dest.cnpj.as_deref().filter(|s| !s.is_empty()) {
        w.text_element("CNPJ", cnpj)?;
    } else {
        w.opt_text_element("CPF", dest.cpf.as_deref())?;
    }
    w.end_element("identificacao")?;
    w.opt_text_element("razaoSocial", dest.nome.as_deref())?;
    w.opt_text_element(
        "municipio",
        crate::core::municipio5(dest.cod_municipio.as_deref()).as_deref(),
    )?;
    w.end_element("contribuinteDestinatario")?;
    Ok(())
}
