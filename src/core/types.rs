use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Revenue code for DIFAL on an operation (ICMS difference between states).
pub const RECEITA_DIFAL: &str = "100102";

/// Revenue code for ICMS-ST charged per operation.
pub const RECEITA_ST: &str = "100099";

/// Revenue code for ICMS-ST settled by assessment period. Never inferred,
/// but recognized when supplied by the caller.
pub const RECEITA_ST_APURACAO: &str = "100048";

/// Revenue codes published in the GNRE receitas table.
///
/// The submission builder rejects codes outside this table; the
/// advisory evaluator accepts any 6-digit hint verbatim.
pub const RECEITAS_GNRE: [&str; 13] = [
    "100013", // ICMS Comunicação
    "100021", // ICMS Energia Elétrica
    "100030", // ICMS Transporte
    "100048", // ICMS ST por Apuração
    "100056", // ICMS Importação
    "100064", // ICMS Autuação Fiscal
    "100072", // ICMS Parcelamento
    "100099", // ICMS ST por Operação
    "100102", // ICMS Consumidor Final não contribuinte (DIFAL) por Operação
    "100110", // ICMS Consumidor Final não contribuinte (DIFAL) por Apuração
    "100129", // ICMS FCP por Operação
    "100137", // ICMS FCP por Apuração
    "150010", // FECP
];

/// True when `code` appears in the published receitas table.
pub fn receita_conhecida(code: &str) -> bool {
    RECEITAS_GNRE.contains(&code)
}

/// Fiscal fields extracted from an NF-e.
///
/// Everything is optional: the extraction layer hands over whatever it
/// found in the invoice XML, and absent monetary fields count as zero.
/// Field names mirror the NF-e tags they come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Nfe {
    /// 44-digit NF-e access key (`chNFe`).
    pub chave: Option<String>,
    /// Invoice number (`nNF`).
    pub numero: Option<String>,
    /// Issue timestamp (`dhEmi`), ISO-8601. Parsed leniently; an
    /// unparseable value simply disables the issue-date fallback.
    pub data_emissao: Option<String>,
    /// Issuer (`emit` block).
    pub emitente: Contribuinte,
    /// Recipient (`dest` block).
    pub destinatario: Contribuinte,
    /// Precomputed tax amounts carried by the invoice.
    pub valores: ValoresNfe,
}

/// One party of the invoice — issuer or recipient.
///
/// CNPJ and CPF are mutually exclusive per party; when both are present
/// the CNPJ wins. Recipients only ever populate the identification,
/// name, municipality and UF fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contribuinte {
    /// Corporate taxpayer ID (`CNPJ`).
    pub cnpj: Option<String>,
    /// Individual taxpayer ID (`CPF`).
    pub cpf: Option<String>,
    /// State tax registration (`IE`).
    pub ie: Option<String>,
    /// Legal name (`xNome`).
    pub nome: Option<String>,
    /// Street address (`xLgr`).
    pub endereco: Option<String>,
    /// 7-digit IBGE municipality code (`cMun`).
    pub cod_municipio: Option<String>,
    /// Two-letter state code (`UF`).
    pub uf: Option<String>,
    /// Postal code (`CEP`).
    pub cep: Option<String>,
    /// Phone number (`fone`).
    pub telefone: Option<String>,
}

impl Contribuinte {
    /// True when the party carries at least one taxpayer ID.
    pub fn has_id(&self) -> bool {
        self.cnpj.as_deref().is_some_and(|s| !s.is_empty())
            || self.cpf.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Tax amounts precomputed on the NF-e, as extracted decimal strings.
///
/// Kept as strings on purpose: parsing is lenient (invalid or empty
/// values count as zero) and happens at the single point of use via
/// [`crate::core::fields::dec_or_zero`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValoresNfe {
    /// ICMS-ST total (`vST`).
    pub v_st: Option<String>,
    /// Inter-state ICMS owed to the destination UF (`vICMSUFDest`).
    pub v_icms_uf_dest: Option<String>,
    /// FCP owed to the destination UF (`vFCPUFDest`).
    pub v_fcp_uf_dest: Option<String>,
    /// FCP on ST (`vFCPST`).
    pub v_fcp_st: Option<String>,
}

/// GNRE web-service environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ambiente {
    /// 1 — Production.
    Producao,
    /// 2 — Test / homologation.
    Testes,
}

impl Ambiente {
    /// Wire code used in the `ambiente` element.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Producao => "1",
            Self::Testes => "2",
        }
    }

    /// Parse from the wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Producao),
            "2" => Some(Self::Testes),
            _ => None,
        }
    }
}

/// Outcome of the need assessment for one NF-e.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideNeed {
    /// M — the UF pair requires human review; no automated code is safe.
    Manual,
    /// S — a guide is needed (total > 0).
    Needed,
    /// N — nothing to collect.
    NotNeeded,
}

impl GuideNeed {
    /// One-letter status code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Manual => "M",
            Self::Needed => "S",
            Self::NotNeeded => "N",
        }
    }
}

/// Result of [`crate::core::assess`]: resolved revenue code and the
/// monetary values a guide for this NF-e would carry.
///
/// Amounts are banker's-rounded to 2 decimal places, matching what the
/// XML builders emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Resolved revenue code. `None` when nothing could be inferred, or
    /// when the assessment is [`GuideNeed::Manual`] (a resolved code is
    /// suppressed so callers cannot submit it unreviewed).
    pub receita: Option<String>,
    /// Principal tax value.
    pub valor_principal: Decimal,
    /// FCP total (destination FCP + FCP-ST), never folded into the
    /// principal.
    pub valor_fcp: Decimal,
    /// Guide total = principal + FCP.
    pub valor_total: Decimal,
    /// Whether a guide is needed at all.
    pub need: GuideNeed,
}
