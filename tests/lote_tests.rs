#![cfg(feature = "xml")]

use chrono::NaiveDate;
use gnre::core::*;
use gnre::xml::{GNRE_NS, GuideOptions, lote_xml};

const CHAVE: &str = "35240612345678000195550010000123451000123456";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Inter-state NF-e with ST withheld, MG → RJ.
fn nfe() -> Nfe {
    Nfe {
        chave: Some(CHAVE.into()),
        numero: Some("12345".into()),
        data_emissao: Some("2024-06-15T10:30:00-03:00".into()),
        emitente: Contribuinte {
            cnpj: Some("12345678000195".into()),
            ie: Some("0623456789".into()),
            nome: Some("Indústria Alfa Ltda".into()),
            endereco: Some("Rua das Acácias 100".into()),
            cod_municipio: Some("3106200".into()),
            uf: Some("MG".into()),
            cep: Some("30110000".into()),
            telefone: Some("3133334444".into()),
            ..Default::default()
        },
        destinatario: Contribuinte {
            cnpj: Some("98765432000110".into()),
            nome: Some("Comércio Beta SA".into()),
            cod_municipio: Some("3304557".into()),
            uf: Some("RJ".into()),
            ..Default::default()
        },
        valores: ValoresNfe {
            v_st: Some("100.00".into()),
            ..Default::default()
        },
    }
}

// --- Document shape ---

#[test]
fn lote_root_and_namespace() {
    let xml = lote_xml(&nfe(), &GuideOptions::new()).unwrap();

    assert!(!xml.contains("<?xml"), "no XML declaration");
    assert!(xml.starts_with(&format!(
        "<TLote_GNRE xmlns=\"{GNRE_NS}\" versao=\"2.00\">"
    )));
    assert!(xml.contains("<TDadosGNRE versao=\"2.00\">"));
    assert!(xml.ends_with("</guias></TLote_GNRE>"));
}

#[test]
fn lote_guide_fields() {
    let xml = lote_xml(&nfe(), &GuideOptions::new()).unwrap();

    // favored UF falls back to the recipient UF
    assert!(xml.contains("<ufFavorecida>RJ</ufFavorecida>"));
    assert!(xml.contains("<tipoGnre>0</tipoGnre>"));
    // ST amount present, no DIFAL → 100099 inferred
    assert!(xml.contains("<receita>100099</receita>"));
    assert!(xml.contains("<documentoOrigem tipo=\"10\">12345</documentoOrigem>"));
}

#[test]
fn lote_emitente_block() {
    let xml = lote_xml(&nfe(), &GuideOptions::new()).unwrap();

    assert!(xml.contains("<CNPJ>12345678000195</CNPJ>"));
    // issuer is in MG, favored UF is RJ → IE omitted
    assert!(!xml.contains("<IE>"));
    assert!(xml.contains("<razaoSocial>Indústria Alfa Ltda</razaoSocial>"));
    assert!(xml.contains("<endereco>Rua das Acácias 100</endereco>"));
    // 3106200 → 06200
    assert!(xml.contains("<municipio>06200</municipio>"));
    assert!(xml.contains("<uf>MG</uf>"));
    assert!(xml.contains("<cep>30110000</cep>"));
    assert!(xml.contains("<telefone>3133334444</telefone>"));
}

#[test]
fn ie_included_when_issuer_uf_is_favored() {
    let xml = lote_xml(&nfe(), &GuideOptions::new().uf_favorecida("MG")).unwrap();

    assert!(xml.contains("<ufFavorecida>MG</ufFavorecida>"));
    assert!(xml.contains("<IE>0623456789</IE>"));
}

#[test]
fn lote_destinatario_block() {
    let xml = lote_xml(&nfe(), &GuideOptions::new()).unwrap();

    assert!(xml.contains("<contribuinteDestinatario>"));
    assert!(xml.contains("<CNPJ>98765432000110</CNPJ>"));
    assert!(xml.contains("<razaoSocial>Comércio Beta SA</razaoSocial>"));
    // 3304557 → 04557
    assert!(xml.contains("<municipio>04557</municipio>"));
}

#[test]
fn destinatario_omitted_without_tax_id() {
    let mut n = nfe();
    n.destinatario.cnpj = None;
    let xml = lote_xml(&n, &GuideOptions::new()).unwrap();

    assert!(!xml.contains("contribuinteDestinatario"));
}

#[test]
fn cpf_issuer_when_no_cnpj() {
    let mut n = nfe();
    n.emitente.cnpj = None;
    n.emitente.cpf = Some("12345678909".into());
    let xml = lote_xml(&n, &GuideOptions::new()).unwrap();

    assert!(xml.contains("<CPF>12345678909</CPF>"));
}

// --- Values ---

#[test]
fn st_only_invoice_values() {
    let xml = lote_xml(&nfe(), &GuideOptions::new()).unwrap();

    assert!(xml.contains("<valor tipo=\"11\">100.00</valor>"));
    assert!(xml.contains("<valor tipo=\"21\">100.00</valor>"));
    assert!(!xml.contains("tipo=\"27\""), "no FCP entry without FCP");
    assert!(xml.contains("<valorGNRE>100.00</valorGNRE>"));
}

#[test]
fn fcp_entry_present_iff_fcp_positive() {
    let mut n = nfe();
    n.valores.v_fcp_uf_dest = Some("15.00".into());
    n.valores.v_fcp_st = Some("5.00".into());
    let xml = lote_xml(&n, &GuideOptions::new()).unwrap();

    assert!(xml.contains("<valor tipo=\"11\">100.00</valor>"));
    assert!(xml.contains("<valor tipo=\"21\">120.00</valor>"));
    assert!(xml.contains("<valor tipo=\"27\">20.00</valor>"));
    assert!(xml.contains("<valorGNRE>120.00</valorGNRE>"));
}

#[test]
fn difal_invoice_uses_icms_dest_as_principal() {
    let mut n = nfe();
    n.valores.v_st = None;
    n.valores.v_icms_uf_dest = Some("150.00".into());
    let xml = lote_xml(&n, &GuideOptions::new()).unwrap();

    assert!(xml.contains("<receita>100102</receita>"));
    assert!(xml.contains("<valor tipo=\"11\">150.00</valor>"));
}

#[test]
fn principal_override_wins() {
    let xml = lote_xml(&nfe(), &GuideOptions::new().valor_principal("85.50")).unwrap();

    assert!(xml.contains("<valor tipo=\"11\">85.50</valor>"));
    assert!(xml.contains("<valorGNRE>85.50</valorGNRE>"));
}

// --- Dates ---

#[test]
fn due_date_falls_back_to_issue_date() {
    let xml = lote_xml(&nfe(), &GuideOptions::new()).unwrap();

    assert!(xml.contains("<dataVencimento>2024-06-15</dataVencimento>"));
    assert!(xml.contains("<periodo>0</periodo>"));
    assert!(xml.contains("<mes>06</mes>"));
    assert!(xml.contains("<ano>2024</ano>"));
}

#[test]
fn explicit_due_date_wins() {
    let opts = GuideOptions::new().data_vencimento(date(2024, 11, 3));
    let xml = lote_xml(&nfe(), &opts).unwrap();

    assert!(xml.contains("<dataVencimento>2024-11-03</dataVencimento>"));
    assert!(xml.contains("<mes>11</mes>"));
}

#[test]
fn payment_date_only_when_supplied() {
    let without = lote_xml(&nfe(), &GuideOptions::new()).unwrap();
    assert!(!without.contains("dataPagamento"));

    let opts = GuideOptions::new().data_pagamento(date(2024, 6, 20));
    let with = lote_xml(&nfe(), &opts).unwrap();
    assert!(with.contains("<dataPagamento>2024-06-20</dataPagamento>"));
}

// --- Campo extra 107 ---

#[test]
fn campo_107_echoes_the_access_key() {
    let xml = lote_xml(&nfe(), &GuideOptions::new()).unwrap();

    assert!(xml.contains("<camposExtras><campoExtra><codigo>107</codigo>"));
    assert!(xml.contains(&format!("<valor>{CHAVE}</valor>")));
}

#[test]
fn campo_107_suppressed_by_flag() {
    let xml = lote_xml(&nfe(), &GuideOptions::new().incluir_campo_107(false)).unwrap();

    assert!(!xml.contains("camposExtras"));
}

#[test]
fn campo_107_requires_a_44_digit_key() {
    let mut n = nfe();
    n.chave = Some(CHAVE[..43].into());
    let xml = lote_xml(&n, &GuideOptions::new()).unwrap();

    assert!(!xml.contains("camposExtras"));
    // the short key still serves as origin-document fallback
    n.numero = None;
    let xml = lote_xml(&n, &GuideOptions::new()).unwrap();
    assert!(xml.contains(&format!("<documentoOrigem tipo=\"10\">{}</documentoOrigem>", &CHAVE[..43])));
}

#[test]
fn empty_numero_falls_back_to_chave() {
    let mut n = nfe();
    n.numero = Some("".into());
    let xml = lote_xml(&n, &GuideOptions::new()).unwrap();

    // an empty invoice number counts as absent, like the extraction
    // layer's missing-field case
    assert!(xml.contains(&format!("<documentoOrigem tipo=\"10\">{CHAVE}</documentoOrigem>")));
    assert!(!xml.contains("<documentoOrigem tipo=\"10\"></documentoOrigem>"));
}

// --- Options ---

#[test]
fn optional_item_fields() {
    let opts = GuideOptions::new()
        .detalhamento_receita("1")
        .produto("Autopeças")
        .doc_origem_tipo("22")
        .razao_social("Nome Social Override");
    let xml = lote_xml(&nfe(), &opts).unwrap();

    assert!(xml.contains("<detalhamentoReceita>1</detalhamentoReceita>"));
    assert!(xml.contains("<produto>Autopeças</produto>"));
    assert!(xml.contains("<documentoOrigem tipo=\"22\">12345</documentoOrigem>"));
    assert!(xml.contains("<razaoSocial>Nome Social Override</razaoSocial>"));
    assert!(!xml.contains("Indústria Alfa"));
}

// --- Validation failures ---

fn assert_validation(result: Result<String, GnreError>, needle: &str) {
    match result {
        Err(GnreError::Validation(msg)) => {
            assert!(msg.contains(needle), "message {msg:?} missing {needle:?}")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn rejects_missing_favored_uf() {
    let mut n = nfe();
    n.destinatario.uf = None;
    assert_validation(lote_xml(&n, &GuideOptions::new()), "ufFavorecida");
}

#[test]
fn rejects_unresolvable_receita() {
    let mut n = nfe();
    n.valores = ValoresNfe::default();
    assert_validation(lote_xml(&n, &GuideOptions::new()), "receita");
}

#[test]
fn rejects_unknown_receita_code() {
    let mut n = nfe();
    n.valores = ValoresNfe::default();
    let opts = GuideOptions::new().uf_favorecida("SP").receita("999999");
    assert_validation(lote_xml(&n, &opts), "999999");
}

#[test]
fn rejects_issuer_without_tax_id() {
    let mut n = nfe();
    n.emitente.cnpj = None;
    n.emitente.cpf = None;
    assert_validation(lote_xml(&n, &GuideOptions::new()), "emitente");
}

#[test]
fn rejects_bad_access_keys() {
    for bad in ["", "12345678901234567890123456789012345678901234X", "abc"] {
        let mut n = nfe();
        n.chave = Some(bad.into());
        assert_validation(lote_xml(&n, &GuideOptions::new()), "documentoOrigem");
    }

    let mut n = nfe();
    n.chave = Some("1".repeat(45));
    assert_validation(lote_xml(&n, &GuideOptions::new()), "documentoOrigem");
}
