use rust_decimal::Decimal;

use super::fields::{dec_or_zero, is_receita};
use super::types::*;

/// UF pairs GNRE cannot safely automate: São Paulo and Espírito Santo run
/// their own collection regimes for inbound inter-state operations.
const MANUAL_UFS: [&str; 2] = ["SP", "ES"];

/// Decide whether a GNRE is needed for this NF-e and derive its values.
///
/// Pure function over the invoice fields; performs no I/O and never
/// fails. `receita` is an advisory hint (used verbatim when it is a
/// 6-digit code, otherwise inferred from which tax amounts are
/// non-zero); `valor_principal` overrides the derived principal when
/// supplied (lenient decimal, invalid → zero).
///
/// Revenue inference: a positive `vICMSUFDest` selects
/// [`RECEITA_DIFAL`]; failing that, a positive `vST` selects
/// [`RECEITA_ST`]; otherwise no code is resolved.
///
/// The principal follows the resolved code: DIFAL takes `vICMSUFDest`,
/// the two ST codes take `vST`, anything else (including no code) takes
/// their sum. FCP (`vFCPUFDest` + `vFCPST`) is always added to the
/// total but never to the principal.
///
/// Shipments into SP or ES from another UF with a positive total are
/// flagged [`GuideNeed::Manual`]: the resolved code is suppressed so a
/// caller cannot feed it straight into submission without review.
pub fn assess(nfe: &Nfe, receita: Option<&str>, valor_principal: Option<&str>) -> Assessment {
    let uf_dest = uf_norm(nfe.destinatario.uf.as_deref());
    let uf_emit = uf_norm(nfe.emitente.uf.as_deref());

    let v_st = dec_or_zero(nfe.valores.v_st.as_deref());
    let v_icms_uf = dec_or_zero(nfe.valores.v_icms_uf_dest.as_deref());
    let v_fcp_uf = dec_or_zero(nfe.valores.v_fcp_uf_dest.as_deref());
    let v_fcp_st = dec_or_zero(nfe.valores.v_fcp_st.as_deref());

    let receita = match receita.filter(|r| is_receita(r)) {
        Some(r) => Some(r.to_string()),
        None if v_icms_uf > Decimal::ZERO => Some(RECEITA_DIFAL.to_string()),
        None if v_st > Decimal::ZERO => Some(RECEITA_ST.to_string()),
        None => None,
    };

    let principal = match valor_principal {
        Some(v) => dec_or_zero(Some(v)),
        None => principal_for(receita.as_deref(), v_st, v_icms_uf),
    };

    let fcp = v_fcp_uf + v_fcp_st;
    let total = principal + fcp;

    let manual = MANUAL_UFS.contains(&uf_dest.as_str())
        && !uf_emit.is_empty()
        && uf_emit != uf_dest
        && total > Decimal::ZERO;

    let need = if manual {
        GuideNeed::Manual
    } else if total > Decimal::ZERO {
        GuideNeed::Needed
    } else {
        GuideNeed::NotNeeded
    };

    Assessment {
        receita: if manual { None } else { receita },
        valor_principal: principal.round_dp(2),
        valor_fcp: fcp.round_dp(2),
        valor_total: total.round_dp(2),
        need,
    }
}

/// Principal selection by revenue code. Shared verbatim with the lote
/// builder, which re-derives values instead of calling [`assess`].
pub(crate) fn principal_for(receita: Option<&str>, v_st: Decimal, v_icms_uf: Decimal) -> Decimal {
    match receita {
        Some(RECEITA_DIFAL) => v_icms_uf,
        Some(RECEITA_ST) | Some(RECEITA_ST_APURACAO) => v_st,
        _ => v_st + v_icms_uf,
    }
}

fn uf_norm(uf: Option<&str>) -> String {
    uf.unwrap_or("").trim().to_ascii_uppercase()
}
