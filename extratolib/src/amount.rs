//! Суммы в бразильской записи: `.` разделяет тысячи, `,` отделяет центы.

use crate::error::{ExtratoError, Result};
use rust_decimal::Decimal;

/// `"1.234,56"` -> `1234.56`. Знак, если есть, оставляем на месте.
pub fn parse_brl(raw: &str) -> Result<Decimal> {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    normalized
        .parse::<Decimal>()
        .map_err(|e| ExtratoError::Parse(format!("amount {raw:?}: {e}")))
}

/// Сумма с отдельно захваченным знаком (`"-"` или пусто).
pub fn parse_signed_brl(sign: &str, raw: &str) -> Result<Decimal> {
    let value = parse_brl(raw)?;
    Ok(if sign.trim() == "-" { -value } else { value })
}

/// Ровно два знака после точки, как требует `<TRNAMT>` / `<BALAMT>`.
pub fn format_ofx_amount(amount: Decimal) -> String {
    // -0 печатаем как 0.00
    let amount = if amount.is_zero() { Decimal::ZERO } else { amount };
    format!("{:.2}", amount.round_dp(2))
}
