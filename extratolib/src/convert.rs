//! Текст выписки -> OFX за один вызов.

use crate::{
    clock::Clock,
    error::Result,
    formats::{ofx::Ofx, text::StatementText},
    model::{Account, Statement},
};

/// Разбирает текст и собирает выписку. `None`, если транзакций нет.
pub fn statement_from_text<C: Clock>(
    text: &str,
    account: &Account,
    clock: &C,
) -> Result<Option<Statement>> {
    let transactions = StatementText::with_clock(clock)?.parse_str(text);
    if transactions.is_empty() {
        return Ok(None);
    }
    Ok(Some(Statement::new(account.clone(), transactions)))
}

/// `None` означает «документ не похож на выписку»; вызывающий решает,
/// как об этом сообщить (см. [`crate::error::ExtratoError::NoTransactions`]).
pub fn convert_text<C: Clock>(text: &str, account: &Account, clock: &C) -> Result<Option<String>> {
    let Some(st) = statement_from_text(text, account, clock)? else {
        tracing::info!("no transactions found, OFX not generated");
        return Ok(None);
    };
    tracing::info!(
        transactions = st.transactions.len(),
        bank_id = %account.bank_id,
        "generating OFX"
    );
    Ofx::with_clock(clock).render(&st).map(Some)
}
