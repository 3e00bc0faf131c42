use chrono::NaiveDate;
use extratolib::{
    clock::FixedClock,
    convert::{convert_text, statement_from_text},
    error::ExtratoError,
    model::{Account, AccountType},
};
use rust_decimal::Decimal;

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2026, 1, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap(),
    )
}

#[test]
fn convert_statement_text_to_ofx() {
    let text = "15/01/2026 Compra no mercado R$ 150,00\n16/01/2026 Estorno -R$ 200,00\n";
    let account = Account::new("032", "12345678", AccountType::Checking).unwrap();

    let ofx = convert_text(text, &account, &clock())
        .expect("convert")
        .expect("transactions found");

    assert!(ofx.contains("OFXHEADER"));
    assert!(ofx.contains("<BANKID>032\n"));
    assert!(ofx.contains("<ACCTID>12345678\n"));
    assert!(ofx.contains("<TRNAMT>150.00\n"));
    assert!(ofx.contains("<TRNAMT>-200.00\n"));
    assert!(ofx.contains("<BALAMT>-50.00\n"));
    assert!(ofx.contains("<DTSERVER>20260131235959\n"));
}

#[test]
fn convert_without_transactions_returns_none() {
    let account = Account::default();
    let out = convert_text("Documento qualquer\nsem valores\n", &account, &clock()).unwrap();
    assert!(out.is_none());
    assert!(statement_from_text("", &account, &clock()).unwrap().is_none());
}

#[test]
fn balance_equals_sum_of_parsed_amounts() {
    let text = "\
01/01 Pix A 10,10
02/01 Pix B -3,05
03/01 Pix C 1.000,00
04/01 Pix D -0,05
";
    let st = statement_from_text(text, &Account::default(), &clock())
        .unwrap()
        .unwrap();
    let sum: Decimal = st.transactions.iter().map(|t| t.amount).sum();
    assert_eq!(sum, Decimal::new(100700, 2));
    assert_eq!(st.balance(), Some(sum));
    // год для DD/MM берётся из часов
    assert!(st.transactions.iter().all(|t| t.date.format("%Y").to_string() == "2026"));
}

#[test]
fn convert_reports_balance_overflow_instead_of_panicking() {
    let text = "\
01/01/2026 A R$ 50.000.000.000.000.000.000.000.000.000,00
02/01/2026 B R$ 50.000.000.000.000.000.000.000.000.000,00
";
    let res = convert_text(text, &Account::default(), &clock());
    assert!(matches!(res, Err(ExtratoError::Parse(_))));
}
