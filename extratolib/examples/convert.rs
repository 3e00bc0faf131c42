use extratolib::{clock::SystemClock, convert::convert_text, model::Account};
use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: текст выписки (stdin) -> OFX (stdout)
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    match convert_text(&text, &Account::default(), &SystemClock)? {
        Some(ofx) => print!("{ofx}"),
        None => eprintln!("{}", extratolib::error::ExtratoError::NoTransactions),
    }
    Ok(())
}
