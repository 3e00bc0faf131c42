use clap::{Parser, ValueEnum};
use extratolib::{
    clock::SystemClock,
    convert::statement_from_text,
    error::{ExtratoError, Result},
    filename::ofx_filename,
    formats::ofx::Ofx,
    model::{Account, AccountType},
    traits::WriteFormat,
};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum InFmt {
    /// PDF по расширению `.pdf` или сигнатуре `%PDF`, иначе текст
    Auto,
    Pdf,
    Text,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AcctType {
    Checking,
    Savings,
    Creditcard,
}

impl From<AcctType> for AccountType {
    fn from(v: AcctType) -> Self {
        match v {
            AcctType::Checking => AccountType::Checking,
            AcctType::Savings => AccountType::Savings,
            AcctType::Creditcard => AccountType::CreditCard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "extrato", version, about = "Банковская выписка (PDF или текст) -> OFX")]
struct Cli {
    /// Входной файл (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Выходной файл (по умолчанию <вход>.ofx рядом со входом или stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Формат входа
    #[arg(long = "input-format", value_enum, default_value_t = InFmt::Auto)]
    in_format: InFmt,

    /// <BANKID>
    #[arg(long, env = "EXTRATO_BANK_ID", default_value = Account::DEFAULT_BANK_ID)]
    bank_id: String,

    /// <ACCTID>
    #[arg(long, env = "EXTRATO_ACCOUNT_ID", default_value = Account::DEFAULT_ACCOUNT_ID)]
    account_id: String,

    /// <ACCTTYPE>
    #[arg(
        long,
        env = "EXTRATO_ACCOUNT_TYPE",
        value_enum,
        ignore_case = true,
        default_value_t = AcctType::Checking
    )]
    account_type: AcctType,

    /// Вывести распознанные транзакции в JSON вместо OFX
    #[arg(long)]
    json: bool,

    /// Подробный лог (debug)
    #[arg(short, long)]
    verbose: bool,

    /// Только ошибки
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    run(cli).inspect_err(|e| tracing::error!("{e}"))
}

fn run(cli: Cli) -> Result<()> {
    let account = Account::new(cli.bank_id, cli.account_id, cli.account_type.into())?;

    // reader
    let bytes = match &cli.input {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let text = if is_pdf(cli.in_format, cli.input.as_deref(), &bytes) {
        tracing::debug!(bytes = bytes.len(), "extracting PDF text layer");
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtratoError::Pdf(e.to_string()))?
    } else {
        String::from_utf8_lossy(&bytes).into_owned()
    };

    let st = statement_from_text(&text, &account, &SystemClock)?
        .ok_or(ExtratoError::NoTransactions)?;

    // writer
    let output = match (cli.output, cli.input.as_deref()) {
        (Some(out), Some(input)) if same_path(&out, input) => {
            return Err(ExtratoError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("output {} would overwrite the input", out.display()),
            )));
        }
        (Some(out), _) => Some(out),
        // JSON по умолчанию в stdout
        (None, _) if cli.json => None,
        (None, input) => input.and_then(default_output),
    };
    let mut writer: Box<dyn Write> = match &output {
        Some(path) => {
            tracing::info!(path = %path.display(), "writing output");
            Box::new(File::create(path)?)
        }
        None => Box::new(io::stdout()),
    };

    if cli.json {
        serde_json::to_writer_pretty(&mut writer, &st.transactions).map_err(io::Error::from)?;
        writeln!(writer)?;
    } else {
        Ofx::new().write(&mut writer, &st)?;
    }

    writer.flush().map_err(ExtratoError::from)
}

/// `<вход>.ofx` рядом со входом; `None` (stdout), если это и есть вход.
fn default_output(input: &Path) -> Option<PathBuf> {
    let out = input.with_file_name(ofx_filename(&input.to_string_lossy()));
    if same_path(&out, input) {
        tracing::warn!(path = %input.display(), "input is already .ofx, writing to stdout");
        return None;
    }
    Some(out)
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.to_string_lossy().eq_ignore_ascii_case(&b.to_string_lossy()),
    }
}

fn is_pdf(fmt: InFmt, path: Option<&Path>, bytes: &[u8]) -> bool {
    match fmt {
        InFmt::Pdf => true,
        InFmt::Text => false,
        InFmt::Auto => {
            let by_ext = path
                .and_then(|p| p.extension())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            by_ext || bytes.starts_with(b"%PDF")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pdf_by_extension_or_magic() {
        assert!(is_pdf(InFmt::Auto, Some(Path::new("a/Extrato.PDF")), b"garbage"));
        assert!(is_pdf(InFmt::Auto, None, b"%PDF-1.7\n..."));
        assert!(!is_pdf(InFmt::Auto, Some(Path::new("extrato.txt")), b"15/01/2026 x 1,00"));
        assert!(is_pdf(InFmt::Pdf, None, b""));
        assert!(!is_pdf(InFmt::Text, Some(Path::new("x.pdf")), b"%PDF"));
    }

    #[test]
    fn default_output_never_targets_the_input() {
        assert_eq!(
            default_output(Path::new("in/extrato.pdf")),
            Some(PathBuf::from("in/extrato.ofx"))
        );
        assert_eq!(default_output(Path::new("in/extrato.ofx")), None);
        assert_eq!(default_output(Path::new("in/EXTRATO.ofx")), None);
        assert_eq!(default_output(Path::new("extrato")), Some(PathBuf::from("extrato.ofx")));
    }

    #[test]
    fn cli_defaults_match_account_defaults() {
        let cli = Cli::parse_from(["extrato"]);
        assert_eq!(cli.bank_id, Account::DEFAULT_BANK_ID);
        assert_eq!(cli.account_id, Account::DEFAULT_ACCOUNT_ID);
        assert_eq!(AccountType::from(cli.account_type), AccountType::Checking);
    }

    #[test]
    fn account_type_ignores_case() {
        let cli = Cli::parse_from(["extrato", "--account-type", "CREDITCARD"]);
        assert_eq!(AccountType::from(cli.account_type), AccountType::CreditCard);
    }
}
