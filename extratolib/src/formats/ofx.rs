//! OFX 1.0.2 (SGML) для импорта выписки в бухгалтерские программы.
//! Валюта BRL, язык POR. Теги без закрывающих пар у листовых элементов.

use crate::{
    amount::format_ofx_amount,
    clock::{Clock, SystemClock},
    error::{ExtratoError, Result},
    model::{DebitCredit, Statement},
    traits::WriteFormat,
};
use std::fmt::Write as FmtWrite;
use std::io::Write;

/// Ограничение поля `<MEMO>`, в символах.
pub const MEMO_MAX_CHARS: usize = 255;

const HEADER: &str = "OFXHEADER:100
DATA:OFXSGML
VERSION:102
SECURITY:NONE
ENCODING:USASCII
CHARSET:1252
COMPRESSION:NONE
OLDFILEUID:NONE
NEWFILEUID:NONE
";

pub struct Ofx<C = SystemClock> {
    clock: C,
    trnuid: Option<String>,
}

impl Ofx<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Ofx<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Ofx<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            trnuid: None,
        }
    }

    /// Фиксированный `<TRNUID>` вместо случайного.
    pub fn with_trnuid(mut self, trnuid: impl Into<String>) -> Self {
        self.trnuid = Some(trnuid.into());
        self
    }

    fn trnuid(&self) -> String {
        match &self.trnuid {
            Some(id) => id.clone(),
            None => uuid::Uuid::new_v4().simple().to_string(),
        }
    }

    /// Полный документ. Для пустой выписки период и `<DTASOF>`: сегодняшняя дата по часам.
    /// Ошибка, если итог `<BALAMT>` не помещается в `Decimal`.
    pub fn render(&self, st: &Statement) -> Result<String> {
        let balance = st
            .balance()
            .ok_or_else(|| ExtratoError::Parse("ledger balance overflows".into()))?;
        let now = self.clock.now();
        let (start, end) = st.date_range().unwrap_or_else(|| {
            let today = self.clock.today();
            (today, today)
        });

        let mut s = String::with_capacity(1024 + st.transactions.len() * 128);
        s.push_str(HEADER);
        s.push('\n');

        let _ = write!(
            s,
            "<OFX>
<SIGNONMSGSRSV1>
<SONRS>
<STATUS>
<CODE>0
<SEVERITY>INFO
</STATUS>
<DTSERVER>{dtserver}
<LANGUAGE>POR
</SONRS>
</SIGNONMSGSRSV1>
<BANKMSGSRSV1>
<STMTTRNRS>
<TRNUID>{trnuid}
<STATUS>
<CODE>0
<SEVERITY>INFO
</STATUS>
<STMTRS>
<CURDEF>BRL
<BANKACCTFROM>
<BANKID>{bank_id}
<ACCTID>{account_id}
<ACCTTYPE>{account_type}
</BANKACCTFROM>
<BANKTRANLIST>
<DTSTART>{dtstart}
<DTEND>{dtend}
",
            dtserver = now.format("%Y%m%d%H%M%S"),
            trnuid = self.trnuid(),
            bank_id = st.account.bank_id,
            account_id = st.account.account_id,
            account_type = st.account.account_type,
            dtstart = start.format("%Y%m%d"),
            dtend = end.format("%Y%m%d"),
        );

        for (i, t) in st.transactions.iter().enumerate() {
            let trntype = match t.dc() {
                DebitCredit::Credit => "CREDIT",
                DebitCredit::Debit => "DEBIT",
            };
            let posted = t.date.format("%Y%m%d");
            let memo: String = t.description.chars().take(MEMO_MAX_CHARS).collect();
            let _ = write!(
                s,
                "<STMTTRN>
<TRNTYPE>{trntype}
<DTPOSTED>{posted}
<TRNAMT>{amount}
<FITID>{posted}{i:06}
<MEMO>{memo}
</STMTTRN>
",
                amount = format_ofx_amount(t.amount),
            );
        }

        let _ = write!(
            s,
            "</BANKTRANLIST>
<LEDGERBAL>
<BALAMT>{balance}
<DTASOF>{dtasof}
</LEDGERBAL>
</STMTRS>
</STMTTRNRS>
</BANKMSGSRSV1>
</OFX>",
            balance = format_ofx_amount(balance),
            dtasof = end.format("%Y%m%d"),
        );
        Ok(s)
    }
}

impl<C: Clock> WriteFormat for Ofx<C> {
    fn write<W: Write>(&self, mut w: W, st: &Statement) -> Result<()> {
        w.write_all(self.render(st)?.as_bytes())?;
        Ok(())
    }
}
