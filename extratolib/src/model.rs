//! Доменные модели: транзакция, счёт, выписка.

use crate::error::{ExtratoError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebitCredit {
    Debit,
    Credit,
}

/// Одна операция из выписки. Знак суммы: `+` приход, `-` расход.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
        }
    }

    /// Нулевая сумма считается приходом.
    pub fn dc(&self) -> DebitCredit {
        if self.amount >= Decimal::ZERO {
            DebitCredit::Credit
        } else {
            DebitCredit::Debit
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    CreditCard,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "CHECKING",
            AccountType::Savings => "SAVINGS",
            AccountType::CreditCard => "CREDITCARD",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ExtratoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CHECKING" => Ok(AccountType::Checking),
            "SAVINGS" => Ok(AccountType::Savings),
            "CREDITCARD" => Ok(AccountType::CreditCard),
            _ => Err(ExtratoError::UnknownAccountType(s.to_string())),
        }
    }
}

/// Реквизиты счёта, которые попадают в `<BANKACCTFROM>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub bank_id: String,
    pub account_id: String,
    pub account_type: AccountType,
}

impl Account {
    pub const DEFAULT_BANK_ID: &'static str = "0000";
    pub const DEFAULT_ACCOUNT_ID: &'static str = "0000000000";

    pub fn new(
        bank_id: impl Into<String>,
        account_id: impl Into<String>,
        account_type: AccountType,
    ) -> Result<Self> {
        let bank_id = bank_id.into();
        let account_id = account_id.into();
        if bank_id.trim().is_empty() {
            return Err(ExtratoError::InvalidAccount("bank_id"));
        }
        if account_id.trim().is_empty() {
            return Err(ExtratoError::InvalidAccount("account_id"));
        }
        Ok(Self {
            bank_id,
            account_id,
            account_type,
        })
    }
}

impl Default for Account {
    fn default() -> Self {
        Self {
            bank_id: Self::DEFAULT_BANK_ID.into(),
            account_id: Self::DEFAULT_ACCOUNT_ID.into(),
            account_type: AccountType::Checking,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    pub account: Account,
    pub transactions: Vec<Transaction>,
}

impl Statement {
    pub fn new(account: Account, transactions: Vec<Transaction>) -> Self {
        Self {
            account,
            transactions,
        }
    }

    /// Первая и последняя даты периода; `None` для пустой выписки.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.transactions.iter().map(|t| t.date).min()?;
        let end = self.transactions.iter().map(|t| t.date).max()?;
        Some((start, end))
    }

    /// Сумма всех операций; `None`, если не помещается в `Decimal`.
    pub fn balance(&self) -> Option<Decimal> {
        self.transactions
            .iter()
            .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.amount))
    }
}
