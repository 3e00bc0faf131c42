//! Унифицированные трэйты чтения/записи на основе std::io::{BufRead, Write}.

use crate::{
    error::Result,
    model::{Statement, Transaction},
};
use std::io::{BufRead, Write};

/// Источник транзакций. Реквизиты счёта в тексте выписки не ищем: их задаёт вызывающий.
pub trait ReadFormat {
    fn read<R: BufRead>(&self, r: R) -> Result<Vec<Transaction>>;
}

pub trait WriteFormat {
    fn write<W: Write>(&self, w: W, st: &Statement) -> Result<()>;
}
