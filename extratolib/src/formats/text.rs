//! Текст выписки (уже извлечённый из PDF) -> список транзакций.
//!
//! Две стратегии:
//! * построчная: таблица регулярок `LINE_PATTERNS`, первая сработавшая строка таблицы побеждает;
//! * блочная (формат Zoop): дата / тип / описание / сумма на четырёх отдельных строках.
//!   Включается, только если построчная не нашла во всём документе ничего.

use crate::{
    amount::parse_signed_brl,
    clock::{Clock, SystemClock},
    error::{ExtratoError, Result},
    model::Transaction,
    traits::ReadFormat,
};
use chrono::NaiveDate;
use regex::Regex;
use std::io::{BufRead, Read};

/// Служебные строки выписки (шапка, итоги, остатки). Сравнение по lowercase.
const SKIP_KEYWORDS: &[&str] = &[
    "saldo do dia",
    "saldo disponível",
    "total",
    "anterior",
    "limite",
    "extrato",
    "agência",
    "conta",
    "período",
    "cliente",
    "cpf",
    "cnpj",
    "solicitado em",
    "ifood.com",
    "atendimento",
    "data movimentação",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateShape {
    /// `DD/MM/YYYY`
    DayMonthYear,
    /// `DD/MM/YY`
    DayMonthShortYear,
    /// `DD/MM`, год берётся из часов
    DayMonth,
    /// `YYYY-MM-DD`
    Iso,
}

impl DateShape {
    fn parse(self, raw: &str, current_year: i32) -> Option<NaiveDate> {
        match self {
            DateShape::DayMonthYear => NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok(),
            DateShape::DayMonthShortYear => {
                // 00..=68 -> 20xx, 69..=99 -> 19xx
                let (day_month, yy) = raw.rsplit_once('/')?;
                let yy: i32 = yy.parse().ok()?;
                let year = if yy < 69 { 2000 + yy } else { 1900 + yy };
                NaiveDate::parse_from_str(&format!("{day_month}/{year}"), "%d/%m/%Y").ok()
            }
            DateShape::DayMonth => {
                NaiveDate::parse_from_str(&format!("{raw}/{current_year}"), "%d/%m/%Y").ok()
            }
            DateShape::Iso => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
        }
    }
}

/// Порядок важен: от самого специфичного к самому общему.
/// Группы: `date`, `desc`, `amt`, необязательная `sign`.
const LINE_PATTERNS: &[(&str, DateShape)] = &[
    (
        r"(?i)^(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<desc>.+?)\s+(?P<sign>-?)R\$\s*(?P<amt>[\d.]+,\d{2})\s*$",
        DateShape::DayMonthYear,
    ),
    (
        r"(?i)^(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<desc>.+?)\s+R\$\s*(?P<amt>-?[\d.]+,\d{2})\s*$",
        DateShape::DayMonthYear,
    ),
    (
        r"(?i)^(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<desc>.+?)\s+(?P<amt>-?[\d.]+,\d{2})\s*$",
        DateShape::DayMonthYear,
    ),
    (
        r"(?i)^(?P<date>\d{2}/\d{2}/\d{2})\s+(?P<desc>.+?)\s+(?P<amt>-?[\d.]+,\d{2})\s*$",
        DateShape::DayMonthShortYear,
    ),
    (
        r"(?i)^(?P<date>\d{2}/\d{2})\s+(?P<desc>.+?)\s+(?P<amt>-?[\d.]+,\d{2})\s*$",
        DateShape::DayMonth,
    ),
    (
        r"(?i)^(?P<date>\d{4}-\d{2}-\d{2})\s+(?P<desc>.+?)\s+(?P<amt>-?[\d.]+,\d{2})\s*$",
        DateShape::Iso,
    ),
];

const BLOCK_DATE: &str = r"^\d{2}/\d{2}/\d{4}$";
const BLOCK_VALUE: &str = r"^(?P<sign>-?)R\$\s*(?P<amt>[\d.]+,\d{2})$";

struct LinePattern {
    re: Regex,
    date: DateShape,
}

impl LinePattern {
    /// `None`, если строка не подошла, дата/сумма не разобрались или сумма нулевая.
    fn apply(&self, line: &str, current_year: i32) -> Option<Transaction> {
        let caps = self.re.captures(line)?;
        let date = self.date.parse(&caps["date"], current_year)?;
        let sign = caps.name("sign").map_or("", |m| m.as_str());
        let amount = parse_signed_brl(sign, &caps["amt"]).ok()?;
        if amount.is_zero() {
            return None;
        }
        Some(Transaction::new(date, caps["desc"].trim(), amount))
    }
}

/// Какой из разборов дал результат.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Lines,
    Blocks,
}

/// Парсер текста выписки. Регулярки компилируются один раз в конструкторе.
pub struct StatementText<C = SystemClock> {
    line_patterns: Vec<LinePattern>,
    block_date: Regex,
    block_value: Regex,
    clock: C,
}

impl<C: Clock> StatementText<C> {
    pub fn with_clock(clock: C) -> Result<Self> {
        let compile = |src: &str| Regex::new(src).map_err(|e| ExtratoError::Parse(e.to_string()));

        let line_patterns = LINE_PATTERNS
            .iter()
            .map(|&(src, date)| -> Result<LinePattern> {
                Ok(LinePattern { re: compile(src)?, date })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            line_patterns,
            block_date: compile(BLOCK_DATE)?,
            block_value: compile(BLOCK_VALUE)?,
            clock,
        })
    }

    pub fn parse_str(&self, text: &str) -> Vec<Transaction> {
        self.parse_with_layout(text).0
    }

    /// То же, что `parse_str`, плюс какой разбор сработал (`None`, если ничего не нашлось).
    pub fn parse_with_layout(&self, text: &str) -> (Vec<Transaction>, Option<Layout>) {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let by_lines = self.match_lines(&lines);
        if !by_lines.is_empty() {
            tracing::debug!(count = by_lines.len(), "transactions matched line by line");
            return (by_lines, Some(Layout::Lines));
        }

        tracing::debug!("no line matched, trying four-line blocks");
        let by_blocks = self.match_blocks(&lines);
        if by_blocks.is_empty() {
            tracing::debug!(lines = lines.len(), "no transactions recognized");
            (by_blocks, None)
        } else {
            tracing::debug!(count = by_blocks.len(), "transactions matched as blocks");
            (by_blocks, Some(Layout::Blocks))
        }
    }

    fn match_lines(&self, lines: &[&str]) -> Vec<Transaction> {
        let current_year = self.clock.year();
        lines
            .iter()
            .filter(|line| {
                let skip = is_boilerplate(line);
                if skip {
                    tracing::trace!(line = %line, "skipping boilerplate line");
                }
                !skip
            })
            .filter_map(|line| {
                self.line_patterns
                    .iter()
                    .find_map(|p| p.apply(line, current_year))
            })
            .collect()
    }

    fn match_blocks(&self, lines: &[&str]) -> Vec<Transaction> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            if i + 3 < lines.len() && self.block_date.is_match(lines[i]) {
                if let Some(t) = self.match_block(&lines[i..i + 4]) {
                    out.push(t);
                    i += 4;
                    continue;
                }
                tracing::trace!(line = i, "malformed block, shifting by one line");
            }
            i += 1;
        }
        out
    }

    fn match_block(&self, block: &[&str]) -> Option<Transaction> {
        let [date, kind, desc, value] = block else {
            return None;
        };
        let caps = self.block_value.captures(value)?;
        let date = NaiveDate::parse_from_str(date, "%d/%m/%Y").ok()?;
        let amount = parse_signed_brl(&caps["sign"], &caps["amt"]).ok()?;
        Some(Transaction::new(date, format!("{kind} - {desc}"), amount))
    }
}

fn is_boilerplate(line: &str) -> bool {
    let lower = line.to_lowercase();
    SKIP_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

impl<C: Clock> ReadFormat for StatementText<C> {
    fn read<R: BufRead>(&self, mut r: R) -> Result<Vec<Transaction>> {
        let mut text = String::new();
        r.read_to_string(&mut text)?;
        Ok(self.parse_str(&text))
    }
}
