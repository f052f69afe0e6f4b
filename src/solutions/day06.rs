use std::ops::Range;

use anyhow::{bail, Context, Result};

use crate::parse_u64_from_bytes;

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Mul,
}

impl Op {
    fn apply(self, operands: impl IntoIterator<Item = u64>) -> Result<u64> {
        let mut operands = operands.into_iter();
        let result = match self {
            Op::Add => operands.try_fold(0u64, u64::checked_add),
            Op::Mul => operands.try_fold(1u64, u64::checked_mul),
        };
        result.with_context(|| format!("{:?} overflows", self))
    }
}

fn parse_operand(digits: &[u8]) -> Result<u64> {
    parse_u64_from_bytes(digits)
        .with_context(|| format!("operand {} is too large", String::from_utf8_lossy(digits)))
}

struct Worksheet<'a> {
    rows: Vec<&'a [u8]>,
    ops: &'a [u8],
    width: usize,
}

impl<'a> Worksheet<'a> {
    fn parse(input: &'a str) -> Result<Self> {
        let mut rows: Vec<&[u8]> = input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::as_bytes)
            .collect();
        let ops = rows.pop().context("empty worksheet")?;
        if rows.is_empty() {
            bail!("worksheet has no number rows");
        }
        let width = rows.iter().chain([&ops]).map(|r| r.len()).max().unwrap_or(0);
        Ok(Self { rows, ops, width })
    }

    /// Space when the row is shorter than the sheet.
    fn at(row: &[u8], col: usize) -> u8 {
        row.get(col).copied().unwrap_or(b' ')
    }

    fn blank_column(&self, col: usize) -> bool {
        self.rows.iter().chain([&self.ops]).all(|r| Self::at(r, col) == b' ')
    }

    /// Column ranges of the individual problems.
    fn problems(&self) -> Vec<Range<usize>> {
        let mut problems = Vec::new();
        let mut start = None;
        for col in 0..self.width {
            match (self.blank_column(col), start) {
                (true, Some(s)) => {
                    problems.push(s..col);
                    start = None;
                }
                (false, None) => start = Some(col),
                _ => {}
            }
        }
        if let Some(s) = start {
            problems.push(s..self.width);
        }
        problems
    }

    fn op(&self, cols: &Range<usize>) -> Result<Op> {
        let mut symbols = cols.clone().map(|c| Self::at(self.ops, c)).filter(|&b| b != b' ');
        let op = match symbols.next() {
            Some(b'+') => Op::Add,
            Some(b'*') => Op::Mul,
            Some(b) => bail!("unsupported operator {:?}", b as char),
            None => bail!("problem at columns {:?} has no operator", cols),
        };
        if symbols.next().is_some() {
            bail!("problem at columns {:?} has more than one operator", cols);
        }
        Ok(op)
    }

    /// Numbers written left to right, one per row.
    fn row_operands(&self, cols: &Range<usize>) -> Result<Vec<u64>> {
        let mut operands = Vec::new();
        for row in &self.rows {
            let cell = row.get(cols.start..cols.end.min(row.len())).unwrap_or_default();
            let digits = std::str::from_utf8(cell)?.trim().as_bytes();
            if digits.is_empty() {
                continue;
            }
            if !digits.iter().all(u8::is_ascii_digit) {
                bail!("invalid number {:?}", String::from_utf8_lossy(digits));
            }
            operands.push(parse_operand(digits)?);
        }
        Ok(operands)
    }

    /// Numbers written top to bottom, one per column.
    fn column_operands(&self, cols: &Range<usize>) -> Result<Vec<u64>> {
        let mut operands = Vec::new();
        for col in cols.clone() {
            let mut digits = Vec::with_capacity(self.rows.len());
            for row in &self.rows {
                match Self::at(row, col) {
                    b' ' => {}
                    b @ b'0'..=b'9' => digits.push(b),
                    b => bail!("invalid digit {:?} in column {}", b as char, col),
                }
            }
            if !digits.is_empty() {
                operands.push(parse_operand(&digits)?);
            }
        }
        Ok(operands)
    }
}

fn grand_total(
    input: &str,
    operands: impl Fn(&Worksheet<'_>, &Range<usize>) -> Result<Vec<u64>>,
) -> Result<u64> {
    let sheet = Worksheet::parse(input)?;
    let mut total = 0u64;
    for cols in sheet.problems() {
        let answer = sheet.op(&cols)?.apply(operands(&sheet, &cols)?)?;
        total = total.checked_add(answer).context("grand total overflows")?;
    }
    Ok(total)
}

/// Problems read row by row.
pub fn part1(input: &str) -> Result<u64> {
    grand_total(input, |sheet, cols| sheet.row_operands(cols))
}

/// Problems read column by column.
pub fn part2(input: &str) -> Result<u64> {
    grand_total(input, |sheet, cols| sheet.column_operands(cols))
}
