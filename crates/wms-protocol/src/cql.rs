//! CQL_FILTER evaluation against feature rows.
//!
//! The supported language is a small fixed subset, evaluated straight off the
//! token stream without building an expression tree:
//!
//! ```text
//! clause   := column op operand
//! op       := == | != | < | > | <= | >= | LIKE | IN | BETWEEN
//! filter   := clause ( [AND | OR | NOT] clause )*
//! ```
//!
//! Tokens are separated by single spaces. Clauses fold left to right into one
//! running boolean:
//! - `AND` (or no keyword) replaces it with the clause result
//! - `OR` sets it when the clause is true
//! - `NOT` clears it when the clause is true
//!
//! Once the running value is false, the next `AND`/`NOT` clause ends evaluation.
//! There is no precedence and no grouping. Malformed input never errors: an
//! unknown column, unknown operator, missing token or non-numeric operand ends
//! evaluation and the running value is the result.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::feature::{ColumnType, FeatureRow, FieldValue};

/// Substrings separating the items of an IN list such as `('A', 'B','C')`.
const IN_LIST_DELIMITERS: [&str; 4] = ["('", "', '", "','", "')"];

/// A tokenized CQL_FILTER, reusable across rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CqlFilter {
    tokens: Vec<String>,
}

impl CqlFilter {
    pub fn new(text: &str) -> Self {
        Self {
            tokens: text
                .split(' ')
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// True when there are no tokens, in which case every row matches.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Evaluate the filter against one row.
    pub fn matches<R: FeatureRow + ?Sized>(&self, row: &R) -> bool {
        let mut cursor = Cursor::new(&self.tokens);
        let mut acc = true;

        while !cursor.is_done() {
            let combine = match cursor.peek() {
                Some("AND") => {
                    cursor.advance();
                    Combine::Replace
                }
                Some("OR") => {
                    cursor.advance();
                    Combine::Union
                }
                Some("NOT") => {
                    cursor.advance();
                    Combine::Negate
                }
                _ => Combine::Replace,
            };

            if !acc && combine != Combine::Union {
                break;
            }

            match eval_clause(&mut cursor, row) {
                Ok(clause) => acc = combine.fold(acc, clause),
                Err(stop) => {
                    debug!(reason = %stop, result = acc, "CQL filter evaluation stopped early");
                    break;
                }
            }
        }

        acc
    }

    /// Keep the rows the filter matches, in order.
    pub fn select<I, R>(&self, rows: I) -> Vec<R>
    where
        I: IntoIterator<Item = R>,
        R: FeatureRow,
    {
        let mut scanned = 0usize;
        let selected: Vec<R> = rows
            .into_iter()
            .inspect(|_| scanned += 1)
            .filter(|row| self.matches(row))
            .collect();
        debug!(
            filter = %self,
            scanned = scanned,
            matched = selected.len(),
            "Applied CQL filter"
        );
        selected
    }
}

impl fmt::Display for CqlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

/// Evaluate `filter` against `row` without keeping the tokenized form.
pub fn matches<R: FeatureRow + ?Sized>(row: &R, filter: &str) -> bool {
    CqlFilter::new(filter).matches(row)
}

/// How a clause result folds into the running value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combine {
    Replace,
    Union,
    Negate,
}

impl Combine {
    fn fold(self, acc: bool, clause: bool) -> bool {
        match self {
            Combine::Replace => clause,
            Combine::Union => acc || clause,
            Combine::Negate => acc && !clause,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Between,
    Like,
    In,
}

impl Comparator {
    fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "==" => Comparator::Eq,
            "!=" => Comparator::Ne,
            "<" => Comparator::Lt,
            ">" => Comparator::Gt,
            "<=" => Comparator::Le,
            ">=" => Comparator::Ge,
            "BETWEEN" => Comparator::Between,
            "LIKE" => Comparator::Like,
            "IN" => Comparator::In,
            _ => return None,
        })
    }

    /// Apply a binary comparator to an ordering. Non-binary comparators never hold.
    fn holds(self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return self == Comparator::Ne;
        };
        match self {
            Comparator::Eq => ordering == Ordering::Equal,
            Comparator::Ne => ordering != Ordering::Equal,
            Comparator::Lt => ordering == Ordering::Less,
            Comparator::Gt => ordering == Ordering::Greater,
            Comparator::Le => ordering != Ordering::Greater,
            Comparator::Ge => ordering != Ordering::Less,
            Comparator::Between | Comparator::Like | Comparator::In => false,
        }
    }
}

/// Why evaluation ended before the last token.
#[derive(Debug, Error)]
enum Stop {
    #[error("missing {0}")]
    MissingToken(&'static str),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("unknown comparator '{0}'")]
    UnknownComparator(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

struct Cursor<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [String]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.advance();
        Some(token)
    }

    /// Take the next token, naming what was expected if there is none.
    fn expect(&mut self, what: &'static str) -> Result<&'a str, Stop> {
        self.next().ok_or(Stop::MissingToken(what))
    }

    /// Re-join tokens up to and including the first one holding ')'.
    fn take_paren_list(&mut self) -> Option<String> {
        let mut list = self.next()?.to_string();
        while !list.contains(')') {
            list.push(' ');
            list.push_str(self.next()?);
        }
        Some(list)
    }
}

fn eval_clause<R: FeatureRow + ?Sized>(cursor: &mut Cursor<'_>, row: &R) -> Result<bool, Stop> {
    let column = cursor.expect("column name")?;
    let index = row
        .column_index(column)
        .ok_or_else(|| Stop::UnknownColumn(column.to_string()))?;
    let op_token = cursor.expect("comparator")?;
    let op = Comparator::parse(op_token)
        .ok_or_else(|| Stop::UnknownComparator(op_token.to_string()))?;

    let column_type = row.column_type(index);
    let value = row.value(index);

    match op {
        Comparator::Like => {
            // Pattern matching is not supported; the clause always holds.
            cursor.expect("LIKE pattern")?;
            Ok(true)
        }
        Comparator::In => {
            let list = cursor
                .take_paren_list()
                .ok_or(Stop::MissingToken("closing ')' of IN list"))?;
            let text = value.to_text();
            Ok(split_in_list(&list).contains(&text.as_str()))
        }
        Comparator::Between => {
            let lower = cursor.expect("BETWEEN lower bound")?;
            cursor.expect("BETWEEN separator")?;
            let upper = cursor.expect("BETWEEN upper bound")?;
            between(column_type, value, lower, upper)
        }
        _ => {
            let operand = cursor.expect("operand")?;
            compare(op, column_type, value, operand)
        }
    }
}

fn compare(
    op: Comparator,
    column_type: ColumnType,
    value: FieldValue<'_>,
    operand: &str,
) -> Result<bool, Stop> {
    if column_type.is_string() {
        let text = value.to_text();
        return Ok(op.holds(Some(text.as_str().cmp(operand))));
    }
    let lhs = value_as_f64(value)?;
    let rhs = parse_number(operand)?;
    Ok(op.holds(lhs.partial_cmp(&rhs)))
}

/// Exclusive on both ends.
fn between(
    column_type: ColumnType,
    value: FieldValue<'_>,
    lower: &str,
    upper: &str,
) -> Result<bool, Stop> {
    if column_type.is_string() {
        let text = value.to_text();
        return Ok(lower < text.as_str() && text.as_str() < upper);
    }
    let v = value_as_f64(value)?;
    Ok(parse_number(lower)? < v && v < parse_number(upper)?)
}

fn value_as_f64(value: FieldValue<'_>) -> Result<f64, Stop> {
    value
        .to_f64()
        .ok_or_else(|| Stop::NotANumber(value.to_text()))
}

fn parse_number(token: &str) -> Result<f64, Stop> {
    token
        .parse()
        .map_err(|_| Stop::NotANumber(token.to_string()))
}

/// Split a re-joined IN list into its quoted items, dropping empty pieces.
///
/// At each position the delimiters are tried in [`IN_LIST_DELIMITERS`] order.
fn split_in_list(list: &str) -> Vec<&str> {
    let bytes = list.as_bytes();
    let mut items = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let delimiter = IN_LIST_DELIMITERS
            .iter()
            .find(|d| bytes[i..].starts_with(d.as_bytes()));
        match delimiter {
            Some(d) => {
                if i > start {
                    items.push(&list[start..i]);
                }
                i += d.len();
                start = i;
            }
            None => i += 1,
        }
    }
    if start < list.len() {
        items.push(&list[start..]);
    }
    items
}
