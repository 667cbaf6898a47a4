//! Translation of HQL statements into broker records.
//!
//! Supported forms:
//! - `INSERT INTO t VALUES ('row', 'cf:cq', 'value'), ('2008-01-01 00:00:00', 'row', 'cf', 'v')`
//! - `SELECT * FROM t WHERE ROW >= 'a' AND ROW < 'm' OR ROW = 'z' LIMIT 10`

use itertools::Itertools;
use sqlparser::{
    ast::{
        BinaryOperator, Expr, Query, Select, SelectItem, SetExpr, Statement, TableFactor,
        UnaryOperator, Value,
    },
    dialect::GenericDialect,
    parser::Parser,
};
use tracing::debug;

use super::{
    cell::make_cell_from_text,
    error::{Result, ThriftError},
    types::{Cell, CellFlag, HqlResult, RowInterval, ScanSpec},
};

static DIALECT: GenericDialect = GenericDialect {};

#[derive(Debug, Clone, PartialEq)]
pub enum Hql {
    Insert { table: String, cells: Vec<Cell> },
    Select { table: String, scan_spec: ScanSpec },
}

impl Hql {
    pub fn parse(sql: impl AsRef<str>) -> Result<Self> {
        let mut ast = Parser::parse_sql(&DIALECT, sql.as_ref())?;
        let statement = match (ast.pop(), ast.pop()) {
            (Some(s), None) => s,
            _ => return Err(unsupported("only a single statement is currently supported")),
        };
        let hql: Hql = (&statement).try_into()?;
        debug!(?hql, "translated HQL");
        Ok(hql)
    }

    pub fn table(&self) -> &str {
        match self {
            Hql::Insert { table, .. } | Hql::Select { table, .. } => table,
        }
    }

    pub fn into_result(self) -> HqlResult {
        match self {
            Hql::Insert { cells, .. } => HqlResult {
                cells: Some(cells),
                ..Default::default()
            },
            Hql::Select { table, scan_spec } => HqlResult {
                results: Some(vec![format!("{table}: {scan_spec}")]),
                ..Default::default()
            },
        }
    }
}

impl TryFrom<&Statement> for Hql {
    type Error = ThriftError;

    fn try_from(value: &Statement) -> Result<Self> {
        match value {
            Statement::Insert {
                table_name, source, ..
            } => {
                let table = single_name(&table_name.0)?;
                let SetExpr::Values(values) = source.body.as_ref() else {
                    return Err(unsupported("INSERT requires a VALUES list"));
                };
                let cells: Vec<Cell> = values.rows.iter().map(|row| insert_cell(row)).try_collect()?;
                Ok(Hql::Insert { table, cells })
            }
            Statement::Query(query) => select(query),
            s => Err(unsupported(format!("{s} is not currently supported"))),
        }
    }
}

fn select(query: &Query) -> Result<Hql> {
    let SetExpr::Select(select) = query.body.as_ref() else {
        return Err(unsupported(format!("{} queries are not currently supported", query.body)));
    };
    if !select
        .projection
        .iter()
        .all(|item| matches!(item, SelectItem::Wildcard(_)))
    {
        return Err(unsupported("only SELECT * is currently supported"));
    }
    let table = source_table(select)?;

    let mut scan_spec = ScanSpec {
        row_intervals: select
            .selection
            .as_ref()
            .map(row_intervals)
            .transpose()?,
        ..Default::default()
    };
    if let Some(limit) = &query.limit {
        scan_spec.row_limit = Some(match literal(limit)?.map(|l| l.parse::<i32>()) {
            Some(Ok(n)) => n,
            _ => return Err(unsupported(format!("{limit} is not a valid LIMIT"))),
        });
    }
    Ok(Hql::Select { table, scan_spec })
}

fn source_table(select: &Select) -> Result<String> {
    if select.from.len() != 1 {
        return Err(unsupported("only a single source is currently supported"));
    }
    match &select.from[0].relation {
        TableFactor::Table { name, .. } => single_name(&name.0),
        _ => Err(unsupported("Only table sources are currently supported")),
    }
}

fn single_name(parts: &[sqlparser::ast::Ident]) -> Result<String> {
    match parts {
        [ident] => Ok(ident.value.to_owned()),
        _ => Err(unsupported("only single value table names are supported")),
    }
}

// (row, column, value) or (timestamp, row, column, value)
fn insert_cell(exprs: &[Expr]) -> Result<Cell> {
    let (timestamp, row, column, value) = match exprs {
        [row, column, value] => (None, row, column, value),
        [ts, row, column, value] => (literal(ts)?, row, column, value),
        _ => {
            return Err(unsupported(format!(
                "VALUES tuples take 3 or 4 items, got {}",
                exprs.len()
            )))
        }
    };
    let row = required(row, "row")?;
    let column = required(column, "column")?;
    let value = string(value, "value")?.unwrap_or_default();
    let (family, qualifier) = match column.split_once(':') {
        Some((family, qualifier)) => (family, Some(qualifier)),
        None => (column.as_str(), None),
    };

    make_cell_from_text(
        &row,
        family,
        qualifier,
        value,
        timestamp.as_deref(),
        None,
        CellFlag::Insert,
    )
}

fn required(expr: &Expr, what: &str) -> Result<String> {
    string(expr, what)?.ok_or_else(|| unsupported(format!("{what} can not be NULL")))
}

/// Text of a string literal; `None` for NULL.
fn string(expr: &Expr, what: &str) -> Result<Option<String>> {
    match expr {
        Expr::Value(Value::SingleQuotedString(s)) | Expr::Value(Value::DoubleQuotedString(s)) => {
            Ok(Some(s.to_owned()))
        }
        Expr::Value(Value::Null) => Ok(None),
        // double quoted strings come through as quoted identifiers
        Expr::Identifier(ident) if ident.quote_style.is_some() => Ok(Some(ident.value.to_owned())),
        e => Err(unsupported(format!("{what} must be a string literal, got {e}"))),
    }
}

/// Text of a string or number literal; `None` for NULL.
fn literal(expr: &Expr) -> Result<Option<String>> {
    Ok(match expr {
        Expr::Value(Value::Number(s, _)) => Some(s.to_owned()),
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr,
        } => match expr.as_ref() {
            Expr::Value(Value::Number(n, _)) => Some(format!("-{n}")),
            e => return Err(unsupported(format!("{e} is an unsupported literal"))),
        },
        e => return string(e, "literal"),
    })
}

fn row_intervals(expr: &Expr) -> Result<Vec<RowInterval>> {
    match expr {
        Expr::Nested(inner) => row_intervals(inner),
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Or,
            right,
        } => {
            let mut intervals = row_intervals(left)?;
            intervals.extend(row_intervals(right)?);
            Ok(intervals)
        }
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And,
            right,
        } => match (row_intervals(left)?.as_slice(), row_intervals(right)?.as_slice()) {
            ([l], [r]) => Ok(vec![narrow(l, r)]),
            _ => Err(unsupported("AND can not combine OR'ed row ranges")),
        },
        Expr::BinaryOp { left, op, right } => {
            let (op, key) = match (is_row(left), is_row(right)) {
                (true, false) => (op.clone(), required(right, "row key")?),
                (false, true) => (flip(op)?, required(left, "row key")?),
                _ => return Err(unsupported(format!("{expr} must compare ROW to a key"))),
            };
            row_comparison(&op, key).map(|ri| vec![ri])
        }
        e => Err(unsupported(format!("{e} is an unsupported row predicate"))),
    }
}

fn is_row(expr: &Expr) -> bool {
    matches!(expr, Expr::Identifier(ident) if ident.quote_style.is_none() && ident.value.eq_ignore_ascii_case("row"))
}

fn flip(op: &BinaryOperator) -> Result<BinaryOperator> {
    Ok(match op {
        BinaryOperator::Eq => BinaryOperator::Eq,
        BinaryOperator::Lt => BinaryOperator::Gt,
        BinaryOperator::LtEq => BinaryOperator::GtEq,
        BinaryOperator::Gt => BinaryOperator::Lt,
        BinaryOperator::GtEq => BinaryOperator::LtEq,
        o => return Err(unsupported(format!("{o} is an unsupported operator"))),
    })
}

fn row_comparison(op: &BinaryOperator, key: String) -> Result<RowInterval> {
    let start = |inclusive| RowInterval {
        start_row: Some(key.clone()),
        start_inclusive: Some(inclusive),
        ..Default::default()
    };
    let end = |inclusive| RowInterval {
        end_row: Some(key.clone()),
        end_inclusive: Some(inclusive),
        ..Default::default()
    };
    Ok(match op {
        BinaryOperator::Eq => RowInterval {
            start_row: Some(key.clone()),
            start_inclusive: Some(true),
            end_row: Some(key.clone()),
            end_inclusive: Some(true),
        },
        BinaryOperator::Gt => start(false),
        BinaryOperator::GtEq => start(true),
        BinaryOperator::Lt => end(false),
        BinaryOperator::LtEq => end(true),
        o => return Err(unsupported(format!("{o} is an unsupported operator"))),
    })
}

/// Intersection of two intervals: the later start and the earlier end.
fn narrow(l: &RowInterval, r: &RowInterval) -> RowInterval {
    let (start_row, start_inclusive) = tighter(
        (&l.start_row, l.start_inclusive),
        (&r.start_row, r.start_inclusive),
        |a, b| a > b,
    );
    let (end_row, end_inclusive) = tighter(
        (&l.end_row, l.end_inclusive),
        (&r.end_row, r.end_inclusive),
        |a, b| a < b,
    );
    RowInterval {
        start_row,
        start_inclusive,
        end_row,
        end_inclusive,
    }
}

fn tighter(
    l: (&Option<String>, Option<bool>),
    r: (&Option<String>, Option<bool>),
    beats: impl Fn(&str, &str) -> bool,
) -> (Option<String>, Option<bool>) {
    let pick = match (l.0, r.0) {
        (None, _) => r,
        (_, None) => l,
        (Some(a), Some(b)) if beats(a.as_str(), b.as_str()) => l,
        (Some(a), Some(b)) if beats(b.as_str(), a.as_str()) => r,
        // same key, an exclusive bound is the tighter one
        _ => match l.1 {
            Some(false) => l,
            _ => r,
        },
    };
    (pick.0.clone(), pick.1)
}

fn unsupported(message: impl Into<String>) -> ThriftError {
    ThriftError::Hql(message.into())
}
