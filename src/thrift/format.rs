//! Diagnostic rendering of the broker records.
//!
//! Only fields that are present are written, always in declaration order, so the same
//! record renders to the same text no matter how it was built.

use std::fmt;

use super::types::{Cell, CellInterval, ClientException, HqlResult, RowInterval, ScanSpec};

fn quoted(f: &mut fmt::Formatter, name: &str, value: &Option<impl fmt::Display>) -> fmt::Result {
    match value {
        Some(v) => write!(f, " {name}='{v}'"),
        None => Ok(()),
    }
}

fn plain(f: &mut fmt::Formatter, name: &str, value: &Option<impl fmt::Display>) -> fmt::Result {
    match value {
        Some(v) => write!(f, " {name}={v}"),
        None => Ok(()),
    }
}

fn list<T>(
    f: &mut fmt::Formatter,
    name: &str,
    items: &Option<Vec<T>>,
    item: impl Fn(&mut fmt::Formatter, &T) -> fmt::Result,
) -> fmt::Result {
    let Some(items) = items else {
        return Ok(());
    };
    writeln!(f, " {name}=[")?;
    for i in items {
        write!(f, "  ")?;
        item(f, i)?;
        writeln!(f)?;
    }
    writeln!(f, "  ]")
}

impl fmt::Display for RowInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{RowInterval:")?;
        quoted(f, "start", &self.start_row)?;
        plain(f, "start_inclusive", &self.start_inclusive)?;
        quoted(f, "end", &self.end_row)?;
        plain(f, "end_inclusive", &self.end_inclusive)?;
        write!(f, "}}")
    }
}

impl fmt::Display for CellInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{CellInterval:")?;
        quoted(f, "start_row", &self.start_row)?;
        quoted(f, "start_column", &self.start_column)?;
        plain(f, "start_inclusive", &self.start_inclusive)?;
        quoted(f, "end_row", &self.end_row)?;
        quoted(f, "end_column", &self.end_column)?;
        plain(f, "end_inclusive", &self.end_inclusive)?;
        write!(f, "}}")
    }
}

impl fmt::Display for ScanSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ScanSpec:")?;
        list(f, "rows", &self.row_intervals, |f, ri| write!(f, "{ri}"))?;
        list(f, "cells", &self.cell_intervals, |f, ci| write!(f, "{ci}"))?;
        plain(f, "row_limit", &self.row_limit)?;
        plain(f, "revs", &self.revs)?;
        plain(f, "return_deletes", &self.return_deletes)?;
        plain(f, "start_time", &self.start_time)?;
        plain(f, "end_time", &self.end_time)?;
        write!(f, "}}")
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{Cell:")?;
        quoted(f, "row", &self.row_key)?;
        quoted(f, "cf", &self.column_family)?;
        quoted(f, "cq", &self.column_qualifier)?;
        // payloads are arbitrary bytes, shown lossily
        quoted(
            f,
            "value",
            &self.value.as_deref().map(String::from_utf8_lossy),
        )?;
        plain(f, "ts", &self.timestamp)?;
        plain(f, "rev", &self.revision)?;
        plain(f, "flag", &self.flag)?;
        write!(f, "}}")
    }
}

impl fmt::Display for HqlResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{HqlResult:")?;
        list(f, "results", &self.results, |f, s| write!(f, "'{s}'"))?;
        list(f, "cells", &self.cells, |f, cell| write!(f, "{cell}"))?;
        plain(f, "scanner", &self.scanner)?;
        plain(f, "mutator", &self.mutator)?;
        write!(f, "}}")
    }
}

impl fmt::Display for ClientException {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ClientException: code={} what='{}'}}", self.code, self.what)
    }
}
