use tracing::debug;

use super::{
    error::{Result, ThriftError},
    timestamp::parse_timestamp,
    types::{Cell, CellFlag},
};

/// Timestamp/revision value asking the range server to assign one at write time.
/// Must stay in sync with the server's `AUTO_ASSIGN`.
pub const AUTO_ASSIGN: i64 = i64::MIN + 2;

/// A timestamp or revision that is either given explicitly or left to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assign {
    Auto,
    At(i64),
}

impl Assign {
    /// The value as carried on the wire, where `Auto` travels as [`AUTO_ASSIGN`].
    pub fn resolve(self) -> i64 {
        match self {
            Assign::Auto => AUTO_ASSIGN,
            Assign::At(v) => v,
        }
    }

    pub fn from_wire(value: i64) -> Self {
        match value {
            AUTO_ASSIGN => Assign::Auto,
            v => Assign::At(v),
        }
    }
}

impl From<Option<i64>> for Assign {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Assign::Auto, Assign::At)
    }
}

/// Builds a cell from already resolved timestamp and revision, taken verbatim.
///
/// Row, family, timestamp, revision and flag are always set. The qualifier is set only
/// when given (an empty qualifier still counts), and an empty value is left unset.
pub fn make_cell(
    row: &str,
    family: &str,
    qualifier: Option<&str>,
    value: impl AsRef<[u8]>,
    timestamp: i64,
    revision: i64,
    flag: CellFlag,
) -> Cell {
    let value = value.as_ref();
    Cell {
        row_key: Some(row.to_owned()),
        column_family: Some(family.to_owned()),
        column_qualifier: qualifier.map(str::to_owned),
        value: (!value.is_empty()).then(|| value.to_vec()),
        timestamp: Some(timestamp),
        revision: Some(revision),
        flag: Some(flag),
    }
}

/// Builds a cell from timestamp and revision text, as typed into a query.
///
/// Missing text means the server assigns the value. Present text is parsed first and the
/// result handed to [`make_cell`].
pub fn make_cell_from_text(
    row: &str,
    family: &str,
    qualifier: Option<&str>,
    value: impl AsRef<[u8]>,
    timestamp: Option<&str>,
    revision: Option<&str>,
    flag: CellFlag,
) -> Result<Cell> {
    let revision: Assign = revision.map(parse_revision).transpose()?.into();
    let timestamp: Assign = timestamp.map(parse_timestamp).transpose()?.into();
    debug!(row, family, ?timestamp, ?revision, "building cell from text");

    Ok(make_cell(
        row,
        family,
        qualifier,
        value,
        timestamp.resolve(),
        revision.resolve(),
        flag,
    ))
}

fn parse_revision(text: &str) -> Result<i64> {
    text.trim()
        .parse()
        .map_err(|_| ThriftError::InvalidArgument {
            what: "revision",
            input: text.to_owned(),
        })
}

impl Cell {
    pub fn timestamp_assign(&self) -> Option<Assign> {
        self.timestamp.map(Assign::from_wire)
    }

    pub fn revision_assign(&self) -> Option<Assign> {
        self.revision.map(Assign::from_wire)
    }
}
