use std::fmt;

use super::error::ThriftError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowInterval {
    pub start_row: Option<String>,
    pub start_inclusive: Option<bool>,
    pub end_row: Option<String>,
    pub end_inclusive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellInterval {
    pub start_row: Option<String>,
    pub start_column: Option<String>,
    pub start_inclusive: Option<bool>,
    pub end_row: Option<String>,
    pub end_column: Option<String>,
    pub end_inclusive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSpec {
    pub row_intervals: Option<Vec<RowInterval>>,
    pub cell_intervals: Option<Vec<CellInterval>>,
    pub row_limit: Option<i32>,
    /// max revisions returned per cell
    pub revs: Option<i32>,
    pub return_deletes: Option<bool>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

/// Mutation kind carried by a [`Cell`], numbered the way the broker numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellFlag {
    DeleteRow,
    DeleteCf,
    DeleteCell,
    Insert,
}

impl CellFlag {
    pub fn code(self) -> i32 {
        match self {
            CellFlag::DeleteRow => 0,
            CellFlag::DeleteCf => 1,
            CellFlag::DeleteCell => 2,
            CellFlag::Insert => 255,
        }
    }
}

impl TryFrom<i32> for CellFlag {
    type Error = ThriftError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => CellFlag::DeleteRow,
            1 => CellFlag::DeleteCf,
            2 => CellFlag::DeleteCell,
            255 => CellFlag::Insert,
            code => {
                return Err(ThriftError::InvalidArgument {
                    what: "cell flag",
                    input: code.to_string(),
                })
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub row_key: Option<String>,
    pub column_family: Option<String>,
    pub column_qualifier: Option<String>,
    pub value: Option<Vec<u8>>,
    pub timestamp: Option<i64>,
    pub revision: Option<i64>,
    pub flag: Option<CellFlag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HqlResult {
    pub results: Option<Vec<String>>,
    pub cells: Option<Vec<Cell>>,
    /// handle of a scanner held open by the broker
    pub scanner: Option<i64>,
    /// handle of a mutator held open by the broker
    pub mutator: Option<i64>,
}

/// Error payload returned by the broker when a remote call fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientException {
    pub code: i32,
    pub what: String,
}

impl ClientException {
    pub fn new(code: i32, what: impl Into<String>) -> Self {
        ClientException {
            code,
            what: what.into(),
        }
    }
}

impl std::error::Error for ClientException {}

impl fmt::Display for CellFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
