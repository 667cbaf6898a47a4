pub mod cell;
pub mod error;
pub mod format;
pub mod hql;
pub mod timestamp;
pub mod tree;
pub mod types;


pub use cell::{make_cell, make_cell_from_text, Assign, AUTO_ASSIGN};
pub use error::{Result, ThriftError};
pub use hql::Hql;
pub use timestamp::parse_timestamp;
pub use types::{Cell, CellFlag, CellInterval, ClientException, HqlResult, RowInterval, ScanSpec};
