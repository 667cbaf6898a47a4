use sqlparser::parser::ParserError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThriftError>;

#[derive(Error, Debug)]
pub enum ThriftError {
    #[error("invalid {what}: '{input}'")]
    InvalidArgument { what: &'static str, input: String },

    #[error("HQL parse error: {0}")]
    Parse(#[from] ParserError),

    #[error("unsupported HQL: {0}")]
    Hql(String),
}
