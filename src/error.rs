use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum RevGeoError {
    /// A nearest query was issued against an index holding no places.
    #[error("empty index: no places have been indexed")]
    EmptyIndex,

    /// A gazetteer row could not be parsed into a place record.
    #[error("malformed place record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number of the offending row.
        line: u64,
        /// What was wrong with it.
        reason: String,
    },

    /// The underlying delimited reader failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Reading the gazetteer source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RevGeoError>;
