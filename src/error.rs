use thiserror::Error;

/// Failures while reading the transaction log
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date '{0}': expected M/D/YYYY")]
    InvalidDate(String),

    #[error("Line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: Box<LoadError>,
    },

    #[error("Line {line}: year {year} outside revenue table {first}-{last}")]
    YearOutOfRange {
        line: u64,
        year: i32,
        first: i32,
        last: i32,
    },
}

/// Violated preconditions of the analysis engines
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No transactions to aggregate")]
    EmptyInput,

    #[error("Revenue table has {years} years, ranking {count} deltas needs at least {required}")]
    NotEnoughYears {
        years: usize,
        count: usize,
        required: usize,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;
pub type AnalysisResult<T> = Result<T, AnalysisError>;
