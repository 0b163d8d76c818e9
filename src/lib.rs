// Subscription Cadence Analyzer - Core Library
// Exposes the analysis engines for the CLI and tests

pub mod model;
pub mod error;
pub mod config;
pub mod revenue;
pub mod loader;
pub mod aggregator;     // Customer grouping
pub mod classifier;     // Daily / monthly / yearly detection
pub mod predictor;      // Next-year renewal revenue
pub mod ranker;         // Year-over-year deltas
pub mod report;
pub mod pipeline;
pub mod cli;

// Re-export commonly used types
pub use model::{
    CadenceType, CalendarDate, Customer, PurchaseRecord, TransactionRecord,
};
pub use error::{AnalysisError, LoadError};
pub use config::AnalysisConfig;
pub use revenue::AnnualRevenueTable;
pub use loader::{load_transactions, read_transactions, TransactionLog};
pub use aggregator::{aggregate_customers, aggregate_transactions};
pub use classifier::{classify, classify_customers, detect_cadence, is_consecutive, is_continuous};
pub use predictor::RevenuePredictor;
pub use ranker::{rank_deltas, DeltaRanking, RevenueDelta};
pub use report::{cadence_label, Report};
pub use pipeline::{analyze, run, Analysis};
pub use cli::{Args, OutputFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common result type used at the application boundary
pub type Result<T> = anyhow::Result<T>;
