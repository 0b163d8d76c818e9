// 🚰 Analysis Pipeline
// read -> identify -> analyze, each stage timed and logged

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

use crate::aggregator::aggregate_transactions;
use crate::classifier::classify_customers;
use crate::config::AnalysisConfig;
use crate::loader::{load_transactions, TransactionLog};
use crate::model::Customer;
use crate::predictor::RevenuePredictor;
use crate::ranker::{rank_deltas, DeltaRanking};
use crate::report::Report;
use crate::revenue::AnnualRevenueTable;

/// Results of one analysis run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub customers: Vec<Customer>,
    pub revenue: AnnualRevenueTable,
    pub deltas: DeltaRanking,
    pub predicted_year: i32,
    pub predicted_revenue: i64,
}

impl Analysis {
    pub fn report(&self) -> Report {
        Report::new(
            &self.customers,
            &self.revenue,
            self.deltas.clone(),
            self.predicted_year,
            self.predicted_revenue,
        )
    }
}

/// Group, classify, predict and rank an already loaded log
pub fn analyze(transactions: TransactionLog, config: &AnalysisConfig) -> Result<Analysis> {
    let started = Instant::now();
    let mut customers =
        aggregate_transactions(&transactions.records).context("Failed to aggregate customers")?;
    classify_customers(&mut customers);
    log::info!(
        "identified {} customers in {:.3}s",
        customers.len(),
        started.elapsed().as_secs_f64()
    );

    let started = Instant::now();
    let predictor = RevenuePredictor::new(config);
    let predicted_revenue = predictor.predict(&customers);
    let deltas = rank_deltas(&transactions.revenue, config.delta_count)
        .context("Failed to rank revenue deltas")?;
    log::info!(
        "computed deltas and predicted revenue in {:.3}s",
        started.elapsed().as_secs_f64()
    );

    Ok(Analysis {
        customers,
        revenue: transactions.revenue,
        deltas,
        predicted_year: predictor.target_year(),
        predicted_revenue,
    })
}

/// Load the log at `input` and analyze it
pub fn run(input: &Path, config: &AnalysisConfig, limit: Option<usize>) -> Result<Analysis> {
    let started = Instant::now();

    log::info!("reading {:?}", input);
    let transactions = load_transactions(input, config, limit)
        .with_context(|| format!("Failed to load transactions from {:?}", input))?;
    log::info!(
        "read {} transactions in {:.3}s",
        transactions.len(),
        started.elapsed().as_secs_f64()
    );

    let analysis = analyze(transactions, config)?;
    log::info!("analysis took {:.3}s in total", started.elapsed().as_secs_f64());

    Ok(analysis)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CadenceType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fixture() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Id,Subscription ID,Amount,Transaction Date").unwrap();
        // yearly, renews in 2014
        writeln!(file, "1,300,120,6/1/2012").unwrap();
        writeln!(file, "2,300,120,6/1/2013").unwrap();
        writeln!(file, "3,300,120,6/1/2014").unwrap();
        // monthly across the year end, last purchase in December 2014
        writeln!(file, "4,200,10,11/15/2014").unwrap();
        writeln!(file, "5,200,10,12/15/2014").unwrap();
        // daily ending on the last day of 2014
        writeln!(file, "6,100,1,12/30/2014").unwrap();
        writeln!(file, "7,100,1,12/31/2014").unwrap();
        // one-of
        writeln!(file, "8,400,999,3/3/1970").unwrap();
        file
    }

    #[test]
    fn test_full_run() {
        let file = fixture();
        let config = AnalysisConfig::default();

        let analysis = run(file.path(), &config, None).unwrap();

        let cadences: Vec<(i64, CadenceType)> =
            analysis.customers.iter().map(|c| (c.id, c.cadence)).collect();
        assert_eq!(
            cadences,
            vec![
                (100, CadenceType::Daily),
                (200, CadenceType::Monthly),
                (300, CadenceType::Yearly),
                (400, CadenceType::OneOf),
            ]
        );

        // 1 * 365 + 10 * 12 + 120
        assert_eq!(analysis.predicted_revenue, 365 + 120 + 120);
        assert_eq!(analysis.predicted_year, 2015);

        assert_eq!(analysis.revenue.get(2014), Some(120 + 20 + 2));
        assert_eq!(analysis.deltas.decreases.len(), 2);
        assert_eq!(analysis.deltas.increases.len(), 2);

        // Largest jump is into 1970 from the one-of purchase
        assert_eq!(analysis.deltas.increases[0].end_year, 1970);
        assert_eq!(analysis.deltas.increases[0].delta, 999);
    }

    #[test]
    fn test_report_from_analysis() {
        let file = fixture();
        let analysis = run(file.path(), &AnalysisConfig::default(), None).unwrap();

        let text = analysis.report().to_text();
        assert!(text.contains("100\tDaily\t2 Days"));
        assert!(text.contains("Predicted Revenue for 2015: $605"));
    }

    #[test]
    fn test_empty_log_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Id,Subscription ID,Amount,Transaction Date").unwrap();

        let result = run(file.path(), &AnalysisConfig::default(), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_fails() {
        let result = run(Path::new("/nonexistent/log.csv"), &AnalysisConfig::default(), None);
        assert!(result.is_err());
    }
}
