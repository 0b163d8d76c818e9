// 📂 Transaction Loader
// Reads the subscription CSV log and tallies revenue per year while parsing
//
// Expected layout (header line is skipped):
//   id,subscription_id,amount,date
//   1,2313,490,1/11/1966

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::AnalysisConfig;
use crate::error::{LoadError, LoadResult};
use crate::model::{CalendarDate, TransactionRecord};
use crate::revenue::AnnualRevenueTable;

/// Everything the analysis needs from the log
#[derive(Debug, Clone)]
pub struct TransactionLog {
    pub records: Vec<TransactionRecord>,
    pub revenue: AnnualRevenueTable,
}

impl TransactionLog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load the log at `path`, stopping after `limit` records if given.
/// A limit of 0 means no limit.
pub fn load_transactions(
    path: &Path,
    config: &AnalysisConfig,
    limit: Option<usize>,
) -> LoadResult<TransactionLog> {
    let file = File::open(path).map_err(csv::Error::from)?;
    read_transactions(file, config, limit)
}

/// Parse transactions from any reader
pub fn read_transactions<R: Read>(
    reader: R,
    config: &AnalysisConfig,
    limit: Option<usize>,
) -> LoadResult<TransactionLog> {
    let limit = limit.filter(|&max| max > 0);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut revenue = AnnualRevenueTable::for_config(config);
    let mut row = csv::StringRecord::new();

    while limit.map_or(true, |max| records.len() < max) {
        if !rdr.read_record(&mut row)? {
            break;
        }

        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let record = parse_row(&row).map_err(|e| LoadError::Row {
            line,
            source: Box::new(e),
        })?;

        if !revenue.add(record.date.year, record.amount) {
            return Err(LoadError::YearOutOfRange {
                line,
                year: record.date.year,
                first: revenue.base_year(),
                last: revenue.last_year(),
            });
        }

        records.push(record);
    }

    log::debug!("read {} transactions", records.len());

    Ok(TransactionLog { records, revenue })
}

fn parse_row(row: &csv::StringRecord) -> LoadResult<TransactionRecord> {
    let (transaction_id, subscription_id, amount, date): (i64, i64, i64, String) =
        row.deserialize(None)?;

    // Some exports wrap the date in parentheses: (1/11/1966)
    let date: CalendarDate = date
        .trim_matches(|c| c == '(' || c == ')')
        .parse()?;

    Ok(TransactionRecord {
        transaction_id,
        subscription_id,
        amount,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
Id,Subscription ID,Amount,Transaction Date
1,2313,490,1/11/1966
2,2313,490,1/11/1967
3,1001,25, 12/31/2014
";

    #[test]
    fn test_read_sample() {
        let config = AnalysisConfig::default();
        let log = read_transactions(SAMPLE.as_bytes(), &config, None).unwrap();

        assert_eq!(log.len(), 3);
        assert_eq!(
            log.records[0],
            TransactionRecord {
                transaction_id: 1,
                subscription_id: 2313,
                amount: 490,
                date: CalendarDate::new(1, 11, 1966),
            }
        );
        assert_eq!(log.records[2].date, CalendarDate::new(12, 31, 2014));

        assert_eq!(log.revenue.get(1966), Some(490));
        assert_eq!(log.revenue.get(1967), Some(490));
        assert_eq!(log.revenue.get(2014), Some(25));
    }

    #[test]
    fn test_limit_stops_early() {
        let config = AnalysisConfig::default();
        let log = read_transactions(SAMPLE.as_bytes(), &config, Some(2)).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.revenue.get(2014), Some(0));
    }

    #[test]
    fn test_zero_limit_reads_everything() {
        let config = AnalysisConfig::default();
        let log = read_transactions(SAMPLE.as_bytes(), &config, Some(0)).unwrap();

        assert_eq!(log.len(), 3);
        assert_eq!(log.revenue.get(2014), Some(25));
    }

    #[test]
    fn test_parenthesized_date() {
        let config = AnalysisConfig::default();
        let input = "Id,Sub,Amount,Date\n1234,2313,490,(1/11/1966)\n";
        let log = read_transactions(input.as_bytes(), &config, None).unwrap();
        assert_eq!(log.records[0].date, CalendarDate::new(1, 11, 1966));
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let config = AnalysisConfig::default();
        let input = "Id,Sub,Amount,Date\n1,2,3,1/1/2000\n2,x,3,1/1/2000\n";

        let err = read_transactions(input.as_bytes(), &config, None).unwrap_err();
        assert!(matches!(err, LoadError::Row { line: 3, .. }), "got {err}");
    }

    #[test]
    fn test_bad_date_is_error() {
        let config = AnalysisConfig::default();
        let input = "Id,Sub,Amount,Date\n1,2,3,2000-01-01\n";

        let err = read_transactions(input.as_bytes(), &config, None).unwrap_err();
        assert!(err.to_string().contains("Invalid date"), "got {err}");
    }

    #[test]
    fn test_year_outside_table_is_error() {
        let config = AnalysisConfig::default();
        let input = "Id,Sub,Amount,Date\n1,2,3,1/1/1950\n";

        let err = read_transactions(input.as_bytes(), &config, None).unwrap_err();
        assert!(matches!(err, LoadError::YearOutOfRange { year: 1950, .. }));
    }

    #[test]
    fn test_year_outside_table_after_valid_rows_is_error() {
        let config = AnalysisConfig::default();
        let input = "Id,Sub,Amount,Date\n1,2,10,1/1/2000\n2,2,10,1/1/2020\n3,2,10,1/1/1950\n";

        let err = read_transactions(input.as_bytes(), &config, None).unwrap_err();
        assert!(
            matches!(err, LoadError::YearOutOfRange { line: 3, year: 2020, .. }),
            "got {err}"
        );
    }

    #[test]
    fn test_revenue_table_holds_every_amount() {
        let config = AnalysisConfig::default();
        let log = read_transactions(SAMPLE.as_bytes(), &config, None).unwrap();

        let loaded: i64 = log.records.iter().map(|r| r.amount).sum();
        assert_eq!(log.revenue.totals().iter().sum::<i64>(), loaded);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let log = load_transactions(file.path(), &AnalysisConfig::default(), None).unwrap();
        assert_eq!(log.len(), 3);
    }
}
