// 📝 Report Writer
// Renders analysis results as the plain-text report or as JSON

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::model::{CadenceType, Customer};
use crate::ranker::DeltaRanking;
use crate::revenue::AnnualRevenueTable;

// ============================================================================
// CADENCE LABELS
// ============================================================================

/// Display metadata for a cadence: report label and the unit purchase
/// counts are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadenceLabel {
    pub cadence: CadenceType,
    pub label: &'static str,
    pub unit: &'static str,
}

pub static CADENCE_LABELS: [CadenceLabel; 5] = [
    CadenceLabel { cadence: CadenceType::Unknown, label: "Unknown", unit: "" },
    CadenceLabel { cadence: CadenceType::OneOf, label: "One-of", unit: "Day" },
    CadenceLabel { cadence: CadenceType::Monthly, label: "Monthly", unit: "Months" },
    CadenceLabel { cadence: CadenceType::Daily, label: "Daily", unit: "Days" },
    CadenceLabel { cadence: CadenceType::Yearly, label: "Yearly", unit: "Years" },
];

pub fn cadence_label(cadence: CadenceType) -> &'static CadenceLabel {
    CADENCE_LABELS
        .iter()
        .find(|l| l.cadence == cadence)
        .unwrap_or(&CADENCE_LABELS[0])
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerLine {
    pub id: i64,
    pub cadence: CadenceType,
    pub purchases: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualRevenue {
    pub year: i32,
    pub amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadenceBreakdown {
    pub unknown: usize,
    pub one_of: usize,
    pub monthly: usize,
    pub daily: usize,
    pub yearly: usize,
}

impl CadenceBreakdown {
    pub fn from_customers(customers: &[Customer]) -> Self {
        let mut breakdown = CadenceBreakdown::default();
        for customer in customers {
            match customer.cadence {
                CadenceType::Unknown => breakdown.unknown += 1,
                CadenceType::OneOf => breakdown.one_of += 1,
                CadenceType::Monthly => breakdown.monthly += 1,
                CadenceType::Daily => breakdown.daily += 1,
                CadenceType::Yearly => breakdown.yearly += 1,
            }
        }
        breakdown
    }
}

/// Everything the report shows, independent of output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub customers: Vec<CustomerLine>,
    pub breakdown: CadenceBreakdown,
    pub annual_revenues: Vec<AnnualRevenue>,
    pub deltas: DeltaRanking,
    pub predicted_year: i32,
    pub predicted_revenue: i64,
}

impl Report {
    pub fn new(
        customers: &[Customer],
        revenue: &AnnualRevenueTable,
        deltas: DeltaRanking,
        predicted_year: i32,
        predicted_revenue: i64,
    ) -> Self {
        Report {
            generated_at: Utc::now(),
            customers: customers
                .iter()
                .map(|c| CustomerLine {
                    id: c.id,
                    cadence: c.cadence,
                    purchases: c.purchase_count(),
                })
                .collect(),
            breakdown: CadenceBreakdown::from_customers(customers),
            annual_revenues: revenue
                .iter()
                .map(|(year, amount)| AnnualRevenue { year, amount })
                .collect(),
            deltas,
            predicted_year,
            predicted_revenue,
        }
    }

    /// Tab-separated text report
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "Sub ID\tType\tLength\n");
        for line in &self.customers {
            let label = cadence_label(line.cadence);
            let _ = writeln!(
                out,
                "{}\t{}\t{} {}",
                line.id, label.label, line.purchases, label.unit
            );
        }

        let _ = writeln!(out, "\nAnnual Revenues\nYear\tAmount(USD)");
        for revenue in &self.annual_revenues {
            let _ = writeln!(out, "{}\t${}", revenue.year, group_thousands(revenue.amount));
        }

        let _ = writeln!(out, "\nHighest Decreases in Revenue");
        for d in &self.deltas.decreases {
            let _ = writeln!(out, "{}-{} ${}", d.start_year, d.end_year, group_thousands(d.delta));
        }

        let _ = writeln!(out, "\nHighest Increases in Revenue");
        for d in &self.deltas.increases {
            let _ = writeln!(out, "{}-{} $+{}", d.start_year, d.end_year, group_thousands(d.delta));
        }

        let _ = writeln!(
            out,
            "\nPredicted Revenue for {}: ${}",
            self.predicted_year,
            group_thousands(self.predicted_revenue)
        );

        out
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    pub fn write_text(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text())
            .with_context(|| format!("Failed to write report: {:?}", path))
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write report: {:?}", path))
    }
}

/// `1234567` -> `1,234,567`, `-1500` -> `-1,500`
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CalendarDate, PurchaseRecord};
    use crate::ranker::rank_deltas;

    fn sample_report() -> Report {
        let mut yearly = Customer::new(10);
        yearly.add_purchase(PurchaseRecord::new(100, CalendarDate::new(1, 1, 1968)));
        yearly.add_purchase(PurchaseRecord::new(100, CalendarDate::new(1, 1, 1969)));
        yearly.cadence = CadenceType::Yearly;

        let mut unknown = Customer::new(11);
        unknown.add_purchase(PurchaseRecord::new(5, CalendarDate::new(3, 9, 1966)));
        unknown.add_purchase(PurchaseRecord::new(5, CalendarDate::new(8, 2, 1970)));

        let table = AnnualRevenueTable::from_totals(1966, vec![100, 150, 90, 200, 1180]);
        let deltas = rank_deltas(&table, 2).unwrap();

        Report::new(&[yearly, unknown], &table, deltas, 1971, 1234567)
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-60), "-60");
        assert_eq!(group_thousands(-123456), "-123,456");
    }

    #[test]
    fn test_labels_cover_every_cadence() {
        for entry in CADENCE_LABELS.iter() {
            assert_eq!(cadence_label(entry.cadence), entry);
        }
        assert_eq!(cadence_label(CadenceType::Daily).label, "Daily");
        assert_eq!(cadence_label(CadenceType::Monthly).unit, "Months");
        assert_eq!(cadence_label(CadenceType::OneOf).label, "One-of");
    }

    #[test]
    fn test_text_layout() {
        let text = sample_report().to_text();

        assert!(text.starts_with("Sub ID\tType\tLength\n\n10\tYearly\t2 Years\n11\tUnknown\t2 \n"));
        assert!(text.contains("\nAnnual Revenues\nYear\tAmount(USD)\n1966\t$100\n"));
        assert!(text.contains("1970\t$1,180\n"));
        assert!(text.contains("Highest Decreases in Revenue\n1967-1968 $-60\n1966-1967 $50\n"));
        assert!(text.contains("Highest Increases in Revenue\n1969-1970 $+980\n1968-1969 $+110\n"));
        assert!(text.ends_with("\nPredicted Revenue for 1971: $1,234,567\n"));
    }

    #[test]
    fn test_breakdown_counts() {
        let report = sample_report();
        assert_eq!(report.breakdown.yearly, 1);
        assert_eq!(report.breakdown.unknown, 1);
        assert_eq!(report.breakdown.daily, 0);
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let json = report.to_json().unwrap();

        assert!(json.contains("\"predicted_revenue\": 1234567"));
        assert!(json.contains("\"cadence\": \"yearly\""));

        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.customers, report.customers);
        assert_eq!(parsed.deltas, report.deltas);
    }
}
