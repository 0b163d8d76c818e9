// 🔮 Revenue Predictor
// Projects next year's renewal revenue from classified customers

use crate::config::AnalysisConfig;
use crate::model::{CadenceType, Customer};

/// Renewal revenue expected in the year after `current_year`.
///
/// Only customers whose last purchase lands in `current_year` count, and
/// only if that purchase is close enough to year end for the next renewal
/// to fall in the following year:
/// - yearly: any purchase in the current year renews once
/// - monthly: a December purchase renews every month of next year
/// - daily: a December 31 purchase renews every day of next year
#[derive(Debug, Clone)]
pub struct RevenuePredictor {
    current_year: i32,
    months_per_year: i64,
    days_per_year: i64,
}

impl RevenuePredictor {
    pub fn new(config: &AnalysisConfig) -> Self {
        RevenuePredictor {
            current_year: config.current_year,
            months_per_year: config.months_per_year,
            days_per_year: config.days_per_year,
        }
    }

    pub fn target_year(&self) -> i32 {
        self.current_year + 1
    }

    /// Contribution of a single customer
    pub fn predict_customer(&self, customer: &Customer) -> i64 {
        let (Some(last), Some(amount)) = (customer.last_purchase(), customer.subscription_amount())
        else {
            return 0;
        };

        let date = last.date;
        if date.year != self.current_year {
            return 0;
        }

        let last_month = date.month == 12;
        let last_day = last_month && date.day == 31;

        match customer.cadence {
            CadenceType::Yearly => amount,
            CadenceType::Monthly if last_month => amount * self.months_per_year,
            CadenceType::Daily if last_day => amount * self.days_per_year,
            _ => 0,
        }
    }

    /// Sum over every customer
    pub fn predict(&self, customers: &[Customer]) -> i64 {
        let total: i64 = customers.iter().map(|c| self.predict_customer(c)).sum();

        log::debug!(
            "predicted {} revenue for {} from {} customers",
            total,
            self.target_year(),
            customers.len()
        );

        total
    }
}

impl Default for RevenuePredictor {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
