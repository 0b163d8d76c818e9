// 💵 Annual Revenue Table
// Total revenue per calendar year, indexed by (year - base_year)

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualRevenueTable {
    base_year: i32,
    totals: Vec<i64>,
}

impl AnnualRevenueTable {
    /// Zeroed table covering `year_span` years from `base_year`
    pub fn new(base_year: i32, year_span: usize) -> Self {
        AnnualRevenueTable {
            base_year,
            totals: vec![0; year_span],
        }
    }

    pub fn for_config(config: &AnalysisConfig) -> Self {
        Self::new(config.base_year, config.year_span)
    }

    /// Table over explicit totals, first entry is `base_year`
    pub fn from_totals(base_year: i32, totals: Vec<i64>) -> Self {
        AnnualRevenueTable { base_year, totals }
    }

    fn slot(&self, year: i32) -> Option<usize> {
        let offset = year.checked_sub(self.base_year)?;
        usize::try_from(offset).ok().filter(|&i| i < self.totals.len())
    }

    /// Add `amount` to `year`. Returns false if the year is not covered.
    pub fn add(&mut self, year: i32, amount: i64) -> bool {
        match self.slot(year) {
            Some(i) => {
                self.totals[i] += amount;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, year: i32) -> Option<i64> {
        self.slot(year).map(|i| self.totals[i])
    }

    pub fn base_year(&self) -> i32 {
        self.base_year
    }

    pub fn last_year(&self) -> i32 {
        self.base_year + self.totals.len() as i32 - 1
    }

    pub fn totals(&self) -> &[i64] {
        &self.totals
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// (year, total) pairs in year order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i64)> + '_ {
        self.totals
            .iter()
            .enumerate()
            .map(move |(i, &total)| (self.base_year + i as i32, total))
    }

    /// Year-over-year differences: `diff[i] = totals[i + 1] - totals[i]`
    pub fn differences(&self) -> Vec<i64> {
        self.totals.windows(2).map(|w| w[1] - w[0]).collect()
    }
}
