// 📉📈 Revenue Delta Ranker
// Largest year-over-year revenue decreases and increases

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::revenue::AnnualRevenueTable;

/// Change in total revenue from `start_year` to `end_year`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueDelta {
    pub start_year: i32,
    pub end_year: i32,
    pub delta: i64,
}

/// Ranked deltas: `decreases` most negative first, `increases` most positive first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaRanking {
    pub decreases: Vec<RevenueDelta>,
    pub increases: Vec<RevenueDelta>,
}

impl DeltaRanking {
    /// Decreases followed by increases, 2 * count entries
    pub fn into_vec(self) -> Vec<RevenueDelta> {
        let mut all = self.decreases;
        all.extend(self.increases);
        all
    }
}

/// Rank the `count` largest decreases and increases.
///
/// Differences are stably sorted ascending by value. Decreases are read from
/// the front of that order and increases from the back, so equal deltas keep
/// year order among decreases and reverse year order among increases.
pub fn rank_deltas(table: &AnnualRevenueTable, count: usize) -> AnalysisResult<DeltaRanking> {
    let required = count + 1;
    if table.len() < required {
        return Err(AnalysisError::NotEnoughYears {
            years: table.len(),
            count,
            required,
        });
    }

    let diffs = table.differences();
    let mut order: Vec<usize> = (0..diffs.len()).collect();
    order.sort_by_key(|&i| diffs[i]);

    let delta_at = |i: usize| RevenueDelta {
        start_year: table.base_year() + i as i32,
        end_year: table.base_year() + i as i32 + 1,
        delta: diffs[i],
    };

    let decreases = order.iter().take(count).map(|&i| delta_at(i)).collect();
    let increases = order.iter().rev().take(count).map(|&i| delta_at(i)).collect();

    Ok(DeltaRanking {
        decreases,
        increases,
    })
}

// ============================================================================
// TESTS
// ============================================================================
