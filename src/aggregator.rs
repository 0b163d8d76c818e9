// 👥 Customer Aggregator
// Collapses a flat list of keyed purchases into one Customer per key

use crate::error::{AnalysisError, AnalysisResult};
use crate::model::{Customer, PurchaseRecord, TransactionRecord};

/// Group purchases by customer id.
///
/// Stable sort on the id, then a single pass that starts a new Customer
/// whenever the id changes. Customers come out in ascending id order and
/// each keeps its purchases in the order the sort left them.
pub fn aggregate_customers(purchases: &[(i64, PurchaseRecord)]) -> AnalysisResult<Vec<Customer>> {
    if purchases.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut sorted: Vec<&(i64, PurchaseRecord)> = purchases.iter().collect();
    sorted.sort_by_key(|(id, _)| *id);

    let mut customers: Vec<Customer> = Vec::new();
    for &(id, purchase) in sorted {
        match customers.last_mut() {
            Some(current) if current.id == id => current.add_purchase(purchase),
            _ => {
                let mut customer = Customer::new(id);
                customer.add_purchase(purchase);
                customers.push(customer);
            }
        }
    }

    log::debug!(
        "aggregated {} purchases into {} customers",
        purchases.len(),
        customers.len()
    );

    Ok(customers)
}

/// Aggregate parsed transaction rows, keyed by subscription id
pub fn aggregate_transactions(records: &[TransactionRecord]) -> AnalysisResult<Vec<Customer>> {
    let keyed: Vec<(i64, PurchaseRecord)> = records.iter().map(TransactionRecord::keyed).collect();
    aggregate_customers(&keyed)
}

// ============================================================================
// TESTS
// ============================================================================
