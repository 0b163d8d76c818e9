// 🔁 Cadence Classifier
// Detects daily / monthly / yearly renewal patterns from purchase dates
//
// Works on the raw month/day/year integers, not on calendar arithmetic.
// A daily subscriber's day numbers wrap at month end (29,30,31,1,2) and a
// monthly subscriber's month numbers wrap at year end (11,12,1,2), so a
// sequence also counts as continuous when its leading run up to the first
// wrap is consecutive.

use crate::model::{CadenceType, CalendarDate, Customer};

// ============================================================================
// SEQUENCE TESTS
// ============================================================================

/// Every element is exactly one more than the previous one.
/// Empty and single-element sequences are trivially consecutive.
pub fn is_consecutive<T: Copy + Into<i64>>(values: &[T]) -> bool {
    values
        .windows(2)
        .all(|w| {
            let (prev, next): (i64, i64) = (w[0].into(), w[1].into());
            next - prev == 1
        })
}

/// Index of the first local maximum: the running maximum is followed while
/// values do not decrease, and the index where it last moved is returned.
pub fn first_max<T: Copy + Into<i64>>(values: &[T]) -> usize {
    let mut max = i64::MIN;
    let mut max_index = 0;

    for (i, &value) in values.iter().enumerate() {
        let value: i64 = value.into();
        if value >= max {
            max = value;
            max_index = i;
        } else {
            break;
        }
    }

    max_index
}

/// Consecutive end-to-end, or consecutive up to and including the first
/// local maximum.
pub fn is_continuous<T: Copy + Into<i64>>(values: &[T]) -> bool {
    if is_consecutive(values) {
        return true;
    }
    if values.is_empty() {
        return false;
    }
    is_consecutive(&values[..=first_max(values)])
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Cadence implied by a purchase date sequence (two or more dates).
///
/// Checked from the highest frequency down: daily purchases also have
/// continuous months and consecutive years, and monthly purchases have
/// consecutive years, so the order matters.
pub fn detect_cadence(dates: &[CalendarDate]) -> CadenceType {
    let days: Vec<u32> = dates.iter().map(|d| d.day).collect();
    let months: Vec<u32> = dates.iter().map(|d| d.month).collect();
    let years: Vec<i32> = dates.iter().map(|d| d.year).collect();

    if is_continuous(&days) {
        CadenceType::Daily
    } else if is_continuous(&months) {
        CadenceType::Monthly
    } else if is_consecutive(&years) {
        CadenceType::Yearly
    } else {
        CadenceType::Unknown
    }
}

/// Cadence for one customer. A single purchase is always one-of.
pub fn classify(customer: &Customer) -> CadenceType {
    match customer.purchase_count() {
        0 => CadenceType::Unknown,
        1 => CadenceType::OneOf,
        _ => detect_cadence(&customer.purchase_dates()),
    }
}

/// Assign a cadence to every customer in place
pub fn classify_customers(customers: &mut [Customer]) {
    for customer in customers.iter_mut() {
        customer.cadence = classify(customer);
    }

    log::debug!("classified {} customers", customers.len());
}

// ============================================================================
// TESTS
// ============================================================================
