use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One parsed CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDetail {
    pub product: String,
    pub quantity: i32,
    pub price: f64,
    pub revenue: f64,
}

impl SaleDetail {
    pub fn new(product: impl Into<String>, quantity: i32, price: f64) -> Self {
        Self {
            product: product.into(),
            quantity,
            price,
            revenue: f64::from(quantity) * price,
        }
    }
}

/// Aggregate record of one CSV upload.
///
/// Totals are derived from `details` when the summary is built, so
/// `total_records`, `total_quantity` and `total_revenue` always agree with the
/// detail list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub total_records: usize,
    pub total_quantity: i64,
    pub total_revenue: f64,
    pub file_name: String,
    pub details: Vec<SaleDetail>,
}

impl SalesSummary {
    pub fn new(
        id: String,
        timestamp: DateTime<Utc>,
        file_name: String,
        details: Vec<SaleDetail>,
    ) -> Self {
        let total_quantity = details.iter().map(|d| i64::from(d.quantity)).sum();
        // Accumulate in file order.
        let total_revenue = details.iter().fold(0.0, |acc, d| acc + d.revenue);

        Self {
            id,
            timestamp,
            total_records: details.len(),
            total_quantity,
            total_revenue,
            file_name,
            details,
        }
    }
}
