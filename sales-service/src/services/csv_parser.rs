//! Header-driven parsing of sales CSV uploads.
//!
//! Fields are split on bare commas. Quoted fields are not recognised, so a
//! product name containing a comma shifts every column after it.

use crate::models::SaleDetail;
use std::collections::HashMap;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

pub const PRODUCT_HEADER: &str = "product_name";
pub const QUANTITY_HEADER: &str = "quantity";
pub const PRICE_HEADER: &str = "price_per_unit";

const REQUIRED_HEADERS: [&str; 3] = [PRODUCT_HEADER, QUANTITY_HEADER, PRICE_HEADER];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("missing required headers: {}", .0.join(", "))]
    MissingHeaders(Vec<&'static str>),

    #[error("line {line}: missing column '{column}'")]
    MissingColumn { line: usize, column: &'static str },

    #[error("line {line}: invalid quantity '{value}': {source}")]
    InvalidQuantity {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: invalid price '{value}': {source}")]
    InvalidPrice {
        line: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: invalid price '{value}': not a finite number")]
    NonFinitePrice { line: usize, value: String },

    #[error("line {line}: revenue out of range for quantity {quantity} and price {price}")]
    RevenueOverflow {
        line: usize,
        quantity: i32,
        price: String,
    },
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    product: usize,
    quantity: usize,
    price: usize,
}

impl ColumnLayout {
    fn from_header(header: &str) -> Result<Self, CsvError> {
        let header = header.trim_start_matches('\u{feff}');

        // Later duplicates overwrite earlier ones.
        let index: HashMap<String, usize> = header
            .split(',')
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect();

        let missing: Vec<&'static str> = REQUIRED_HEADERS
            .iter()
            .copied()
            .filter(|name| !index.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(CsvError::MissingHeaders(missing));
        }

        Ok(Self {
            product: index[PRODUCT_HEADER],
            quantity: index[QUANTITY_HEADER],
            price: index[PRICE_HEADER],
        })
    }

    fn parse_row(&self, line_no: usize, line: &str) -> Result<SaleDetail, CsvError> {
        let cols: Vec<&str> = line.split(',').collect();
        let field = |idx: usize, column: &'static str| {
            cols.get(idx)
                .map(|value| value.trim())
                .ok_or(CsvError::MissingColumn {
                    line: line_no,
                    column,
                })
        };

        let product = field(self.product, PRODUCT_HEADER)?;

        let raw_quantity = field(self.quantity, QUANTITY_HEADER)?;
        let quantity = raw_quantity
            .parse::<i32>()
            .map_err(|source| CsvError::InvalidQuantity {
                line: line_no,
                value: raw_quantity.to_string(),
                source,
            })?;

        let raw_price = field(self.price, PRICE_HEADER)?;
        let price = raw_price
            .parse::<f64>()
            .map_err(|source| CsvError::InvalidPrice {
                line: line_no,
                value: raw_price.to_string(),
                source,
            })?;
        if !price.is_finite() {
            return Err(CsvError::NonFinitePrice {
                line: line_no,
                value: raw_price.to_string(),
            });
        }

        let detail = SaleDetail::new(product, quantity, price);
        if !detail.revenue.is_finite() {
            return Err(CsvError::RevenueOverflow {
                line: line_no,
                quantity,
                price: raw_price.to_string(),
            });
        }

        Ok(detail)
    }
}

/// Parses a whole upload into detail rows, in file order.
///
/// The first line is the header. Any bad row fails the whole parse and no rows
/// are returned. Line numbers in errors are 1-based and count the header.
/// Prices, row revenues and the running revenue total must all stay finite.
pub fn parse_sales_csv(input: &str) -> Result<Vec<SaleDetail>, CsvError> {
    let mut lines = input.lines().enumerate();

    let layout = match lines.next() {
        Some((_, header)) => ColumnLayout::from_header(header)?,
        None => return Err(CsvError::MissingHeaders(REQUIRED_HEADERS.to_vec())),
    };

    let mut details = Vec::new();
    let mut total_revenue = 0.0_f64;
    for (idx, line) in lines {
        let detail = layout.parse_row(idx + 1, line)?;
        total_revenue += detail.revenue;
        if !total_revenue.is_finite() {
            return Err(CsvError::RevenueOverflow {
                line: idx + 1,
                quantity: detail.quantity,
                price: detail.price.to_string(),
            });
        }
        details.push(detail);
    }

    Ok(details)
}
