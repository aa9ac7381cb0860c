pub mod sale;

pub use sale::{SaleDetail, SalesSummary};
