pub mod health;
pub mod metrics;
pub mod sales;

pub use health::health_check;
pub use metrics::metrics_endpoint;
pub use sales::{list_sales_summaries, upload_sales_data};
