pub mod csv_parser;
pub mod identity;
pub mod metrics;
pub mod summary_store;

pub use csv_parser::{parse_sales_csv, CsvError};
pub use identity::{
    Clock, FixedClock, IdGenerator, SequentialIdGenerator, SummaryFactory, SystemClock,
    UuidGenerator,
};
pub use metrics::{get_metrics, init_metrics, record_upload, UploadOutcome};
pub use summary_store::{InMemorySummaryStore, SummaryStore};
