use crate::error::SalesError;
use crate::models::SalesSummary;
use crate::services::{parse_sales_csv, record_upload, CsvError, UploadOutcome};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};

pub const FILE_FIELD: &str = "file";

/// POST /api/upload-sales-data
pub async fn upload_sales_data(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SalesSummary>, SalesError> {
    match ingest(&state, multipart).await {
        Ok(summary) => {
            record_upload(UploadOutcome::Accepted, summary.total_records);
            Ok(Json(summary))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sales upload rejected");
            record_upload(UploadOutcome::Rejected, 0);
            Err(e)
        }
    }
}

/// GET /api/sales-summaries
pub async fn list_sales_summaries(State(state): State<AppState>) -> Json<Vec<SalesSummary>> {
    Json(state.store.read_all().await)
}

async fn ingest(state: &AppState, mut multipart: Multipart) -> Result<SalesSummary, SalesError> {
    let (file_name, data) = read_file_field(&mut multipart).await?;

    tracing::info!(
        file_name = %file_name,
        size = data.len(),
        "Sales upload started"
    );

    let text = String::from_utf8_lossy(&data);
    let details = parse_sales_csv(&text).map_err(|e| {
        if let CsvError::MissingHeaders(missing) = &e {
            tracing::debug!(file_name = %file_name, ?missing, "Header row incomplete");
        }
        e
    })?;

    let summary = state.summaries.build(file_name, details);
    state.store.append(summary.clone()).await;

    tracing::info!(
        summary_id = %summary.id,
        total_records = summary.total_records,
        total_quantity = summary.total_quantity,
        total_revenue = summary.total_revenue,
        "Sales upload completed"
    );

    Ok(summary)
}

/// Returns the original file name and raw bytes of the `file` part.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), SalesError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        return Ok((file_name, data));
    }

    Err(SalesError::MissingField(FILE_FIELD))
}
