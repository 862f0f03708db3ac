use super::domain::SearchResult;

const HEADER: [&str; 8] = [
    "type",
    "title",
    "description",
    "location",
    "price",
    "status",
    "createdAt",
    "relevance",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv output: {0}")]
    Flush(String),
    #[error("csv output was not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Flatten results into CSV with a fixed column order, one row per result.
///
/// Missing location or price become empty cells; relevance is written as a whole
/// percentage such as `87%`.
pub fn export_csv(results: &[SearchResult]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for result in results {
        let price = result.price.map(|price| price.to_string()).unwrap_or_default();
        let created_at = result.created_at.format("%Y-%m-%d").to_string();
        let relevance = format!("{:.0}%", result.relevance);

        writer.write_record([
            result.entity_type.label(),
            result.title.as_str(),
            result.description.as_str(),
            result.location.as_deref().unwrap_or(""),
            price.as_str(),
            result.status.as_str(),
            created_at.as_str(),
            relevance.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
