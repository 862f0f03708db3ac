use async_trait::async_trait;

use super::domain::{BidRecord, RfqId};

/// Remote boundary supplying bid rows joined with vendor performance.
///
/// Implementations wrap the hosted backend; the engine never writes through it.
#[async_trait]
pub trait BidSource: Send + Sync {
    async fn bids_for_rfq(&self, rfq_id: &RfqId) -> Result<Vec<BidRecord>, SourceError>;
}

/// Failure raised by a remote data source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("request for quotation {0} not found")]
    UnknownRfq(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("backend returned malformed data: {0}")]
    Malformed(String),
}
