use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for a request-for-quotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RfqId(pub String);

/// Identifier wrapper for a submitted bid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BidId(pub String);

/// Identifier wrapper for the vendor behind a bid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VendorId(pub String);

/// Review state owned by the external approval workflow; read-only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
}

impl BidStatus {
    pub fn ordered() -> [BidStatus; 4] {
        [
            BidStatus::Submitted,
            BidStatus::UnderReview,
            BidStatus::Accepted,
            BidStatus::Rejected,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            BidStatus::Submitted => "Submitted",
            BidStatus::UnderReview => "Under Review",
            BidStatus::Accepted => "Accepted",
            BidStatus::Rejected => "Rejected",
        }
    }
}

/// Vendor profile and performance history joined onto a bid by vendor id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorProfile {
    pub vendor_id: VendorId,
    pub company_name: String,
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub completion_rate: Option<f64>,
    #[serde(default)]
    pub response_time_hours: Option<f64>,
    #[serde(default)]
    pub completed_orders: Option<u32>,
}

/// Raw row returned by the backend: the bid itself plus the optional vendor join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    pub id: BidId,
    pub rfq_id: RfqId,
    pub vendor_id: VendorId,
    pub total_price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub delivery_timeline_days: u32,
    #[serde(default)]
    pub warranty_period_months: Option<u32>,
    pub status: BidStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub vendor: Option<VendorProfile>,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Read-only bid projection consumed by scoring, ranking, and comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub rfq_id: RfqId,
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub total_price: f64,
    pub currency: String,
    pub delivery_timeline_days: u32,
    pub warranty_period_months: Option<u32>,
    pub status: BidStatus,
    pub submitted_at: DateTime<Utc>,
    pub vendor_quality_score: Option<f64>,
    pub vendor_completion_rate: Option<f64>,
    pub vendor_response_time_hours: Option<f64>,
    pub vendor_completed_orders: Option<u32>,
}

impl Bid {
    /// Flatten a backend row into the scoring projection.
    ///
    /// A missing vendor join leaves every performance metric unset and falls back to the
    /// vendor id as display name. Negative or non-finite prices are read as zero.
    pub fn from_record(record: BidRecord) -> Self {
        let BidRecord {
            id,
            rfq_id,
            vendor_id,
            total_price,
            currency,
            delivery_timeline_days,
            warranty_period_months,
            status,
            submitted_at,
            vendor,
        } = record;

        let total_price = if total_price.is_finite() && total_price > 0.0 {
            total_price
        } else {
            0.0
        };

        let (vendor_name, quality, completion, response, orders) = match vendor {
            Some(profile) => (
                profile.company_name,
                profile.quality_score,
                profile.completion_rate,
                profile.response_time_hours,
                profile.completed_orders,
            ),
            None => (vendor_id.0.clone(), None, None, None, None),
        };

        Self {
            id,
            rfq_id,
            vendor_id,
            vendor_name,
            total_price,
            currency,
            delivery_timeline_days,
            warranty_period_months,
            status,
            submitted_at,
            vendor_quality_score: quality,
            vendor_completion_rate: completion,
            vendor_response_time_hours: response,
            vendor_completed_orders: orders,
        }
    }
}
