use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(rename = "authorName", default)]
    pub author_name: Option<String>,
    #[serde(rename = "fileUrl", default)]
    pub file_url: Option<String>,
    #[serde(rename = "averageRating", default)]
    pub average_rating: Option<f64>,
    #[serde(rename = "ratingCount", default)]
    pub rating_count: u32,
    #[serde(rename = "downloadCount", default)]
    pub download_count: u32,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn is_approved(&self) -> bool {
        self.status == DocumentStatus::Approved
    }

    /// Rating for list rows, e.g. "4.5 (12)" or "-" when unrated
    pub fn rating_display(&self) -> String {
        match self.average_rating {
            Some(avg) if self.rating_count > 0 => format!("{:.1} ({})", avg, self.rating_count),
            _ => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentPage {
    #[serde(default)]
    pub items: Vec<Document>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(rename = "pageSize", default)]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

impl DocumentPage {
    pub fn has_more(&self) -> bool {
        (self.page as u64) * (self.page_size as u64) < self.total
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingRequest {
    pub stars: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingSummary {
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "ratingCount")]
    pub rating_count: u32,
}
