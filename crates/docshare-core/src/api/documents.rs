use crate::models::{Document, DocumentPage, RatingRequest, RatingSummary};

use super::{ApiClient, ApiError};

const DOCUMENTS_PATH: &str = "/api/documents";

impl ApiClient {
    /// Search approved documents. An empty query lists everything.
    pub async fn search_documents(&self, query: &str, page: u32) -> Result<DocumentPage, ApiError> {
        let mut path = format!("{}?page={}", DOCUMENTS_PATH, page.max(1));
        let query = query.trim();
        if !query.is_empty() {
            path.push_str("&q=");
            path.push_str(&urlencoding::encode(query));
        }
        self.get(&path).await
    }

    pub async fn fetch_document(&self, id: i64) -> Result<Document, ApiError> {
        self.get(&format!("{}/{}", DOCUMENTS_PATH, id)).await
    }

    /// Rate a document from 1 to 5 stars
    pub async fn rate_document(&self, id: i64, stars: u8) -> Result<RatingSummary, ApiError> {
        if !(1..=5).contains(&stars) {
            return Err(ApiError::InvalidRequest(format!(
                "Rating must be between 1 and 5, got {}",
                stars
            )));
        }
        let path = format!("{}/{}/ratings", DOCUMENTS_PATH, id);
        self.post(&path, &RatingRequest { stars }).await
    }

    pub async fn delete_document(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{}/{}", DOCUMENTS_PATH, id)).await
    }
}
