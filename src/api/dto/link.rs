//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL (absolute HTTP/HTTPS).
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional caller-chosen short code.
    #[validate(length(min = 6, max = 8, message = "Code must be 6-8 characters"))]
    pub code: Option<String>,

    /// Owner email used to scope listing.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Query string for listing links.
#[derive(Debug, Deserialize)]
pub struct ListLinksQuery {
    pub email: String,
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub url: String,
    pub email: String,
    pub total_clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            url: link.destination_url,
            email: link.owner_email,
            total_clicks: link.total_clicks,
            last_clicked: link.last_clicked_at,
            created_at: link.created_at,
        }
    }
}
