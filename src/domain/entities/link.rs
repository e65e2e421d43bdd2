//! Link entity representing a short code to destination mapping.

use chrono::{DateTime, Utc};

/// A short link with its usage counters.
///
/// Everything except `total_clicks` and `last_clicked_at` is fixed at creation.
/// The counter fields are only ever changed by
/// [`crate::domain::repositories::LinkRepository::record_visit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub destination_url: String,
    pub owner_email: String,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a never-visited link.
    pub fn new(
        code: String,
        destination_url: String,
        owner_email: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            destination_url,
            owner_email,
            total_clicks: 0,
            last_clicked_at: None,
            created_at,
        }
    }

    /// Returns true if the link has been redirected to at least once.
    pub fn was_visited(&self) -> bool {
        self.last_clicked_at.is_some()
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub destination_url: String,
    pub owner_email: String,
}

impl NewLink {
    pub fn new(
        code: impl Into<String>,
        destination_url: impl Into<String>,
        owner_email: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            destination_url: destination_url.into(),
            owner_email: owner_email.into(),
        }
    }

    /// Materializes the record as the store sees it right after insertion.
    pub fn into_link(self, created_at: DateTime<Utc>) -> Link {
        Link::new(self.code, self.destination_url, self.owner_email, created_at)
    }
}
