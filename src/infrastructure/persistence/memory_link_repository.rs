//! In-memory implementation of link repository.
//!
//! Will be destroyed on process shutdown.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::utils::code_generator::is_valid_code;

#[derive(Debug, Default)]
struct Inner {
    /// Links keyed by code, each tagged with its insertion sequence number.
    links: HashMap<String, (u64, Link)>,
    next_seq: u64,
}

/// An in-process link store.
///
/// Every mutating operation runs under a single write lock, which gives the
/// same atomicity as the PostgreSQL constraints: check-and-insert cannot
/// interleave, and an increment cannot race a delete.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError> {
        if !is_valid_code(&new_link.code) {
            return Err(StoreError::InvalidCode);
        }

        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        match inner.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateCode),
            Entry::Vacant(slot) => {
                let link = new_link.into_link(Utc::now());
                slot.insert((inner.next_seq, link.clone()));
                inner.next_seq += 1;
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .links
            .get(code)
            .map(|(_, link)| link.clone()))
    }

    async fn list_by_owner(&self, email: &str) -> Result<Vec<Link>, StoreError> {
        let inner = self.inner.read().await;

        let mut owned: Vec<&(u64, Link)> = inner
            .links
            .values()
            .filter(|(_, link)| link.owner_email == email)
            .collect();

        owned.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });

        Ok(owned.into_iter().map(|(_, link)| link.clone()).collect())
    }

    async fn record_visit(&self, code: &str) -> Result<Option<String>, StoreError> {
        let mut inner = self.inner.write().await;

        Ok(inner.links.get_mut(code).map(|(_, link)| {
            link.total_clicks += 1;
            link.last_clicked_at = Some(Utc::now());
            link.destination_url.clone()
        }))
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.links.remove(code).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
