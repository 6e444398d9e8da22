// ============================
// linkkeeper-backend/src/storage.rs
// ============================
//! Link storage abstraction with an in-memory implementation.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use linkkeeper_common::{Link, LinkId, NewLink};

use crate::error::AppError;
use crate::utils::{format_timestamp, DB_TIMESTAMP_FORMAT};

/// Trait for link storage backends
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Store a new link owned by `user_id`
    async fn insert_link(&self, user_id: &str, link: NewLink) -> Result<Link, AppError>;

    /// All links owned by `user_id`, oldest first
    async fn get_links(&self, user_id: &str) -> Result<Vec<Link>, AppError>;

    /// Look up a single link
    async fn get_link(&self, id: LinkId) -> Result<Option<Link>, AppError>;

    /// Delete those of `ids` owned by `user_id`, returning how many were removed.
    ///
    /// Ids that are missing or belong to someone else are skipped.
    async fn delete_links_for(&self, user_id: &str, ids: &[LinkId]) -> Result<usize, AppError>;
}

/// In-memory implementation of the `LinkStore` trait
#[derive(Clone, Default)]
pub struct MemoryLinkStore {
    links: Arc<DashMap<LinkId, Link>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn insert_link(&self, user_id: &str, link: NewLink) -> Result<Link, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let link = Link {
            id,
            user_id: user_id.to_string(),
            url: link.url,
            description: link.description,
            image_url: link.image_url,
            created_at: format_timestamp(None, DB_TIMESTAMP_FORMAT),
        };
        self.links.insert(id, link.clone());
        Ok(link)
    }

    async fn get_links(&self, user_id: &str) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        links.sort_by_key(|link| link.id);
        Ok(links)
    }

    async fn get_link(&self, id: LinkId) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(&id).map(|entry| entry.value().clone()))
    }

    async fn delete_links_for(&self, user_id: &str, ids: &[LinkId]) -> Result<usize, AppError> {
        // owner check and removal happen under the same shard lock
        Ok(ids
            .iter()
            .filter(|id| {
                self.links
                    .remove_if(*id, |_, link| link.user_id == user_id)
                    .is_some()
            })
            .count())
    }
}
