use crate::audio_url;
use crate::record::UpdateRecord;
use crate::store::{NameFilter, Query, RecordStore, StoreError, Window};

/// One page of older updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub records: Vec<UpdateRecord>,
    pub size: usize,
}

impl Page {
    /// A short page is the only end-of-feed signal; there is no count query.
    pub fn has_more(&self) -> bool {
        self.size > 0 && self.records.len() == self.size
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads the update feed for one label out of a [`RecordStore`].
///
/// Every read first matches the label exactly and, when that comes back
/// empty, once more with a case-insensitive word match. The second pass
/// papers over rows stored under inconsistent names in the table; it is a
/// data cleanup issue rather than part of the feed's contract.
pub struct UpdateFeed<S> {
    store: S,
    label: String,
    storage_base: String,
}

impl<S: RecordStore> UpdateFeed<S> {
    pub fn new(store: S, label: impl Into<String>, storage_base: impl Into<String>) -> Self {
        Self {
            store,
            label: label.into(),
            storage_base: storage_base.into(),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Most recent update, or `None` if nothing matches or the store failed.
    pub async fn fetch_latest(&self) -> Option<UpdateRecord> {
        self.try_fetch_latest().await.unwrap_or_else(|e| {
            log::error!("Error fetching latest update: {e}");
            None
        })
    }

    /// Like [`fetch_latest`](Self::fetch_latest) but reports store failures.
    pub async fn try_fetch_latest(&self) -> Result<Option<UpdateRecord>, StoreError> {
        log::info!("Fetching latest update");
        let rows = self.select_with_fallback(Window::first(1)).await?;
        let latest = rows.into_iter().next();
        if latest.is_none() {
            log::info!("No latest update found");
        }
        Ok(latest)
    }

    /// Page `page_index` (zero-based) of `page_size` updates, newest first.
    /// Store failures yield an empty page.
    pub async fn fetch_page(&self, page_size: usize, page_index: usize) -> Page {
        log::info!("Fetching previous updates - page {page_index}, size {page_size}");
        if page_size == 0 {
            log::warn!("Ignoring request for a zero-sized page");
            return Page::default();
        }

        let records = self
            .select_with_fallback(Window::page(page_size, page_index))
            .await
            .unwrap_or_else(|e| {
                log::error!("Error fetching previous updates: {e}");
                Vec::new()
            });
        Page {
            records,
            size: page_size,
        }
    }

    async fn select_with_fallback(&self, window: Window) -> Result<Vec<UpdateRecord>, StoreError> {
        let exact = Query::new(NameFilter::Exact(self.label.clone()), window);
        let mut rows = self.store.select(&exact).await?;

        if rows.is_empty() {
            if let Some(filter) = NameFilter::fuzzy_from(&self.label) {
                log::info!("No exact match for {:?}, trying case-insensitive search", self.label);
                rows = self.store.select(&Query::new(filter, window)).await?;
            }
        }

        Ok(rows.into_iter().map(|r| self.resolve_audio(r)).collect())
    }

    fn resolve_audio(&self, mut record: UpdateRecord) -> UpdateRecord {
        record.audio_url = audio_url::resolve(&record.audio_url, &self.storage_base);
        record
    }
}
