use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{NameFilter, Query, RecordStore, StoreError};
use crate::record::UpdateRecord;

/// In-process stand-in for the PostgREST table.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<UpdateRecord>>,
    /// Calls numbered from 1 that fail with a 503.
    failing_calls: Mutex<Vec<usize>>,
    calls: AtomicUsize,
    queries: Mutex<Vec<Query>>,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<UpdateRecord>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Make every call fail.
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_calls(&(1..=64).collect::<Vec<_>>());
        store
    }

    pub fn fail_calls(&self, calls: &[usize]) {
        self.failing_calls.lock().unwrap().extend_from_slice(calls);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }
}

/// Ordered, case-insensitive containment, like `ilike '%w1%w2%'`.
fn fuzzy_matches(name: &str, words: &[String]) -> bool {
    let haystack = name.to_lowercase();
    let mut rest = haystack.as_str();
    for word in words {
        let word = word.to_lowercase();
        match rest.find(&word) {
            Some(at) => rest = &rest[at + word.len()..],
            None => return false,
        }
    }
    true
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select(&self, query: &Query) -> Result<Vec<UpdateRecord>, StoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.queries.lock().unwrap().push(query.clone());
        if self.failing_calls.lock().unwrap().contains(&call) {
            return Err(StoreError::Status {
                status: 503,
                body: "simulated outage".into(),
            });
        }

        let mut matched: Vec<UpdateRecord> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| match &query.filter {
                NameFilter::Exact(name) => &r.name == name,
                NameFilter::Fuzzy(words) => fuzzy_matches(&r.name, words),
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matched
            .into_iter()
            .skip(query.window.offset)
            .take(query.window.limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzzy_match_is_ordered_and_case_insensitive() {
        let words = vec!["pope".to_string(), "updates".to_string()];
        assert!(fuzzy_matches("Pope Updates", &words));
        assert!(fuzzy_matches("daily POPE news updates", &words));
        assert!(!fuzzy_matches("Updates on the Pope", &words));
        assert!(!fuzzy_matches("Pope", &words));
    }
}
