mod postgrest;

#[cfg(test)]
pub mod memory;

pub use postgrest::PostgrestStore;

use async_trait::async_trait;

use crate::record::UpdateRecord;

/// Failures talking to the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store rejected query ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("unexpected store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// How rows are matched on the `name` column.
#[derive(Debug, Clone, PartialEq)]
pub enum NameFilter {
    Exact(String),
    /// Case-insensitive; every word must appear, in order.
    Fuzzy(Vec<String>),
}

impl NameFilter {
    /// Fuzzy filter built from the words of `label`. `None` when the label
    /// has no words, since `ilike.**` would match every row.
    pub fn fuzzy_from(label: &str) -> Option<Self> {
        let words: Vec<String> = label
            .split(|c: char| c.is_whitespace() || c == '*')
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        if words.is_empty() {
            None
        } else {
            Some(NameFilter::Fuzzy(words))
        }
    }

    /// PostgREST operator expression for the `name` column.
    pub fn to_param(&self) -> String {
        match self {
            NameFilter::Exact(value) => format!("eq.{value}"),
            NameFilter::Fuzzy(words) => {
                let escaped: Vec<String> = words.iter().map(|w| escape_like(w)).collect();
                format!("ilike.*{}*", escaped.join("*"))
            }
        }
    }
}

/// Make `%`, `_` and `\` literal inside a LIKE pattern.
fn escape_like(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Offset/limit range over the ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

impl Window {
    pub fn first(limit: usize) -> Self {
        Self { offset: 0, limit }
    }

    /// Zero-based page `index` of `size` rows.
    pub fn page(size: usize, index: usize) -> Self {
        Self {
            offset: index.saturating_mul(size),
            limit: size,
        }
    }
}

/// A filtered read, always newest first by `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub filter: NameFilter,
    pub window: Window,
}

impl Query {
    pub fn new(filter: NameFilter, window: Window) -> Self {
        Self { filter, window }
    }

    /// Query-string pairs for a PostgREST table read.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("select", "*".to_string()),
            ("name", self.filter.to_param()),
            ("order", "created_at.desc".to_string()),
            ("offset", self.window.offset.to_string()),
            ("limit", self.window.limit.to_string()),
        ]
    }
}

/// Read-only access to the update table.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn select(&self, query: &Query) -> Result<Vec<UpdateRecord>, StoreError>;
}
