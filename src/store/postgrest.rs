use async_trait::async_trait;

use super::{Query, RecordStore, StoreError};
use crate::config::Credentials;
use crate::record::UpdateRecord;

const REST_PATH: &str = "rest/v1";

/// Record store backed by a Supabase/PostgREST table.
pub struct PostgrestStore {
    client: reqwest::Client,
    table_url: String,
    anon_key: String,
    application_name: String,
}

impl PostgrestStore {
    pub fn new(credentials: &Credentials, table: &str, application_name: &str) -> Self {
        Self::with_client(reqwest::Client::new(), credentials, table, application_name)
    }

    pub fn with_client(
        client: reqwest::Client,
        credentials: &Credentials,
        table: &str,
        application_name: &str,
    ) -> Self {
        let table_url = format!(
            "{}/{REST_PATH}/{table}",
            credentials.endpoint.trim_end_matches('/')
        );
        log::info!("Record store: {table_url}");
        Self {
            client,
            table_url,
            anon_key: credentials.anon_key.clone(),
            application_name: application_name.to_string(),
        }
    }
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn select(&self, query: &Query) -> Result<Vec<UpdateRecord>, StoreError> {
        log::debug!("Querying {} with {query:?}", self.table_url);

        let resp = self
            .client
            .get(&self.table_url)
            .query(&query.to_params())
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("x-application-name", &self.application_name)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        let bytes = resp.bytes().await?;
        let rows: Vec<UpdateRecord> = serde_json::from_slice(&bytes)?;
        log::debug!("Store returned {} row(s)", rows.len());
        Ok(rows)
    }
}
