//! Read-only client for the hosted record store
//!
//! The store speaks a PostgREST-style dialect: one table per collection
//! under `/rest/v1/`, filters as `column=op.value` query parameters, and the
//! anonymous key sent both as `apikey` and as a bearer token.

use crate::config::{ConfigError, StoreConfig};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use whisker_common::{decode_rows, Record};

#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response format: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct RecordStoreClient {
    config: StoreConfig,
    http: reqwest::Client,
}

impl RecordStoreClient {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Result<Self, RecordStoreError> {
        Ok(Self::new(StoreConfig::load()?))
    }

    fn collection_url(&self, select: &str, filters: &[(&str, String)]) -> String {
        collection_url(&self.config, select, filters)
    }

    async fn get_rows<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<Vec<T>, RecordStoreError> {
        debug!("GET {url}");
        let resp = self
            .http
            .get(url)
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            warn!("Record store returned {status}");
            return Err(RecordStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn get_records(&self, filters: &[(&str, String)]) -> Result<Vec<Record>, RecordStoreError> {
        let url = self.collection_url("*", filters);
        let rows: Vec<serde_json::Value> = self.get_rows(&url).await?;
        Ok(decode_rows(rows))
    }

    /// Every record in the collection, newest first.
    pub async fn fetch_all(&self) -> Result<Vec<Record>, RecordStoreError> {
        info!("Fetching {} collection", self.config.table);
        let records = self.get_records(&[]).await?;
        info!("Fetched {} records", records.len());
        Ok(records)
    }

    /// Records whose `field` equals `value` exactly.
    pub async fn fetch_by_field(&self, field: &str, value: &str) -> Result<Vec<Record>, RecordStoreError> {
        self.get_records(&[(field, eq_filter(value))]).await
    }

    /// Records whose own categories contain all of `categories`.
    pub async fn fetch_by_categories(&self, categories: &[String]) -> Result<Vec<Record>, RecordStoreError> {
        if categories.is_empty() {
            return self.fetch_all().await;
        }
        self.get_records(&[("categories", contains_filter(categories))]).await
    }

    /// Sorted union of record-level categories across the collection.
    pub async fn fetch_distinct_categories(&self) -> Result<Vec<String>, RecordStoreError> {
        let url = self.collection_url("categories", &[]);
        let rows: Vec<CategoriesRow> = self.get_rows(&url).await?;
        Ok(distinct_categories(rows))
    }
}

#[derive(Debug, Default, Deserialize)]
struct CategoriesRow {
    #[serde(default)]
    categories: Option<Vec<String>>,
}

fn distinct_categories(rows: Vec<CategoriesRow>) -> Vec<String> {
    rows.into_iter()
        .flat_map(|row| row.categories.unwrap_or_default())
        .filter(|c| !c.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn collection_url(config: &StoreConfig, select: &str, filters: &[(&str, String)]) -> String {
    let mut url = format!(
        "{}/rest/v1/{}?select={}&order=created_at.desc",
        config.base_url,
        urlencoding::encode(&config.table),
        select,
    );

    for (column, filter) in filters {
        url.push('&');
        url.push_str(&urlencoding::encode(column));
        url.push('=');
        url.push_str(&urlencoding::encode(filter));
    }

    url
}

fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

/// `cs.{"a","b"}`: array containment, so every listed category must be present.
fn contains_filter(categories: &[String]) -> String {
    let quoted: Vec<String> = categories
        .iter()
        .map(|c| format!("\"{}\"", c.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("cs.{{{}}}", quoted.join(","))
}

/// Decode a store response body into canonical records. Only a body that
/// is not a JSON array is an error; malformed rows are skipped.
pub fn decode_records(body: &str) -> Result<Vec<Record>, serde_json::Error> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(body)?;
    Ok(decode_rows(rows))
}
