use std::path::Path;

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::models::{GradeReport, SubmissionSet};

pub const DEFAULT_TIMESTAMP_COLUMN: &str = "createdAt";

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.backend_url()?.to_string(),
        })
    }

    pub fn submissions_url(&self, class_id: &str, assignment_id: &str) -> String {
        format!(
            "{}/guru/kelas/{}/tugas/{}/siswa",
            self.base_url, class_id, assignment_id
        )
    }

    pub fn grade_report_url(&self, class_id: &str) -> String {
        format!("{}/siswa/kelas/{}/report", self.base_url, class_id)
    }

    pub async fn submissions(
        &self,
        class_id: &str,
        assignment_id: &str,
    ) -> anyhow::Result<SubmissionSet> {
        self.get_json(&self.submissions_url(class_id, assignment_id))
            .await
    }

    pub async fn grade_report(&self, class_id: &str) -> anyhow::Result<GradeReport> {
        self.get_json(&self.grade_report_url(class_id)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        tracing::debug!(url, "fetching snapshot");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("backend error: {status} - {text}");
            bail!("backend returned {status} for {url}");
        }

        resp.json::<T>()
            .await
            .with_context(|| format!("unexpected response body from {url}"))
    }
}

pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Pulls one column of raw timestamps out of a CSV export.
pub fn read_timestamps_csv(path: &Path, column: &str) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let index = reader
        .headers()?
        .iter()
        .position(|header| header.trim() == column)
        .with_context(|| format!("column {column:?} not found in {}", path.display()))?;

    let mut timestamps = Vec::new();
    for (row, result) in reader.byte_records().enumerate() {
        let record = result?;
        let raw = record
            .get(index)
            .with_context(|| format!("row {} has no {column:?} value", row + 1))?;
        match std::str::from_utf8(raw) {
            Ok(value) => timestamps.push(value.to_string()),
            Err(_) => tracing::warn!(row = row + 1, "skipping timestamp that is not UTF-8"),
        }
    }

    Ok(timestamps)
}
