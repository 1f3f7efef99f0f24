use serde::{Deserialize, Deserializer, Serialize};

/// A missing, null or non-string `createdAt` is kept as `None` so the rest of
/// the snapshot still loads.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SubmissionRecord {
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

impl SubmissionRecord {
    pub fn new(created_at: &str) -> Self {
        Self {
            created_at: Some(created_at.to_string()),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => Some(value),
        _ => None,
    })
}

/// Snapshot for the guru assignment screen. The backend spells the keys
/// `submited` and `notSubmited`; a missing or null side stays `None`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubmissionSet {
    #[serde(rename = "submited", alias = "submitted", default)]
    pub submitted: Option<Vec<SubmissionRecord>>,
    #[serde(rename = "notSubmited", alias = "notSubmitted", default)]
    pub not_submitted: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AssignmentLabel {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GradeRecord {
    #[serde(rename = "tugasId")]
    pub assignment_id: i64,
    #[serde(rename = "nilai", default)]
    pub score: Option<f64>,
}

/// Student report snapshot.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GradeReport {
    #[serde(default)]
    pub labels: Vec<AssignmentLabel>,
    #[serde(rename = "tugasSiswa", default)]
    pub grades: Vec<GradeRecord>,
}

/// `[submitted, not_submitted]`; `None` means that side was never loaded.
pub type CountPair = [Option<usize>; 2];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DateBucketHistogram {
    labels: Vec<String>,
    counts: Vec<usize>,
}

impl DateBucketHistogram {
    pub(crate) fn from_parts(labels: Vec<String>, counts: Vec<usize>) -> Self {
        Self { labels, counts }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of distinct day labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<usize>) {
        (self.labels, self.counts)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Timeliness {
    pub on_time: usize,
    pub late: usize,
    pub unparsed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignedGrades {
    pub titles: Vec<String>,
    pub scores: Vec<f64>,
    pub ungraded: Vec<bool>,
}
