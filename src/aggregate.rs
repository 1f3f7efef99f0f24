use std::collections::HashMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

use crate::models::{CountPair, DateBucketHistogram, SubmissionRecord, SubmissionSet, Timeliness};

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Turns raw timestamps into `"<day> <Mon>"` labels in a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct DateFormatter {
    offset: FixedOffset,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl DateFormatter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn parse(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
            return Some(value.with_timezone(&self.offset));
        }
        if let Ok(value) = DateTime::parse_from_rfc2822(raw) {
            return Some(value.with_timezone(&self.offset));
        }

        // Wall-clock time without an offset is read in the formatter's zone.
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return self.offset.from_local_datetime(&naive).single();
            }
        }

        // Date-only strings mean UTC midnight.
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
        Some(midnight.with_timezone(&self.offset))
    }

    pub fn label(&self, raw: &str) -> Option<String> {
        let value = self.parse(raw)?;
        Some(format!("{} {}", value.day(), MONTHS[value.month0() as usize]))
    }
}

pub fn bucket_by_date<I, S>(timestamps: I, formatter: &DateFormatter) -> DateBucketHistogram
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut labels = Vec::new();
    let mut counts = Vec::new();

    for raw in timestamps {
        let raw = raw.as_ref();
        let Some(label) = formatter.label(raw) else {
            tracing::warn!(timestamp = raw, "skipping invalid submission date");
            continue;
        };

        match index.get(&label) {
            Some(&slot) => counts[slot] += 1,
            None => {
                index.insert(label.clone(), labels.len());
                labels.push(label);
                counts.push(1);
            }
        }
    }

    DateBucketHistogram::from_parts(labels, counts)
}

pub fn submission_histogram(set: &SubmissionSet, formatter: &DateFormatter) -> DateBucketHistogram {
    let submitted = set.submitted.as_deref().unwrap_or_default();
    let timestamps = submitted.iter().filter_map(|item| {
        if item.created_at.is_none() {
            tracing::warn!("skipping submission without a createdAt string");
        }
        item.created_at.as_deref()
    });
    bucket_by_date(timestamps, formatter)
}

pub fn count_summary(set: &SubmissionSet) -> CountPair {
    [
        set.submitted.as_ref().map(Vec::len),
        set.not_submitted.as_ref().map(Vec::len),
    ]
}

pub fn timeliness(
    submitted: &[SubmissionRecord],
    deadline: DateTime<FixedOffset>,
    formatter: &DateFormatter,
) -> Timeliness {
    let mut summary = Timeliness::default();

    for record in submitted {
        match record.created_at.as_deref().and_then(|raw| formatter.parse(raw)) {
            Some(at) if at <= deadline => summary.on_time += 1,
            Some(_) => summary.late += 1,
            None => summary.unparsed += 1,
        }
    }

    summary
}
