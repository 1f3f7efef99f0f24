use std::fmt::Write;

use crate::chart::{BarChart, SubmissionCharts, STATUS_LABELS};
use crate::models::{DateBucketHistogram, Timeliness};

fn count_or_pending(count: Option<usize>) -> String {
    count.map_or_else(|| "not loaded".to_string(), |value| value.to_string())
}

pub fn render_submissions(
    class_id: &str,
    assignment_id: &str,
    charts: &SubmissionCharts,
    timeliness: Option<Timeliness>,
) -> String {
    let mut output = String::new();
    let [submitted, pending] = charts.status.series;

    let _ = writeln!(output, "# Assignment Submissions");
    let _ = writeln!(
        output,
        "Class {} / assignment {}",
        class_id, assignment_id
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Status");
    let _ = writeln!(output, "- {}: {}", STATUS_LABELS[0], count_or_pending(submitted));
    let _ = writeln!(output, "- {}: {}", STATUS_LABELS[1], count_or_pending(pending));

    if let Some(summary) = timeliness {
        let _ = writeln!(
            output,
            "- On time: {}, late: {}, unreadable: {}",
            summary.on_time, summary.late, summary.unparsed
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## {}", charts.timeline.options.title.text);

    let categories = &charts.timeline.options.xaxis.categories;
    let counts = charts
        .timeline
        .series
        .first()
        .map(|series| series.data.as_slice())
        .unwrap_or_default();

    if categories.is_empty() {
        let _ = writeln!(output, "No dated submissions yet.");
    } else {
        for (label, count) in categories.iter().zip(counts) {
            let _ = writeln!(output, "- {}: {}", label, count);
        }
    }

    output
}

pub fn render_grades(class_id: &str, chart: &BarChart) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {}", chart.options.title.text);
    let _ = writeln!(output, "Class {}", class_id);
    let _ = writeln!(output);

    let titles = &chart.options.xaxis.categories;
    let scores = chart
        .series
        .first()
        .map(|series| series.data.as_slice())
        .unwrap_or_default();

    if titles.is_empty() {
        let _ = writeln!(output, "No assignments in this class.");
        return output;
    }

    for ((title, score), ungraded) in titles.iter().zip(scores).zip(&chart.ungraded) {
        if *ungraded {
            let _ = writeln!(output, "- {}: {} (not graded)", title, score);
        } else {
            let _ = writeln!(output, "- {}: {}", title, score);
        }
    }

    output
}

pub fn render_histogram(source: &str, histogram: &DateBucketHistogram) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Submissions per Day");
    let _ = writeln!(
        output,
        "{} dated submissions across {} days from {}",
        histogram.total(),
        histogram.len(),
        source
    );
    let _ = writeln!(output);

    if histogram.is_empty() {
        let _ = writeln!(output, "No readable timestamps.");
    } else {
        for (label, count) in histogram.labels().iter().zip(histogram.counts()) {
            let _ = writeln!(output, "- {}: {}", label, count);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{bucket_by_date, DateFormatter};
    use crate::chart::{derive_grade_chart, derive_submission_charts};
    use crate::models::{AssignmentLabel, GradeRecord, GradeReport, SubmissionRecord, SubmissionSet};

    #[test]
    fn submissions_report_lists_status_and_days() {
        let set = SubmissionSet {
            submitted: Some(vec![
                SubmissionRecord::new("2024-01-05T10:00:00Z"),
                SubmissionRecord::new("2024-01-06T10:00:00Z"),
            ]),
            not_submitted: None,
        };
        let charts = derive_submission_charts(&set, &DateFormatter::default());
        let report = render_submissions(
            "7",
            "3",
            &charts,
            Some(Timeliness {
                on_time: 1,
                late: 1,
                unparsed: 0,
            }),
        );

        assert!(report.contains("- Mengumpulkan: 2"));
        assert!(report.contains("- Belum Mengumpulkan: not loaded"));
        assert!(report.contains("On time: 1, late: 1"));
        assert!(report.contains("- 5 Jan: 1\n- 6 Jan: 1"));
    }

    #[test]
    fn empty_timeline_says_so() {
        let charts = derive_submission_charts(&SubmissionSet::default(), &DateFormatter::default());
        let report = render_submissions("7", "3", &charts, None);
        assert!(report.contains("No dated submissions yet."));
        assert!(!report.contains("On time"));
    }

    #[test]
    fn grades_report_marks_ungraded() {
        let report = GradeReport {
            labels: vec![
                AssignmentLabel {
                    id: 1,
                    title: "Kuis".to_string(),
                },
                AssignmentLabel {
                    id: 2,
                    title: "Esai".to_string(),
                },
            ],
            grades: vec![GradeRecord {
                assignment_id: 2,
                score: Some(90.0),
            }],
        };
        let output = render_grades("7", &derive_grade_chart(&report));
        assert!(output.starts_with("# Hasil Nilai Tugas"));
        assert!(output.contains("- Kuis: 0 (not graded)"));
        assert!(output.contains("- Esai: 90\n"));
    }

    #[test]
    fn histogram_report_counts_total() {
        let histogram = bucket_by_date(
            [
                "2024-01-05T10:00:00Z",
                "2024-01-05T11:00:00Z",
                "2024-01-07T08:00:00Z",
                "nope",
            ],
            &DateFormatter::default(),
        );
        let output = render_histogram("export.csv", &histogram);
        assert!(output.contains("3 dated submissions across 2 days from export.csv"));
        assert!(output.contains("- 5 Jan: 2"));
    }
}
