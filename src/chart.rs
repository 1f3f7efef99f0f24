use serde::Serialize;

use crate::aggregate::{count_summary, submission_histogram, DateFormatter};
use crate::grades::align_grades;
use crate::models::{CountPair, GradeReport, SubmissionSet};

pub const STATUS_LABELS: [&str; 2] = ["Mengumpulkan", "Belum Mengumpulkan"];
pub const STATUS_COLORS: [&str; 2] = ["#22C55E", "#FF5630"];
pub const TIMELINE_TITLE: &str = "Waktu pengumpulan tugas";
pub const TIMELINE_SUBTITLE: &str = "Grafik Waktu Pengumpulan Tugas";
pub const GRADE_SERIES: &str = "Nilai";
pub const GRADE_TITLE: &str = "Hasil Nilai Tugas";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<T> {
    pub name: String,
    pub data: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSize {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<Toggle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: &'static str,
    pub align: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating: Option<bool>,
    #[serde(rename = "offsetY", skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TitleStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleStyle {
    pub color: &'static str,
}

// Pie: submitted vs. not submitted.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub series: CountPair,
    pub options: PieOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieOptions {
    pub chart: ChartSize,
    pub labels: [&'static str; 2],
    pub colors: [&'static str; 2],
    pub responsive: Vec<Breakpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakpoint {
    pub breakpoint: u32,
    pub options: BreakpointOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakpointOptions {
    pub chart: ChartSize,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_align: Option<&'static str>,
}

// Area: submissions per day.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaChart {
    pub series: Vec<Series<usize>>,
    pub options: AreaOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaOptions {
    pub chart: ChartSize,
    pub data_labels: Toggle,
    pub stroke: Stroke,
    pub title: Title,
    pub subtitle: Title,
    pub xaxis: CategoryAxis,
    pub yaxis: ValueAxis,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub curve: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAxis {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_border: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_ticks: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crosshairs: Option<Crosshairs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Toggle>,
}

impl CategoryAxis {
    fn plain(kind: Option<&'static str>, categories: Vec<String>) -> Self {
        Self {
            kind,
            categories,
            position: None,
            axis_border: None,
            axis_ticks: None,
            crosshairs: None,
            tooltip: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opposite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_border: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_ticks: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Visibility>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Visibility {
    pub show: bool,
}

const HIDDEN: Visibility = Visibility { show: false };

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crosshairs {
    pub fill: CrosshairFill,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrosshairFill {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub gradient: Gradient,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub color_from: &'static str,
    pub color_to: &'static str,
    pub stops: [u32; 2],
    pub opacity_from: f64,
    pub opacity_to: f64,
}

// Bar: grades per assignment.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub series: Vec<Series<f64>>,
    pub options: BarOptions,
    /// Parallel to the categories; true where no grade exists yet.
    pub ungraded: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarOptions {
    pub chart: ChartSize,
    pub plot_options: PlotOptions,
    pub data_labels: BarDataLabels,
    pub xaxis: CategoryAxis,
    pub yaxis: ValueAxis,
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotOptions {
    pub bar: BarPlot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarPlot {
    pub border_radius: u32,
    pub data_labels: LabelPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPosition {
    pub position: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataLabels {
    pub enabled: bool,
    pub offset_y: i32,
    pub style: LabelStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    pub font_size: &'static str,
    pub colors: Vec<&'static str>,
}

/// Both teacher-screen charts for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionCharts {
    pub status: PieChart,
    pub timeline: AreaChart,
}

pub fn status_chart(counts: CountPair) -> PieChart {
    PieChart {
        series: counts,
        options: PieOptions {
            chart: ChartSize {
                kind: "pie",
                width: Some(380),
                height: None,
                zoom: None,
            },
            labels: STATUS_LABELS,
            colors: STATUS_COLORS,
            responsive: vec![Breakpoint {
                breakpoint: 480,
                options: BreakpointOptions {
                    chart: ChartSize {
                        kind: "pie",
                        width: Some(200),
                        height: None,
                        zoom: None,
                    },
                    legend: Legend {
                        position: Some("bottom"),
                        horizontal_align: None,
                    },
                },
            }],
        },
    }
}

pub fn timeline_chart(labels: Vec<String>, counts: Vec<usize>) -> AreaChart {
    AreaChart {
        series: vec![Series {
            name: TIMELINE_TITLE.to_string(),
            data: counts,
        }],
        options: AreaOptions {
            chart: ChartSize {
                kind: "area",
                width: None,
                height: Some(350),
                zoom: Some(Toggle { enabled: false }),
            },
            data_labels: Toggle { enabled: false },
            stroke: Stroke { curve: "smooth" },
            title: Title {
                text: TIMELINE_TITLE,
                align: "center",
                floating: None,
                offset_y: None,
                style: None,
            },
            subtitle: Title {
                text: TIMELINE_SUBTITLE,
                align: "center",
                floating: None,
                offset_y: None,
                style: None,
            },
            xaxis: CategoryAxis::plain(Some("category"), labels),
            yaxis: ValueAxis {
                opposite: Some(true),
                axis_border: None,
                axis_ticks: None,
                labels: None,
            },
            legend: Legend {
                position: None,
                horizontal_align: Some("left"),
            },
        },
    }
}

pub fn derive_submission_charts(set: &SubmissionSet, formatter: &DateFormatter) -> SubmissionCharts {
    let (labels, counts) = submission_histogram(set, formatter).into_parts();

    SubmissionCharts {
        status: status_chart(count_summary(set)),
        timeline: timeline_chart(labels, counts),
    }
}

pub fn derive_grade_chart(report: &GradeReport) -> BarChart {
    let aligned = align_grades(&report.labels, &report.grades);

    BarChart {
        series: vec![Series {
            name: GRADE_SERIES.to_string(),
            data: aligned.scores,
        }],
        options: BarOptions {
            chart: ChartSize {
                kind: "bar",
                width: None,
                height: Some(400),
                zoom: None,
            },
            plot_options: PlotOptions {
                bar: BarPlot {
                    border_radius: 10,
                    data_labels: LabelPosition { position: "top" },
                },
            },
            data_labels: BarDataLabels {
                enabled: true,
                offset_y: -20,
                style: LabelStyle {
                    font_size: "12px",
                    colors: vec!["#304758"],
                },
            },
            xaxis: CategoryAxis {
                position: Some("top"),
                axis_border: Some(HIDDEN),
                axis_ticks: Some(HIDDEN),
                crosshairs: Some(Crosshairs {
                    fill: CrosshairFill {
                        kind: "gradient",
                        gradient: Gradient {
                            color_from: "#D8E3F0",
                            color_to: "#BED1E6",
                            stops: [0, 100],
                            opacity_from: 0.4,
                            opacity_to: 0.5,
                        },
                    },
                }),
                tooltip: Some(Toggle { enabled: true }),
                ..CategoryAxis::plain(None, aligned.titles)
            },
            yaxis: ValueAxis {
                opposite: None,
                axis_border: Some(HIDDEN),
                axis_ticks: Some(HIDDEN),
                labels: Some(HIDDEN),
            },
            title: Title {
                text: GRADE_TITLE,
                align: "center",
                floating: Some(true),
                offset_y: Some(380),
                style: Some(TitleStyle { color: "#444" }),
            },
        },
        ungraded: aligned.ungraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentLabel, GradeRecord, SubmissionRecord};
    use serde_json::json;

    fn sample_set() -> SubmissionSet {
        SubmissionSet {
            submitted: Some(
                [
                    "2024-01-05T10:00:00Z",
                    "2024-01-05T15:00:00Z",
                    "2024-02-01T00:00:00Z",
                    "not-a-date",
                ]
                .into_iter()
                .map(SubmissionRecord::new)
                .collect(),
            ),
            not_submitted: Some(vec![json!({ "id": 7 })]),
        }
    }

    #[test]
    fn submission_charts_carry_counts_and_buckets() {
        let charts = derive_submission_charts(&sample_set(), &DateFormatter::default());
        assert_eq!(charts.status.series, [Some(4), Some(1)]);
        assert_eq!(charts.timeline.options.xaxis.categories, vec!["5 Jan", "1 Feb"]);
        assert_eq!(charts.timeline.series[0].data, vec![2, 1]);
        assert_eq!(charts.timeline.series[0].name, TIMELINE_TITLE);
    }

    #[test]
    fn pie_serializes_unloaded_side_as_null() {
        let charts = derive_submission_charts(
            &SubmissionSet {
                submitted: Some(vec![]),
                not_submitted: None,
            },
            &DateFormatter::default(),
        );
        let value = serde_json::to_value(&charts.status).unwrap();
        assert_eq!(value["series"], json!([0, null]));
        assert_eq!(value["options"]["chart"], json!({ "type": "pie", "width": 380 }));
        assert_eq!(value["options"]["colors"], json!(["#22C55E", "#FF5630"]));
        assert_eq!(
            value["options"]["responsive"][0]["options"]["legend"],
            json!({ "position": "bottom" })
        );
    }

    #[test]
    fn area_options_use_chart_library_names() {
        let value = serde_json::to_value(timeline_chart(vec!["5 Jan".into()], vec![3])).unwrap();
        assert_eq!(value["options"]["dataLabels"], json!({ "enabled": false }));
        assert_eq!(value["options"]["chart"]["zoom"], json!({ "enabled": false }));
        assert_eq!(value["options"]["xaxis"], json!({ "type": "category", "categories": ["5 Jan"] }));
        assert_eq!(value["options"]["yaxis"], json!({ "opposite": true }));
        assert_eq!(value["options"]["legend"], json!({ "horizontalAlign": "left" }));
    }

    #[test]
    fn grade_chart_aligns_scores_to_categories() {
        let report = GradeReport {
            labels: vec![
                AssignmentLabel {
                    id: 2,
                    title: "B".to_string(),
                },
                AssignmentLabel {
                    id: 1,
                    title: "A".to_string(),
                },
            ],
            grades: vec![GradeRecord {
                assignment_id: 2,
                score: Some(90.0),
            }],
        };
        let chart = derive_grade_chart(&report);
        assert_eq!(chart.options.xaxis.categories, vec!["A", "B"]);
        assert_eq!(chart.series[0].data, vec![0.0, 90.0]);
        assert_eq!(chart.ungraded, vec![true, false]);

        let value = serde_json::to_value(&chart).unwrap();
        assert_eq!(value["series"], json!([{ "name": "Nilai", "data": [0.0, 90.0] }]));
        assert_eq!(value["options"]["plotOptions"]["bar"]["borderRadius"], json!(10));
        assert_eq!(value["options"]["dataLabels"]["offsetY"], json!(-20));
        assert_eq!(value["options"]["title"]["offsetY"], json!(380));
    }

    #[test]
    fn grade_chart_hides_axis_chrome() {
        let value = serde_json::to_value(derive_grade_chart(&GradeReport::default())).unwrap();
        let xaxis = &value["options"]["xaxis"];
        assert_eq!(xaxis["position"], json!("top"));
        assert_eq!(xaxis["axisBorder"], json!({ "show": false }));
        assert_eq!(xaxis["axisTicks"], json!({ "show": false }));
        assert_eq!(xaxis["tooltip"], json!({ "enabled": true }));
        assert_eq!(
            xaxis["crosshairs"],
            json!({
                "fill": {
                    "type": "gradient",
                    "gradient": {
                        "colorFrom": "#D8E3F0",
                        "colorTo": "#BED1E6",
                        "stops": [0, 100],
                        "opacityFrom": 0.4,
                        "opacityTo": 0.5
                    }
                }
            })
        );
        assert_eq!(
            value["options"]["yaxis"],
            json!({
                "axisBorder": { "show": false },
                "axisTicks": { "show": false },
                "labels": { "show": false }
            })
        );
        assert_eq!(value["options"]["title"]["style"], json!({ "color": "#444" }));
    }

    #[test]
    fn empty_report_gives_empty_chart() {
        let chart = derive_grade_chart(&GradeReport::default());
        assert!(chart.options.xaxis.categories.is_empty());
        assert!(chart.series[0].data.is_empty());
    }
}
