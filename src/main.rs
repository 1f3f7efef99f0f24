use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use anyhow::Context;
use chrono::DateTime;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

mod aggregate;
mod chart;
mod config;
mod fetch;
mod grades;
mod models;
mod report;
mod screen;

use config::Config;
use fetch::BackendClient;
use models::SubmissionSet;
use screen::{Screen, ScreenState, Transition};

#[derive(Parser)]
#[command(name = "submission-charts")]
#[command(about = "Chart inputs for assignment submissions and grade reports", long_about = None)]
struct Cli {
    /// Base URL of the school backend
    #[arg(long, global = true, env = "BACKEND_URL")]
    backend_url: Option<String>,
    /// Offset used when bucketing submissions by day
    #[arg(long, global = true, env = "CHART_UTC_OFFSET", default_value = "+00:00")]
    utc_offset: String,
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Submission status and timeline charts for one assignment
    Submissions {
        #[arg(long)]
        class_id: String,
        #[arg(long)]
        assignment_id: String,
        /// Read the snapshot from a JSON file instead of the backend
        #[arg(long)]
        input: Option<PathBuf>,
        /// Assignment deadline (RFC 3339) for the on-time/late split
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Refetch every N seconds until interrupted
        #[arg(long)]
        watch: Option<u64>,
    },
    /// Grade bar chart for a student's class report
    Grades {
        #[arg(long)]
        class_id: String,
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Bucket timestamps from a CSV export by day
    Histogram {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = fetch::DEFAULT_TIMESTAMP_COLUMN)]
        column: String,
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "submission_charts=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.backend_url, &cli.utc_offset, cli.timeout_secs)?;

    match cli.command {
        Commands::Submissions {
            class_id,
            assignment_id,
            input,
            deadline,
            format,
            out,
            watch,
        } => {
            let deadline = deadline
                .map(|raw| {
                    DateTime::parse_from_rfc3339(&raw)
                        .with_context(|| format!("invalid deadline {raw:?}"))
                })
                .transpose()?;
            let source = SnapshotSource::new(&config, input)?;
            let mut screen = Screen::new();

            let Some(period) = watch else {
                refresh_submissions(
                    &mut screen, &source, &config, &class_id, &assignment_id, deadline, format,
                    out.as_deref(),
                )
                .await?;
                return Ok(());
            };

            let mut interval = tokio::time::interval(Duration::from_secs(period.max(1)));
            let shutdown = tokio::signal::ctrl_c();
            tokio::pin!(shutdown);

            loop {
                if unless_shutdown(&mut shutdown, interval.tick()).await.is_none() {
                    break;
                }

                let refresh = refresh_submissions(
                    &mut screen, &source, &config, &class_id, &assignment_id, deadline, format,
                    out.as_deref(),
                );
                match unless_shutdown(&mut shutdown, refresh).await {
                    None => break,
                    Some(Err(err)) => tracing::warn!("refresh failed: {err:#}"),
                    Some(Ok(())) => {}
                }
            }
            tracing::info!("stopped watching");
        }
        Commands::Grades {
            class_id,
            input,
            format,
            out,
        } => {
            let report = match input {
                Some(path) => fetch::load_json_file(&path)?,
                None => BackendClient::new(&config)?.grade_report(&class_id).await?,
            };
            let chart = chart::derive_grade_chart(&report);
            let rendered = match format {
                Format::Json => to_json(&chart)?,
                Format::Markdown => report::render_grades(&class_id, &chart),
            };
            emit(&rendered, out.as_deref())?;
        }
        Commands::Histogram {
            csv,
            column,
            format,
        } => {
            let timestamps = fetch::read_timestamps_csv(&csv, &column)?;
            let histogram = aggregate::bucket_by_date(&timestamps, &config.formatter);
            tracing::info!(
                rows = timestamps.len(),
                dated = histogram.total(),
                days = histogram.len(),
                "bucketed {}",
                csv.display()
            );
            let rendered = match format {
                Format::Json => to_json(&histogram)?,
                Format::Markdown => report::render_histogram(&csv.display().to_string(), &histogram),
            };
            emit(&rendered, None)?;
        }
    }

    Ok(())
}

enum SnapshotSource {
    File(PathBuf),
    Backend(BackendClient),
}

impl SnapshotSource {
    fn new(config: &Config, input: Option<PathBuf>) -> anyhow::Result<Self> {
        Ok(match input {
            Some(path) => SnapshotSource::File(path),
            None => SnapshotSource::Backend(BackendClient::new(config)?),
        })
    }

    async fn submissions(&self, class_id: &str, assignment_id: &str) -> anyhow::Result<SubmissionSet> {
        match self {
            SnapshotSource::File(path) => fetch::load_json_file(path),
            SnapshotSource::Backend(client) => client.submissions(class_id, assignment_id).await,
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn refresh_submissions(
    screen: &mut Screen<chart::SubmissionCharts>,
    source: &SnapshotSource,
    config: &Config,
    class_id: &str,
    assignment_id: &str,
    deadline: Option<DateTime<chrono::FixedOffset>>,
    format: Format,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    if screen.is_loading() {
        tracing::info!(class_id, assignment_id, "loading submissions");
    }

    let ticket = screen.begin_fetch();
    let set = source.submissions(class_id, assignment_id).await?;
    let charts = chart::derive_submission_charts(&set, &config.formatter);

    match screen.resolve(ticket, charts) {
        // Only reachable when fetches overlap; the watch loop awaits each one.
        Transition::Stale => return Ok(()),
        Transition::BecameReady => tracing::info!("submissions ready"),
        Transition::Refreshed => tracing::debug!("submissions refreshed"),
    }

    let ScreenState::Ready(charts) = screen.state() else {
        return Ok(());
    };

    let rendered = match format {
        Format::Json => to_json(charts)?,
        Format::Markdown => {
            let timeliness = deadline.map(|deadline| {
                aggregate::timeliness(
                    set.submitted.as_deref().unwrap_or_default(),
                    deadline,
                    &config.formatter,
                )
            });
            report::render_submissions(class_id, assignment_id, charts, timeliness)
        }
    };

    emit(&rendered, out)
}

/// Drives `work` to completion unless `shutdown` resolves first.
async fn unless_shutdown<S, F>(shutdown: &mut Pin<&mut S>, work: F) -> Option<F::Output>
where
    S: Future,
    F: Future,
{
    tokio::select! {
        _ = shutdown.as_mut() => None,
        output = work => Some(output),
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize chart input")
}

fn emit(rendered: &str, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
