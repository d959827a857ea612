//! Wiring & DI. Entry point: parse args, bootstrap adapters, inject into the aggregator, print.
//! No business logic here.

use anyhow::Context;
use dotenv::dotenv;
use jira_day_issues::adapters::cli::{CommandParser, Invocation, Mode, USAGE};
use jira_day_issues::adapters::integrations::{JiraAdapter, TempoAdapter};
use jira_day_issues::adapters::ui::{self, progress, report, tui};
use jira_day_issues::ports::{IssueSource, WorklogSource};
use jira_day_issues::shared::config::{AppConfig, OutputFormat};
use jira_day_issues::usecases::LogAggregator;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(_) => debug!("no .env found"),
    }

    let invocation = Invocation::from_args(std::env::args().skip(1))?;
    if invocation.mode == Mode::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let cfg = AppConfig::load().context("failed to load configuration")?;

    // --- Request: command-line tokens, then config/env, then interactive prompt ---
    let parser = CommandParser::new();
    let request = parser
        .parse_request(&invocation.commands)?
        .merge_defaults(&cfg.request_defaults());
    let missing = request.missing_fields();
    let request = tui::prompt_missing(request, &missing)?;

    let date = invocation
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let output = cfg.output_or_default();

    if cfg.show_banner() {
        ui::init_ui();
    }

    // --- Adapters ---
    let timeout = cfg.timeout_or_default();
    let tempo_url = cfg.tempo_base_url_or_default();
    let jira_url = cfg.jira_base_url_or_default();
    info!(date = %date, tempo = %tempo_url, jira = %jira_url, "starting");
    let worklogs: Arc<dyn WorklogSource> = Arc::new(TempoAdapter::new(tempo_url, timeout)?);
    let issues: Arc<dyn IssueSource> = Arc::new(JiraAdapter::new(jira_url, timeout)?);
    let aggregator = LogAggregator::new(worklogs, issues);

    // --- Ctrl-C cancels every in-flight fetch ---
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted; cancelling");
            on_interrupt.cancel();
        }
    });

    let rendered = match invocation.mode {
        Mode::WorklogsOnly => {
            let pb = progress::spinner("Fetching Tempo worklogs");
            let result = aggregator
                .fetch_worklogs_only(date, &request, &cancel)
                .await;
            pb.finish_and_clear();
            let entries = result.context("failed to fetch worklogs")?;
            match output {
                OutputFormat::Text => report::render_worklogs_text(date, &entries),
                OutputFormat::Json => report::render_json(&entries)?,
                OutputFormat::Csv => report::worklogs_to_csv(&entries)?,
            }
        }
        Mode::Aggregate | Mode::Help => {
            let pb = progress::spinner("Reconciling Tempo worklogs with Jira issues");
            let result = aggregator.aggregate(date, &request, &cancel).await;
            pb.finish_and_clear();
            let projects = result.context("failed to aggregate worklogs")?;
            match output {
                OutputFormat::Text => report::render_text(date, &projects),
                OutputFormat::Json => report::render_json(&projects)?,
                OutputFormat::Csv => report::projects_to_csv(&projects)?,
            }
        }
    };

    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
