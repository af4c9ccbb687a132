// Command-line entry point for the travel assistant

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travel_assistant::{
    FailureStage, PdfDecoder, PipelineRequest, PipelineResult, Source, SourceExtractor,
    TravelAssistant, YouTubeTranscriptService,
};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "travel-assistant")]
#[command(about = "Summarize travel guides and videos, and answer questions about them")]
struct Cli {
    /// PDF document to include (repeatable)
    #[arg(long = "document", value_name = "PATH")]
    documents: Vec<PathBuf>,

    /// Video URL or id whose transcript to include (repeatable)
    #[arg(long = "video", value_name = "URL|ID")]
    videos: Vec<String>,

    /// Question to answer from the collected material
    #[arg(long)]
    question: Option<String>,

    /// Skip ASSISTANT_DEFAULT_DOCUMENT and ASSISTANT_DEFAULT_VIDEOS
    #[arg(long)]
    no_defaults: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,travel_assistant=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(provider = %config.backend.provider, "Configuration loaded");

    let backend = config
        .backend
        .build()
        .context("Failed to configure inference backend")?;

    let extractor = SourceExtractor::new(
        Arc::new(PdfDecoder::new()),
        Arc::new(YouTubeTranscriptService::new().with_language(&config.transcript_language)),
    );
    let assistant = TravelAssistant::with_config(extractor, backend, &config.pipeline);

    let mut request = PipelineRequest::new(collect_sources(&cli, &config).await?);
    if let Some(question) = cli.question.as_deref() {
        request = request.with_question(question);
    }

    // Ctrl-C stops the run but still reports what finished
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing up");
            trigger.cancel();
        }
    });

    let result = assistant.run_until(request, &cancel).await;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?
        );
    } else {
        print_result(&result);
    }

    Ok(())
}

/// Gather sources in order: default document, default videos, then CLI input.
async fn collect_sources(cli: &Cli, config: &Config) -> Result<Vec<Source>> {
    let mut sources = Vec::new();

    if !cli.no_defaults {
        if let Some(path) = &config.default_document {
            match read_document(path).await {
                Ok(source) => sources.push(source),
                Err(e) => tracing::warn!(error = %e, "Skipping default document"),
            }
        }
        sources.extend(config.default_videos.iter().map(Source::transcript));
    }

    for path in &cli.documents {
        sources.push(read_document(path).await?);
    }
    sources.extend(cli.videos.iter().map(Source::transcript));

    Ok(sources)
}

async fn read_document(path: &Path) -> Result<Source> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Source::named_document(name, bytes))
}

fn print_result(result: &PipelineResult) {
    print!("{}", render_result(result));
}

/// Human-readable report of a pipeline result.
fn render_result(result: &PipelineResult) -> String {
    let mut out = String::new();

    if result.is_empty() {
        out.push_str(&format!("{}\n", "Nothing to report: no text was extracted.".yellow()));
        return out;
    }

    if let Some(summary) = &result.summary {
        out.push_str(&format!("{}\n{}\n\n", "Summary".cyan().bold(), summary));
    }

    if let Some(answer) = &result.answer {
        out.push_str(&format!("{}\n{}\n\n", "Answer".cyan().bold(), answer));
    }

    if !result.failures.is_empty() {
        out.push_str(&format!("{}\n", "Failures".red().bold()));
        for failure in &result.failures {
            let stage = match &failure.stage {
                FailureStage::Source { index, source } => format!("source #{index} ({source})"),
                FailureStage::Summarize => "summarize".to_string(),
                FailureStage::Answer => "answer".to_string(),
            };
            out.push_str(&format!(
                "  {} [{}] {}\n",
                stage.bold(),
                failure.kind,
                failure.message
            ));
        }
        out.push('\n');
    }

    if result.cancelled {
        out.push_str(&format!(
            "{}\n",
            "Run was interrupted; results are incomplete.".yellow()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_assistant::{AssistantError, Failure};

    #[test]
    fn test_empty_result_reports_no_text() {
        let report = render_result(&PipelineResult::default());
        assert!(report.contains("no text was extracted"));
        assert!(!report.contains("no sources"));
    }

    #[test]
    fn test_report_lists_failures() {
        let result = PipelineResult {
            summary: Some("Paris has the Louvre.".to_string()),
            failures: vec![Failure::source(
                1,
                Source::transcript("missing"),
                &AssistantError::unavailable("missing", "no transcript available"),
            )],
            ..Default::default()
        };

        let report = render_result(&result);
        assert!(report.contains("Paris has the Louvre."));
        assert!(report.contains("source #1"));
        assert!(report.contains("no transcript available"));
        assert!(!report.contains("Nothing to report"));
    }
}
