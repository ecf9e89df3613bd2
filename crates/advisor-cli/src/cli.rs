//! Command line front end: pick a proposal PDF, run an analysis against
//! the backend, and export the report.
//!
//! Renderings go to stdout so they can be piped into a clipboard tool
//! (`advisor analyze p.pdf | xclip`); logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use advisor_core::client::AnalysisClient;
use advisor_core::extract;
use advisor_core::report;
use advisor_core::score;
use advisor_core::types::AnalysisResult;

#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(about = "AI review of co-op thesis proposal PDFs")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract a proposal PDF, analyze it, and print the report.
    Analyze {
        /// Proposal PDF to review.
        input: PathBuf,
        /// Backend base URL.
        #[arg(long, env = "ADVISOR_SERVER_URL", default_value = "http://127.0.0.1:8080")]
        server: String,
        /// Report rendering to print.
        #[arg(long, value_enum, default_value_t = ReportFormat::Chat)]
        format: ReportFormat,
        /// Write the rendering to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the extracted proposal text without analyzing it.
    Extract {
        input: PathBuf,
    },
    /// Analyze and prepare an email: prints the body, then a mailto link
    /// with a pre-filled subject (mail links cannot carry long bodies).
    Email {
        input: PathBuf,
        #[arg(long, env = "ADVISOR_SERVER_URL", default_value = "http://127.0.0.1:8080")]
        server: String,
        /// Email subject; defaults to a fixed subject plus the file name.
        #[arg(long)]
        subject: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Chat,
    Email,
}

pub async fn dispatch(args: Args) -> Result<()> {
    init_logging(args.log_level.as_deref());

    match args.cmd {
        Command::Analyze {
            input,
            server,
            format,
            out,
        } => analyze(&input, &server, format, out.as_deref()).await,
        Command::Extract { input } => {
            let text = extract::extract_text(&input)?;
            println!("{text}");
            Ok(())
        }
        Command::Email {
            input,
            server,
            subject,
        } => email(&input, &server, subject).await,
    }
}

fn init_logging(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one extraction + analysis round trip and return the result.
async fn run_analysis(input: &Path, server: &str) -> Result<AnalysisResult> {
    let text = extract::extract_text(input)
        .with_context(|| format!("extracting {}", input.display()))?;
    info!(chars = text.len(), "proposal text extracted");

    let client = AnalysisClient::new(server)?;
    let result = client
        .analyze(&text)
        .await
        .context("requesting analysis from the backend")?;

    let summary = score::summarize(&result.scores);
    info!(
        status = result.advisor_summary.status.as_str(),
        total = summary.total,
        max = summary.max,
        percentage = summary.percentage,
        recommended = summary.recommended,
        "analysis received"
    );
    Ok(result)
}

async fn analyze(
    input: &Path,
    server: &str,
    format: ReportFormat,
    out: Option<&Path>,
) -> Result<()> {
    let result = run_analysis(input, server).await?;
    let summary = score::summarize(&result.scores);
    let sections = report::build_sections(&result, &summary);
    let rendering = match format {
        ReportFormat::Chat => report::render_chat(&sections),
        ReportFormat::Email => report::render_email(&sections),
    };

    match out {
        Some(path) => {
            std::fs::write(path, &rendering)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{rendering}"),
    }
    Ok(())
}

async fn email(input: &Path, server: &str, subject: Option<String>) -> Result<()> {
    let result = run_analysis(input, server).await?;
    let summary = score::summarize(&result.scores);
    let sections = report::build_sections(&result, &summary);
    let body = report::render_email(&sections);

    let subject = subject.unwrap_or_else(|| default_subject(input));
    println!("{body}");
    eprintln!();
    eprintln!("เปิดลิงก์นี้เพื่อเขียนอีเมล แล้ววางเนื้อหาด้านบนเป็นเนื้อความ:");
    eprintln!("{}", mailto_link(&subject));
    Ok(())
}

fn default_subject(input: &Path) -> String {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("proposal.pdf");
    format!("ผลการวิเคราะห์ข้อเสนอโครงงาน - {name}")
}

fn mailto_link(subject: &str) -> String {
    format!("mailto:?subject={}", urlencoding::encode(subject))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_subject_uses_file_name() {
        let subject = default_subject(Path::new("dir/ข้อเสนอ.pdf"));
        assert_eq!(subject, "ผลการวิเคราะห์ข้อเสนอโครงงาน - ข้อเสนอ.pdf");
    }

    #[test]
    fn test_mailto_link_encodes_subject() {
        let link = mailto_link("ผล a b");
        assert!(link.starts_with("mailto:?subject="));
        assert!(!link.contains(' '));
        assert!(link.contains("%20"));
    }
}
