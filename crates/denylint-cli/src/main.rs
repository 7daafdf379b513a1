//! CLI entry point for denylint.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging, and exit codes.
//! All business logic lives in the `denylint-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use denylint_app::{
    CheckInput, ExplainOutput, format_explanation, format_not_found, parse_report_json,
    render_annotations, render_markdown, run_check, run_explain, runtime_error_report,
    serialize_report, verdict_exit_code,
};
use denylint_settings::Overrides;
use denylint_types::{ConfigPath, DenylintReport, ids};
use tracing::{debug, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "denylint",
    version,
    about = "Lint cargo-deny style dependency policy files"
)]
struct Cli {
    /// Policy file to lint.
    #[arg(long, default_value = "deny.toml", global = true)]
    policy: Utf8PathBuf,

    /// Path to the denylint config TOML (missing file means defaults).
    #[arg(long, default_value = "denylint.toml", global = true)]
    config: Utf8PathBuf,

    /// Override profile (strict|warn|compat).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the verdict threshold (error|warning).
    #[arg(long, global = true)]
    fail_on: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long, global = true)]
    max_findings: Option<u32>,

    /// Log filter used when RUST_LOG is not set (e.g. `debug`, `denylint_app=trace`).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lint the policy file and write the JSON report.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/denylint/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/denylint/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/denylint/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (prints to stdout when omitted).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/denylint/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g. "licenses.clarify") or code (e.g. "invalid_expression").
        identifier: String,
    },

    /// Print a JSON Schema to stdout.
    Schema {
        #[arg(value_enum, default_value = "config")]
        kind: SchemaKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaKind {
    /// `denylint.toml`
    Config,
    /// The JSON report written by `check`.
    Report,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match &cli.cmd {
        Commands::Check {
            report_out,
            write_markdown,
            markdown_out,
        } => {
            let code = cmd_check(&cli, report_out, *write_markdown, markdown_out);
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
        Commands::Schema { kind } => cmd_schema(*kind),
    }
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

/// Returns the process exit code; a runtime-error report is written before returning 1.
fn cmd_check(
    cli: &Cli,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> i32 {
    let policy_path = ConfigPath::from(cli.policy.as_path());

    let result = (|| -> anyhow::Result<i32> {
        let policy_text = std::fs::read_to_string(&cli.policy)
            .with_context(|| format!("read policy file: {}", cli.policy))?;
        let config_text = read_optional_config(&cli.config)?;

        let output = run_check(CheckInput {
            policy_path: policy_path.clone(),
            policy_text: &policy_text,
            config_text: &config_text,
            overrides: Overrides {
                profile: cli.profile.clone(),
                fail_on: cli.fail_on.clone(),
                max_findings: cli.max_findings,
            },
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;
        debug!(path = %report_out, "wrote report");
        if write_markdown {
            write_text_file(markdown_out, &render_markdown(&output.report))
                .context("write markdown")?;
            debug!(path = %markdown_out, "wrote markdown");
        }

        if is_runtime_failure(&output.report) {
            for finding in &output.report.findings {
                eprintln!("denylint error: {}", finding.message);
            }
            return Ok(1);
        }
        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => code,
        Err(err) => {
            let report = runtime_error_report(&policy_path, &format!("{err:#}"));
            if let Err(write_err) = write_report_file(report_out, &report) {
                warn!(error = %write_err, "could not write runtime-error report");
            }
            eprintln!("denylint error: {err:#}");
            1
        }
    }
}

fn is_runtime_failure(report: &DenylintReport) -> bool {
    report
        .findings
        .iter()
        .any(|f| f.check_id == ids::CHECK_TOOL_RUNTIME)
}

fn read_optional_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path, "config file not found; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {path}")),
    }
}

fn write_report_file(path: &Utf8Path, report: &DenylintReport) -> anyhow::Result<()> {
    let data = serialize_report(report).context("serialize report")?;
    create_parent(path)?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    create_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))
}

fn create_parent(path: &Utf8Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<DenylintReport> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read report: {path}"))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&report);

    match output {
        Some(out_path) => write_text_file(out_path, &md).context("write markdown output")?,
        None => print!("{md}"),
    }
    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&report, max) {
        println!("{annotation}");
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_schema(kind: SchemaKind) -> anyhow::Result<()> {
    let schema = match kind {
        SchemaKind::Config => denylint_settings::config_schema(),
        SchemaKind::Report => denylint_types::report_schema(),
    };
    let text = serde_json::to_string_pretty(&schema).context("serialize schema")?;
    println!("{text}");
    Ok(())
}
