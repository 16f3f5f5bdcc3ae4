use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use headguard::{config, render, sanitize, scan};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing::warn;

/// headguardctl — inspect and exercise head-snippet sanitization.
///
/// Reads a snippet from a file or stdin, sanitizes it the same way the
/// metadata renderer would, and prints the resulting nodes (JSON), a
/// red-flag report, or the rendered head markup.
#[derive(Debug, Parser)]
#[command(name = "headguardctl")]
#[command(version)]
struct Cli {
    /// Config TOML file (optional; supplies site domain, input caps, scan
    /// thresholds)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Print or validate configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },

    /// Sanitize a head snippet from a file (stdin when omitted)
    Sanitize {
        /// Path to the snippet; reads stdin when not given
        path: Option<PathBuf>,

        /// Include the red-flag scan report in the JSON output
        #[arg(long, default_value_t = false)]
        report: bool,

        /// Print rendered head markup instead of JSON nodes
        #[arg(long, default_value_t = false)]
        render: bool,

        /// Override the input size cap (chars)
        #[arg(long)]
        max_input_chars: Option<usize>,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
    /// Print a config example to stdout
    Example,

    /// Validate a config file (loads and parses TOML)
    Validate {
        #[arg(long)]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => Some(config::Config::load(path).with_context(|| format!("load {path:?}"))?),
        None => None,
    };

    match cli.cmd {
        Cmd::Config { cmd } => match cmd {
            ConfigCmd::Example => {
                let ex = include_str!("../../config.example.toml");
                print!("{ex}");
            }
            ConfigCmd::Validate { path } => {
                let _ = config::Config::load(&path).with_context(|| format!("load {path:?}"))?;
                eprintln!("OK: {path:?}");
            }
        },

        Cmd::Sanitize {
            path,
            report,
            render: render_html,
            max_input_chars,
        } => {
            let raw = match path {
                Some(p) => fs::read_to_string(&p).with_context(|| format!("read {p:?}"))?,
                None => {
                    let mut s = String::new();
                    io::stdin().read_to_string(&mut s).context("read stdin")?;
                    s
                }
            };

            let cap = max_input_chars.unwrap_or_else(|| config::max_input_chars(cfg.as_ref()));
            let input = sanitize::cap_chars(&raw, cap);
            if input.len() < raw.len() {
                warn!(cap, "input truncated before sanitization");
            }

            let (nodes, scan_report) = scan::sanitize_with_report(input);
            if scan_report.scan.severity >= config::severity_warn_threshold(cfg.as_ref()) {
                warn!(
                    severity = scan_report.scan.severity,
                    "snippet triggered red-flag scan"
                );
            }

            if render_html {
                println!("{}", render::render_head(&nodes));
            } else if report {
                let v = serde_json::json!({ "nodes": nodes, "report": scan_report });
                println!("{}", serde_json::to_string_pretty(&v)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&nodes)?);
            }
        }
    }

    Ok(())
}
