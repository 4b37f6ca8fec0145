//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use sitetrust::{Report, Verdict};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Report text with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {s}\n\
                 Valid formats: pretty, json, yaml"
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Render any serializable value in a machine-readable format.
pub fn render_data<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
        OutputFormat::Pretty => Ok(None),
    }
}

/// Render a report for the terminal or for a pipe.
pub fn render_report(report: &Report, format: OutputFormat) -> Result<String> {
    if let Some(data) = render_data(report, format)? {
        return Ok(data);
    }

    let lines: Vec<String> = report
        .text()
        .lines()
        .map(|line| paint(line, report.verdict()))
        .collect();
    Ok(lines.join("\n"))
}

fn paint(line: &str, verdict: Verdict) -> String {
    if line.starts_with("[!] Final trust score") {
        match verdict {
            Verdict::Safe => line.green().bold().to_string(),
            Verdict::Suspicious => line.red().bold().to_string(),
        }
    } else if line.starts_with("[!]") {
        line.yellow().to_string()
    } else if line.starts_with("[+]") {
        line.cyan().bold().to_string()
    } else {
        line.to_string()
    }
}
