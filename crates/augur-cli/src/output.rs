//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use augur_domain::Solution;
use augur_gatekeeper::Decision;
use colored::*;
use std::collections::BTreeSet;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the solutions of a goal.
    pub fn format_solutions(&self, solutions: &[Solution]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(solutions)?),
            OutputFormat::Table => Ok(self.format_solutions_table(solutions)),
            OutputFormat::Quiet => Ok(format_solutions_quiet(solutions)),
        }
    }

    fn format_solutions_table(&self, solutions: &[Solution]) -> String {
        if solutions.is_empty() {
            return self.colorize("No solutions.", "yellow");
        }

        let columns: BTreeSet<&str> = solutions
            .iter()
            .flat_map(|s| s.iter().map(|(name, _)| name))
            .collect();

        // ground goal: nothing to tabulate
        if columns.is_empty() {
            return self.colorize(&format!("true ({} solution(s))", solutions.len()), "green");
        }

        let mut builder = Builder::default();
        builder.push_record(columns.iter().copied());
        for solution in solutions {
            builder.push_record(columns.iter().map(|name| solution.get(name).unwrap_or("")));
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a yes/no answer.
    pub fn format_answer(&self, answer: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::json!({ "result": answer }).to_string()),
            OutputFormat::Quiet => Ok(answer.to_string()),
            OutputFormat::Table => Ok(if answer {
                self.colorize("true", "green")
            } else {
                self.colorize("false", "red")
            }),
        }
    }

    /// Format an authorization decision.
    pub fn format_decision(&self, goal: &str, decision: Decision) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::json!({
                "goal": goal,
                "decision": decision.as_str(),
            })
            .to_string()),
            OutputFormat::Quiet => Ok(decision.to_string()),
            OutputFormat::Table => {
                let color = if decision.is_allowed() { "green" } else { "red" };
                Ok(format!("{}  {}", self.colorize(decision.as_str(), color), goal))
            }
        }
    }

    /// Format the fact list.
    pub fn format_facts(&self, facts: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(facts)?),
            OutputFormat::Quiet => Ok(facts.join("\n")),
            OutputFormat::Table => {
                if facts.is_empty() {
                    return Ok(self.colorize("No facts found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Fact"]);
                for (i, fact) in facts.iter().enumerate() {
                    builder.push_record([(i + 1).to_string(), fact.clone()]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn format_solutions_quiet(solutions: &[Solution]) -> String {
    solutions
        .iter()
        .map(|solution| {
            if solution.is_empty() {
                "true".to_string()
            } else {
                solution
                    .iter()
                    .map(|(name, value)| format!("{}={}", name, value))
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
