//! Output formatting for vyos-cli (text, json)

use clap::ValueEnum;
use colored::Colorize;
use serde_json::Value;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, mappings as a key/value table (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an info message (unless in quiet mode)
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print a value returned by the device in the configured format
    pub fn print_value(&self, value: &Value) {
        match self.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
                );
            }
            OutputFormat::Text => print_text(value),
        }
    }
}

fn print_text(value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => println!("{}", s.trim_end()),
        Value::Object(map) => {
            let rows: Vec<KeyValueRow> = map
                .iter()
                .map(|(key, value)| KeyValueRow {
                    key: key.clone(),
                    value: scalar_text(value),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Value::Array(items) if items.iter().all(Value::is_string) => {
            for item in items {
                println!("{}", scalar_text(item));
            }
        }
        other => println!(
            "{}",
            serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string())
        ),
    }
}

/// Render a value on one line, strings without quotes
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Row for mapping output
#[derive(Debug, Tabled)]
struct KeyValueRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}
