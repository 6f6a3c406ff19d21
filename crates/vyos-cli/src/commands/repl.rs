//! Interactive session - read commands from stdin until `exit` or EOF

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use vyos_client::VyosClient;

use super::{execute, Commands};
use crate::output::OutputContext;

const PROMPT: &str = "vyos> ";

/// One REPL line, parsed with the same grammar as the command line
#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ReplLine {
    #[command(subcommand)]
    command: Commands,
}

/// Run commands interactively against one client
pub async fn repl(client: &VyosClient, ctx: &OutputContext) -> Result<()> {
    ctx.info(&format!(
        "Connected to {} (type `help` for commands, `exit` to quit)",
        client.base_url()
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let words = match split_line(&line) {
            Ok(words) => words,
            Err(e) => {
                ctx.error(&e);
                continue;
            }
        };

        match words.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => break,
            _ => {}
        }

        let parsed = match ReplLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Also covers `help`, which clap reports as an error kind
                let _ = e.print();
                continue;
            }
        };

        if matches!(parsed.command, Commands::Repl) {
            ctx.error("Already in an interactive session");
            continue;
        }

        debug!("REPL command: {:?}", parsed.command);
        if let Err(e) = execute(client, &parsed.command, ctx).await {
            ctx.error(&format!("Error: {:#}", e));
        }
    }

    Ok(())
}

/// Split a line into words on whitespace, with double quotes grouping words
fn split_line(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_quotes {
        return Err("Unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line("set system host-name edge-01").unwrap(),
            vec!["set", "system", "host-name", "edge-01"]
        );
        assert_eq!(
            split_line(r#"comment interfaces ethernet eth0 "WAN uplink""#).unwrap(),
            vec!["comment", "interfaces", "ethernet", "eth0", "WAN uplink"]
        );
        assert!(split_line("   ").unwrap().is_empty());
        assert_eq!(split_line(r#"set a """#).unwrap(), vec!["set", "a", ""]);
    }

    #[test]
    fn test_split_line_unterminated_quote() {
        assert!(split_line(r#"set a "b"#).is_err());
    }

    #[test]
    fn test_parse_repl_line() {
        let words = split_line("show interfaces ethernet").unwrap();
        let parsed = ReplLine::try_parse_from(&words).unwrap();
        match parsed.command {
            Commands::Show { path } => assert_eq!(path, vec!["interfaces", "ethernet"]),
            other => panic!("unexpected command: {:?}", other),
        }

        let words = split_line("image remove 1.3.8").unwrap();
        assert!(ReplLine::try_parse_from(&words).is_ok());

        let words = split_line("set system").unwrap();
        assert!(ReplLine::try_parse_from(&words).is_err());
    }
}
