//! Command implementations for vyos-cli

pub mod configure;
pub mod image;
pub mod operational;
pub mod repl;

use anyhow::{bail, Result};
use clap::Subcommand;
use vyos_client::VyosClient;

use crate::output::OutputContext;

pub use repl::repl;

/// Commands available both on the command line and in the REPL
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show configuration at a path (whole tree when empty)
    Get {
        /// Path segments, e.g. `system host-name`
        path: Vec<String>,
    },

    /// Set a configuration value and commit
    Set {
        /// Path segments followed by the value
        #[arg(required = true, num_args = 2..)]
        words: Vec<String>,
    },

    /// Delete a configuration path and commit
    Delete {
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// Comment a configuration node
    Comment {
        /// Path segments followed by the comment text
        #[arg(required = true, num_args = 2..)]
        words: Vec<String>,
    },

    /// Check whether a configuration path exists
    Exists {
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// List the values of a multi-value node
    Values {
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// Save the running configuration
    Save {
        /// Target file (default: /config/config.boot)
        file: Option<String>,
    },

    /// Load a configuration file
    Load {
        /// Source file (default: /config/config.boot)
        file: Option<String>,
    },

    /// Manage system images
    #[command(subcommand)]
    Image(ImageCommands),

    /// Run an operational `show` command
    Show {
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// Run an operational `generate` command
    Generate {
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// Run an operational `reset` command
    Reset {
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// Interactive session
    Repl,
}

#[derive(Debug, Subcommand)]
pub enum ImageCommands {
    /// Download and install an image
    Add {
        /// Image URL
        url: String,
    },

    /// Remove an installed image
    Remove {
        /// Image name
        name: String,
    },
}

/// Run one command against the device
///
/// `Repl` is handled by the caller.
pub async fn execute(client: &VyosClient, command: &Commands, ctx: &OutputContext) -> Result<()> {
    match command {
        Commands::Get { path } => configure::get(client, &path.join(" "), ctx).await,
        Commands::Set { words } => {
            let (path, value) = split_value(words);
            configure::set(client, &path, value, ctx).await
        }
        Commands::Delete { path } => configure::delete(client, &path.join(" "), ctx).await,
        Commands::Comment { words } => {
            let (path, value) = split_value(words);
            configure::comment(client, &path, value, ctx).await
        }
        Commands::Exists { path } => configure::exists(client, &path.join(" "), ctx).await,
        Commands::Values { path } => configure::values(client, &path.join(" "), ctx).await,
        Commands::Save { file } => configure::save(client, file.as_deref(), ctx).await,
        Commands::Load { file } => configure::load(client, file.as_deref(), ctx).await,
        Commands::Image(ImageCommands::Add { url }) => image::add(client, url, ctx).await,
        Commands::Image(ImageCommands::Remove { name }) => image::remove(client, name, ctx).await,
        Commands::Show { path } => operational::show(client, &path.join(" "), ctx).await,
        Commands::Generate { path } => operational::generate(client, &path.join(" "), ctx).await,
        Commands::Reset { path } => operational::reset(client, &path.join(" "), ctx).await,
        Commands::Repl => bail!("already in an interactive session"),
    }
}

/// Split `[path.., value]` into a space-joined path and the value
fn split_value(words: &[String]) -> (String, &str) {
    match words.split_last() {
        Some((value, path)) => (path.join(" "), value.as_str()),
        None => (String::new(), ""),
    }
}
