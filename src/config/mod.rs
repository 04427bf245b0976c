pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "shopify-gql")]
#[command(about = "Classify Shopify GraphQL responses into outcome kinds")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Classify a saved response body
    Classify {
        /// JSON file holding the response body (or an envelope with --envelope)
        file: PathBuf,

        /// HTTP status the body was received with
        #[arg(long, default_value = "200")]
        status: u16,

        /// The file holds {"status": .., "body": ..} instead of a bare body
        #[arg(long)]
        envelope: bool,
    },
    /// Send a query to the shop and classify the response
    Query {
        /// Path to TOML configuration file
        #[arg(short, long, default_value = "shopify.toml")]
        config: PathBuf,

        /// File containing the GraphQL document
        #[arg(short, long)]
        query_file: PathBuf,

        /// JSON file with the query variables
        #[arg(long)]
        variables: Option<PathBuf>,

        #[arg(long)]
        operation_name: Option<String>,
    },
}
