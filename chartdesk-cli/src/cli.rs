use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chartdesk")]
#[command(about = "View and upload market chart data", long_about = None)]
pub struct Cli {
    /// Backend address; overrides CHARTDESK_API_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a market view and print its chart data
    Show {
        /// View path, e.g. /cn, /us, /hk or /
        #[arg(default_value = "/")]
        path: String,
    },
    /// Upload a data file for the market behind a view, then refresh it
    Upload {
        /// View path, e.g. /hk
        path: String,
        /// File type segment of the upload endpoint, e.g. prices
        file_type: String,
        /// File to upload
        file: PathBuf,
    },
    /// List the available views
    Routes,
}
