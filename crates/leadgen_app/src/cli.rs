use std::path::PathBuf;

use clap::Parser;

use crate::config::{LogTarget, DEFAULT_CONFIG_PATH};

#[derive(Debug, Parser)]
#[command(name = "leadgen")]
#[command(about = "Terminal console for the lead-gen dashboard", version)]
pub struct Args {
    /// RON configuration file; missing files fall back to defaults
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Dashboard base URL, e.g. http://localhost:5000
    #[arg(long)]
    pub base_url: Option<String>,

    /// Rows per result page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Where log output goes
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,
}
