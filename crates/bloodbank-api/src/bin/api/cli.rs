use std::path::PathBuf;

use bloodbank_api::StoreBackend;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to ./bloodbank.toml when present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Port to listen on, overrides configuration
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Document store backend, overrides configuration
    #[arg(long, value_enum)]
    pub store: Option<StoreBackend>,

    /// Verbose pretty logs for local development
    #[arg(long)]
    pub dev: bool,
}
