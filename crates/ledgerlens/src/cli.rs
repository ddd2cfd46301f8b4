use std::path::PathBuf;

use clap::Parser;

/// LedgerLens: transaction history viewer for multi-coin wallet snapshots.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Wallet snapshot JSON file.
    #[arg(long, env = "LEDGERLENS_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Confirmations required for coins without a threshold in the snapshot.
    #[arg(long, default_value = "6", env = "LEDGERLENS_DEFAULT_THRESHOLD")]
    pub default_threshold: u32,

    /// Only show transactions of the wallet with this coin code.
    #[arg(long)]
    pub filter: Option<String>,

    /// Transactions loaded per page.
    #[arg(long, default_value = "20")]
    pub page_size: usize,

    /// Print view items as JSON instead of rendered rows.
    #[arg(long)]
    pub json: bool,

    /// UTC offset in whole hours used for dates.
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub utc_offset: i8,
}
