mod cli;
mod render;

use std::sync::Arc;

use clap::Parser;
use eyre::{eyre, WrapErr};
use time::UtcOffset;

use ledgerlens_core::filter::{Filter, FilterList};
use ledgerlens_core::format::DisplayFormatter;
use ledgerlens_core::presenter::Presenter;
use ledgerlens_core::snapshot::WalletSnapshot;
use ledgerlens_core::{Threshold, ViewItemFactory};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let default_threshold =
        Threshold::new(args.default_threshold).context("invalid --default-threshold")?;
    if args.page_size == 0 {
        return Err(eyre!("--page-size must be greater than zero"));
    }
    let offset = UtcOffset::from_hms(args.utc_offset, 0, 0).context("invalid --utc-offset")?;

    let snapshot = WalletSnapshot::load(&args.snapshot)
        .with_context(|| format!("load snapshot {}", args.snapshot.display()))?;
    let records = snapshot
        .transaction_items()
        .context("resolve snapshot transactions")?;
    tracing::info!(
        wallets = snapshot.wallets.len(),
        transactions = records.len(),
        "loaded wallet snapshot"
    );

    let mut filters = FilterList::new();
    filters.set_wallets(&snapshot.wallets);
    let filter = match &args.filter {
        Some(code) => filters
            .select_by_label(code)
            .ok_or_else(|| eyre!("no wallet with coin code `{code}` in snapshot"))?,
        None => Filter::All,
    };

    // Assemble the presenter with everything the snapshot knows up front.
    let factory = ViewItemFactory::new(Arc::new(snapshot.fee_coin_provider()));
    let mut presenter = Presenter::new(factory, default_threshold).with_filter(filter.clone());
    for (coin_id, height) in &snapshot.last_block_heights {
        presenter = presenter.with_last_block_height(coin_id, *height);
    }
    for (coin_id, threshold) in &snapshot.thresholds {
        presenter = presenter.with_threshold(coin_id, *threshold);
    }
    for (coin_id, rate) in &snapshot.rates {
        presenter = presenter.with_rate(coin_id, rate.clone());
    }
    let (handle, mut snapshots, task) = presenter.spawn();

    let list = render::load_history(&handle, &mut snapshots, &records, args.page_size).await?;

    drop(handle);
    task.await.context("join presenter task")?;

    if args.json {
        let json = serde_json::to_string_pretty(list.items()).context("serialize view items")?;
        println!("{json}");
        return Ok(());
    }

    let formatter = DisplayFormatter::new(offset);
    println!("{}", render::filter_bar(&filters.rows()));
    if let Filter::Wallet(wallet) = &filter {
        if let Some(info) = snapshot.market_info.get(&wallet.coin.id) {
            for line in render::market_header(info, &formatter) {
                println!("{line}");
            }
        }
    }
    println!();
    for line in render::history_lines(&list, &formatter) {
        println!("{line}");
    }

    Ok(())
}
