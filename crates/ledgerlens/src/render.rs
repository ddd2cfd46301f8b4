use eyre::{eyre, WrapErr};
use tokio::sync::mpsc;

use ledgerlens_core::chart::{MarketInfo, MarketInfoView};
use ledgerlens_core::filter::FilterRow;
use ledgerlens_core::format::{Direction, DisplayFormatter, TransactionRow};
use ledgerlens_core::list::{PageSource, RowKind, TransactionList};
use ledgerlens_core::presenter::{ListSnapshot, PresenterEvent, PresenterHandle};
use ledgerlens_core::types::TransactionItem;
use ledgerlens_core::TransactionViewItem;

// ==============================================================================
// Pagination
// ==============================================================================

#[derive(Default)]
struct Pager {
    requested: bool,
}

impl PageSource for Pager {
    fn on_bottom_reached(&mut self) {
        self.requested = true;
    }
}

/// Feed `records` to the presenter one page at a time, applying each
/// published update and binding the rows it touched, until binding stops
/// asking for more or every record is loaded.
pub async fn load_history(
    handle: &PresenterHandle,
    snapshots: &mut mpsc::Receiver<ListSnapshot>,
    records: &[TransactionItem],
    page_size: usize,
) -> eyre::Result<TransactionList> {
    let mut list = TransactionList::new();
    let mut loaded = page_size.min(records.len());

    handle
        .send(PresenterEvent::SetItems(records[..loaded].to_vec()))
        .await
        .context("send first page to presenter")?;

    loop {
        let snapshot = snapshots
            .recv()
            .await
            .ok_or_else(|| eyre!("presenter stopped before delivering transactions"))?;
        let update = list.apply_update(snapshot.update, snapshot.items);
        tracing::debug!(loaded, rows = list.row_count(), ?update, "applied list snapshot");

        let mut pager = Pager::default();
        if list.needs_more() {
            pager.on_bottom_reached();
        } else {
            let rows = update.rows_to_bind(list.row_count());
            if rows.is_empty() {
                // Nothing new arrived, so the last row is still on screen.
                list.bind(list.row_count() - 1, &mut pager);
            }
            for position in rows {
                list.bind(position, &mut pager);
            }
        }

        if !pager.requested || loaded >= records.len() {
            break;
        }
        loaded = (loaded + page_size).min(records.len());
        tracing::debug!(loaded, "loading next page");
        handle
            .send(PresenterEvent::SetItems(records[..loaded].to_vec()))
            .await
            .context("send next page to presenter")?;
    }

    tracing::info!(
        loaded,
        shown = list.len(),
        "transaction history loaded"
    );
    Ok(list)
}

// ==============================================================================
// Text Output
// ==============================================================================

pub fn filter_bar(rows: &[FilterRow]) -> String {
    rows.iter()
        .map(|row| {
            if row.active {
                format!("[{}]", row.label)
            } else {
                row.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn market_header(info: &MarketInfo, formatter: &DisplayFormatter) -> Vec<String> {
    let view = MarketInfoView::new(info, formatter);
    let mut lines = vec![format!(
        "rate {}  cap {}  volume {}",
        view.rate, view.market_cap, view.volume
    )];
    lines.push(format!(
        "supply {}  max supply {}",
        view.supply, view.max_supply
    ));
    if let Some(updated_at) = view.updated_at {
        lines.push(format!("updated {updated_at}"));
    }
    lines
}

pub fn history_lines(list: &TransactionList, formatter: &DisplayFormatter) -> Vec<String> {
    (0..list.row_count())
        .filter_map(|position| match list.row(position)? {
            RowKind::Empty => Some("No transactions".to_string()),
            RowKind::Transaction {
                item,
                show_bottom_shade,
            } => Some(row_line(
                item,
                &TransactionRow::bind(item, show_bottom_shade, formatter),
            )),
        })
        .collect()
}

fn row_line(item: &TransactionViewItem, row: &TransactionRow) -> String {
    let arrow = match row.direction {
        Direction::Incoming => "IN ",
        Direction::Outgoing => "OUT",
    };
    let mut line = format!(
        "{:<6} {:<5}  {arrow} {:>22} {:>14}  {}",
        row.date_text.as_deref().unwrap_or("-"),
        row.time_text.as_deref().unwrap_or(""),
        row.coin_text,
        row.fiat_text.as_deref().unwrap_or(""),
        row.status_text,
    );

    let counterparty = match row.direction {
        Direction::Incoming if item.show_from_address => {
            item.from.as_deref().map(|addr| format!("from {addr}"))
        }
        Direction::Incoming => None,
        Direction::Outgoing => item.to.as_deref().map(|addr| format!("to {addr}")),
    };
    if let Some(counterparty) = counterparty {
        line.push_str("  ");
        line.push_str(&counterparty);
    }
    if row.sent_to_self {
        line.push_str("  (self)");
    }
    if row.locked {
        line.push_str("  (locked)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_bar_brackets_active_filter() {
        let rows = vec![
            FilterRow {
                label: "All".into(),
                active: false,
            },
            FilterRow {
                label: "BTC".into(),
                active: true,
            },
        ];
        assert_eq!(filter_bar(&rows), "All  [BTC]");
    }

    #[test]
    fn empty_history_prints_placeholder() {
        let lines = history_lines(&TransactionList::new(), &DisplayFormatter::default());
        assert_eq!(lines, vec!["No transactions".to_string()]);
    }
}
