//! The transactions presenter: a single task that owns the list state.
//!
//! Chain heights, rates, thresholds, filters and record pages arrive as
//! [`PresenterEvent`]s. After each event the task rebuilds every view item,
//! applies them to its [`TransactionList`] and publishes one
//! [`ListSnapshot`]. A snapshot is either a full reload or a complete diff,
//! so the renderer never observes a half-applied refresh. When the
//! subscriber has gone away the result is dropped and the task exits.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::CoreError;
use crate::filter::Filter;
use crate::list::{ListUpdate, TransactionList};
use crate::types::{BlockHeight, CurrencyValue, Threshold, TransactionItem};
use crate::view_item::{TransactionViewItem, ViewItemFactory};

const EVENT_CHANNEL_CAPACITY: usize = 64;
const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

// ==============================================================================
// Events and Snapshots
// ==============================================================================

#[derive(Debug, Clone)]
pub enum PresenterEvent {
    /// Replace the loaded records (all pages loaded so far).
    SetItems(Vec<TransactionItem>),
    LastBlockHeight {
        coin_id: String,
        height: BlockHeight,
    },
    Rate {
        coin_id: String,
        rate: Option<CurrencyValue>,
    },
    Threshold {
        coin_id: String,
        threshold: Threshold,
    },
    SetFilter(Filter),
}

/// One atomic update for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot {
    pub update: ListUpdate,
    pub items: Vec<TransactionViewItem>,
}

// ==============================================================================
// Presenter State
// ==============================================================================

/// Presenter state, configured before the task is spawned.
pub struct Presenter {
    factory: ViewItemFactory,
    default_threshold: Threshold,
    records: Vec<TransactionItem>,
    last_block_heights: HashMap<String, BlockHeight>,
    rates: HashMap<String, CurrencyValue>,
    thresholds: HashMap<String, Threshold>,
    filter: Filter,
    list: TransactionList,
}

impl Presenter {
    pub fn new(factory: ViewItemFactory, default_threshold: Threshold) -> Self {
        Self {
            factory,
            default_threshold,
            records: Vec::new(),
            last_block_heights: HashMap::new(),
            rates: HashMap::new(),
            thresholds: HashMap::new(),
            filter: Filter::All,
            list: TransactionList::new(),
        }
    }

    pub fn with_last_block_height(mut self, coin_id: &str, height: BlockHeight) -> Self {
        self.last_block_heights.insert(coin_id.to_string(), height);
        self
    }

    pub fn with_rate(mut self, coin_id: &str, rate: CurrencyValue) -> Self {
        self.rates.insert(coin_id.to_string(), rate);
        self
    }

    pub fn with_threshold(mut self, coin_id: &str, threshold: Threshold) -> Self {
        self.thresholds.insert(coin_id.to_string(), threshold);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Start the presenter task. Returns the handle for sending events, the
    /// stream of snapshots, and the task's join handle.
    pub fn spawn(self) -> (PresenterHandle, mpsc::Receiver<ListSnapshot>, JoinHandle<()>) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (snapshot_tx, snapshot_rx) = mpsc::channel(SNAPSHOT_CHANNEL_CAPACITY);
        let task = tokio::spawn(self.run(event_rx, snapshot_tx));
        (PresenterHandle { tx: event_tx }, snapshot_rx, task)
    }

    async fn run(
        mut self,
        mut events: mpsc::Receiver<PresenterEvent>,
        snapshots: mpsc::Sender<ListSnapshot>,
    ) {
        while let Some(event) = events.recv().await {
            self.apply(event);
            let snapshot = self.refresh();
            if snapshots.send(snapshot).await.is_err() {
                tracing::debug!("snapshot subscriber gone, discarding refresh");
                break;
            }
        }
        tracing::debug!("presenter task stopped");
    }

    fn apply(&mut self, event: PresenterEvent) {
        match event {
            PresenterEvent::SetItems(records) => {
                tracing::debug!(count = records.len(), "records replaced");
                self.records = records;
            }
            PresenterEvent::LastBlockHeight { coin_id, height } => {
                tracing::debug!(coin = %coin_id, height = %height, "last block height updated");
                self.last_block_heights.insert(coin_id, height);
            }
            PresenterEvent::Rate { coin_id, rate } => match rate {
                Some(rate) => {
                    self.rates.insert(coin_id, rate);
                }
                None => {
                    self.rates.remove(&coin_id);
                }
            },
            PresenterEvent::Threshold { coin_id, threshold } => {
                self.thresholds.insert(coin_id, threshold);
            }
            PresenterEvent::SetFilter(filter) => {
                self.filter = filter;
            }
        }
    }

    /// Rebuild every view item and apply them to the list.
    fn refresh(&mut self) -> ListSnapshot {
        let items: Vec<TransactionViewItem> = self
            .records
            .iter()
            .filter(|record| self.filter.matches(&record.wallet))
            .map(|record| {
                let coin_id = &record.wallet.coin.id;
                self.factory.item(
                    &record.wallet,
                    record,
                    self.last_block_heights.get(coin_id).copied(),
                    self.thresholds
                        .get(coin_id)
                        .copied()
                        .unwrap_or(self.default_threshold),
                    self.rates.get(coin_id),
                )
            })
            .collect();

        let update = self.list.set_items(items);
        ListSnapshot {
            update,
            items: self.list.items().to_vec(),
        }
    }
}

// ==============================================================================
// Handle
// ==============================================================================

#[derive(Debug, Clone)]
pub struct PresenterHandle {
    tx: mpsc::Sender<PresenterEvent>,
}

impl PresenterHandle {
    pub async fn send(&self, event: PresenterEvent) -> Result<(), CoreError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| CoreError::PresenterClosed)
    }
}
