//! The transaction list: ordered view items, row kinds, diff-driven updates
//! and the bottom-reached pagination signal.

use serde::Serialize;

use crate::diff::{diff, EditOp, EditScript};
use crate::view_item::TransactionViewItem;

/// How many rows before the end of the list binding starts asking the
/// page source for more.
pub const LOAD_MORE_LOOKAHEAD: usize = 8;

// ==============================================================================
// Rows and Updates
// ==============================================================================

/// Receives the request to load the next page of transactions.
pub trait PageSource {
    fn on_bottom_reached(&mut self);
}

/// What a row position renders as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowKind<'a> {
    /// Placeholder shown when there are no transactions.
    Empty,
    Transaction {
        item: &'a TransactionViewItem,
        /// Only the last row draws the bottom shade.
        show_bottom_shade: bool,
    },
}

/// How the renderer must apply a `set_items` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListUpdate {
    /// Re-render every row.
    Reload,
    /// Re-render only the rows named by the script.
    Diff { script: EditScript },
}

impl ListUpdate {
    /// `true` when the newest transaction moved to the head of the list and
    /// the renderer should scroll back to the top.
    pub fn inserted_at_top(&self) -> bool {
        match self {
            Self::Reload => false,
            Self::Diff { script } => script.inserts_at_top(),
        }
    }

    /// Row positions, in the updated list, that must be bound again.
    pub fn rows_to_bind(&self, row_count: usize) -> Vec<usize> {
        match self {
            Self::Reload => (0..row_count).collect(),
            Self::Diff { script } => {
                let mut rows: Vec<usize> = script
                    .ops()
                    .iter()
                    .filter_map(|op| match *op {
                        EditOp::Insert { index } | EditOp::Change { index } => Some(index),
                        EditOp::Remove { .. } => None,
                    })
                    .collect();
                rows.sort_unstable();
                rows.dedup();
                rows
            }
        }
    }
}

// ==============================================================================
// Transaction List
// ==============================================================================

#[derive(Debug, Clone, Default)]
pub struct TransactionList {
    items: Vec<TransactionViewItem>,
}

impl TransactionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TransactionViewItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// An empty list should immediately ask for the first page.
    pub fn needs_more(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the items wholesale. The first population is a `Reload`;
    /// later ones are diffed against the current items by transaction hash.
    pub fn set_items(&mut self, items: Vec<TransactionViewItem>) -> ListUpdate {
        if self.items.is_empty() {
            self.items = items;
            return ListUpdate::Reload;
        }

        let script = diff(
            &self.items,
            &items,
            |item| item.transaction_hash.clone(),
            |a, b| a == b,
        );
        tracing::debug!(
            old_len = self.items.len(),
            new_len = items.len(),
            ops = script.len(),
            "diffed transaction list"
        );
        self.items = items;
        ListUpdate::Diff { script }
    }

    /// Apply an update computed by another list holding the same items,
    /// such as the presenter's. `items` is the sequence the update was
    /// computed for. A diff that does not fit the current items falls back
    /// to a reload, which the returned update reports.
    pub fn apply_update(
        &mut self,
        update: ListUpdate,
        items: Vec<TransactionViewItem>,
    ) -> ListUpdate {
        let ListUpdate::Diff { script } = update else {
            self.items = items;
            return ListUpdate::Reload;
        };

        match script.apply(&self.items, &items) {
            Some(replayed) => {
                self.items = replayed;
                ListUpdate::Diff { script }
            }
            None => {
                tracing::warn!(
                    len = self.items.len(),
                    ops = script.len(),
                    "list update does not fit current items, reloading"
                );
                self.items = items;
                ListUpdate::Reload
            }
        }
    }

    /// Number of rows, counting the placeholder row of an empty list.
    pub fn row_count(&self) -> usize {
        self.items.len().max(1)
    }

    /// The row at `position`, or `None` for a position that no longer
    /// exists (the list changed under a pending bind).
    pub fn row(&self, position: usize) -> Option<RowKind<'_>> {
        if self.items.is_empty() {
            return if position == 0 {
                Some(RowKind::Empty)
            } else {
                tracing::warn!(position, "row requested past placeholder row");
                None
            };
        }

        match self.items.get(position) {
            Some(item) => Some(RowKind::Transaction {
                item,
                show_bottom_shade: position + 1 == self.items.len(),
            }),
            None => {
                tracing::warn!(position, len = self.items.len(), "stale row position");
                None
            }
        }
    }

    /// Bind the row at `position`, signalling `source` when the position
    /// is within [`LOAD_MORE_LOOKAHEAD`] rows of the end.
    pub fn bind(&self, position: usize, source: &mut dyn PageSource) -> Option<RowKind<'_>> {
        if position + LOAD_MORE_LOOKAHEAD + 1 > self.row_count() {
            source.on_bottom_reached();
        }
        self.row(position)
    }

    /// The item under a click at `position`.
    pub fn item_at(&self, position: usize) -> Option<&TransactionViewItem> {
        let item = self.items.get(position);
        if item.is_none() {
            tracing::warn!(position, len = self.items.len(), "click on stale row position");
        }
        item
    }
}
