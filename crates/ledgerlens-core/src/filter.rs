//! The wallet filter bar shown above the transaction list.

use serde::Serialize;

use crate::types::Wallet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "wallet", rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Wallet(Wallet),
}

impl Filter {
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Wallet(wallet) => &wallet.coin.code,
        }
    }

    pub fn matches(&self, wallet: &Wallet) -> bool {
        match self {
            Self::All => true,
            Self::Wallet(selected) => selected == wallet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterRow {
    pub label: String,
    pub active: bool,
}

/// Filters plus the current selection. Selection is frozen while the
/// transaction list is scrolling.
#[derive(Debug, Clone)]
pub struct FilterList {
    filters: Vec<Filter>,
    selected: Filter,
    changeable: bool,
}

impl Default for FilterList {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterList {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            selected: Filter::All,
            changeable: true,
        }
    }

    /// Replace the filters and reset the selection to `All`.
    pub fn set_filters(&mut self, filters: Vec<Filter>) {
        self.filters = filters;
        self.selected = Filter::All;
    }

    /// `All` followed by one filter per wallet.
    pub fn set_wallets<'a>(&mut self, wallets: impl IntoIterator<Item = &'a Wallet>) {
        let filters = std::iter::once(Filter::All)
            .chain(wallets.into_iter().cloned().map(Filter::Wallet))
            .collect();
        self.set_filters(filters);
    }

    pub fn selected(&self) -> &Filter {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Called with the list's scroll state; selection only changes while idle.
    pub fn set_scroll_idle(&mut self, idle: bool) {
        self.changeable = idle;
    }

    /// Select the filter at `position`, returning it so the caller can
    /// re-query transactions. `None` when selection is frozen or the
    /// position is stale.
    pub fn select(&mut self, position: usize) -> Option<Filter> {
        if !self.changeable {
            tracing::debug!(position, "filter selection ignored while scrolling");
            return None;
        }
        let Some(filter) = self.filters.get(position) else {
            tracing::warn!(position, len = self.filters.len(), "stale filter position");
            return None;
        };
        self.selected = filter.clone();
        Some(filter.clone())
    }

    /// Select the filter whose label equals `code`.
    pub fn select_by_label(&mut self, code: &str) -> Option<Filter> {
        let position = self
            .filters
            .iter()
            .position(|f| f.label().eq_ignore_ascii_case(code))?;
        self.select(position)
    }

    pub fn rows(&self) -> Vec<FilterRow> {
        self.filters
            .iter()
            .map(|filter| FilterRow {
                label: filter.label().to_string(),
                active: *filter == self.selected,
            })
            .collect()
    }
}
