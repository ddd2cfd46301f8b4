//! Wallet snapshot files.
//!
//! A snapshot is a JSON document describing wallets, their transaction
//! records, and the chain heights, thresholds, rates and market data known
//! at the time it was taken. All per-coin maps are keyed by coin id.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::chart::MarketInfo;
use crate::error::CoreError;
use crate::fee::StaticFeeCoinProvider;
use crate::types::{
    BlockHeight, CurrencyValue, Threshold, TransactionItem, TransactionRecord, Wallet,
};

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotTransaction {
    /// Coin id of the owning wallet.
    pub wallet: String,
    #[serde(flatten)]
    pub record: TransactionRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletSnapshot {
    pub wallets: Vec<Wallet>,
    #[serde(default)]
    pub transactions: Vec<SnapshotTransaction>,
    #[serde(default)]
    pub last_block_heights: HashMap<String, BlockHeight>,
    #[serde(default)]
    pub thresholds: HashMap<String, Threshold>,
    #[serde(default)]
    pub rates: HashMap<String, CurrencyValue>,
    #[serde(default)]
    pub market_info: HashMap<String, MarketInfo>,
}

impl WalletSnapshot {
    pub fn parse(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|e| CoreError::SnapshotParse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn wallet(&self, coin_id: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.coin.id == coin_id)
    }

    /// Pair every record with its wallet, keeping file order. A record
    /// naming an unknown wallet is an error.
    pub fn transaction_items(&self) -> Result<Vec<TransactionItem>, CoreError> {
        self.transactions
            .iter()
            .map(|tx| {
                let wallet = self.wallet(&tx.wallet).ok_or_else(|| {
                    CoreError::SnapshotParse(format!(
                        "transaction {} references unknown wallet `{}`",
                        tx.record.transaction_hash, tx.wallet
                    ))
                })?;
                Ok(TransactionItem {
                    wallet: wallet.clone(),
                    record: tx.record.clone(),
                })
            })
            .collect()
    }

    /// Fee routes for the base coins present in this snapshot.
    pub fn fee_coin_provider(&self) -> StaticFeeCoinProvider {
        StaticFeeCoinProvider::from_coins(self.wallets.iter().map(|w| &w.coin))
    }
}
