//! Assembly of render-ready transaction view items.

use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;

use crate::fee::FeeCoinProvider;
use crate::status::{resolve, TransactionStatus};
use crate::types::{
    BlockHeight, CoinType, CoinValue, CurrencyValue, LockInfo, Threshold, TransactionItem,
    TransactionType, Wallet,
};

// ==============================================================================
// Address Display Policy
// ==============================================================================

/// Coin types whose rows hide the sender address.
const HIDE_FROM_ADDRESS: &[CoinType] = &[CoinType::Bitcoin, CoinType::BitcoinCash, CoinType::Dash];

#[must_use]
pub fn show_from_address(coin_type: CoinType) -> bool {
    !HIDE_FROM_ADDRESS.contains(&coin_type)
}

// ==============================================================================
// View Item
// ==============================================================================

/// The fully resolved representation of one transaction, rebuilt on every
/// refresh and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionViewItem {
    pub wallet: Wallet,
    pub transaction_hash: String,
    pub coin_value: CoinValue,
    pub currency_value: Option<CurrencyValue>,
    /// Fee in the fee-bearing coin, which may differ from `coin_value.coin`.
    pub fee_coin_value: Option<CoinValue>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub transaction_type: TransactionType,
    pub show_from_address: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    pub status: TransactionStatus,
    pub rate: Option<CurrencyValue>,
    pub lock_info: Option<LockInfo>,
}

// ==============================================================================
// Factory
// ==============================================================================

pub struct ViewItemFactory {
    fee_coin_provider: Arc<dyn FeeCoinProvider>,
}

impl ViewItemFactory {
    pub fn new(fee_coin_provider: Arc<dyn FeeCoinProvider>) -> Self {
        Self { fee_coin_provider }
    }

    /// Build the view item for `transaction_item`.
    ///
    /// Never fails: a missing rate, fee or height leaves the corresponding
    /// field empty.
    pub fn item(
        &self,
        wallet: &Wallet,
        transaction_item: &TransactionItem,
        last_block_height: Option<BlockHeight>,
        threshold: Threshold,
        rate: Option<&CurrencyValue>,
    ) -> TransactionViewItem {
        let record = &transaction_item.record;
        let coin = &transaction_item.wallet.coin;

        let status = resolve(record.failed, record.block_height, last_block_height, threshold);

        let currency_value = rate.map(|rate| CurrencyValue {
            currency: rate.currency.clone(),
            value: record.amount * rate.value,
        });

        let fee_coin_value = record.fee.map(|fee| {
            let fee_coin = self
                .fee_coin_provider
                .fee_coin_data(coin)
                .map(|data| data.coin)
                .unwrap_or_else(|| coin.clone());
            CoinValue {
                coin: fee_coin,
                value: fee,
            }
        });

        TransactionViewItem {
            wallet: wallet.clone(),
            transaction_hash: record.transaction_hash.clone(),
            coin_value: CoinValue {
                coin: coin.clone(),
                value: record.amount,
            },
            currency_value,
            fee_coin_value,
            from: record.from.clone(),
            to: record.to.clone(),
            transaction_type: record.transaction_type,
            show_from_address: show_from_address(wallet.coin.coin_type),
            date: display_date(record.timestamp),
            status,
            rate: rate.cloned(),
            lock_info: record.lock_info.clone(),
        }
    }
}

/// `None` for the unconfirmed sentinel `0` and for out-of-range timestamps.
fn display_date(timestamp: u64) -> Option<OffsetDateTime> {
    if timestamp == 0 {
        return None;
    }
    let seconds = i64::try_from(timestamp).ok()?;
    OffsetDateTime::from_unix_timestamp(seconds).ok()
}
