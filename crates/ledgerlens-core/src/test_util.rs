//! Shared test helpers for `ledgerlens-core` unit tests.
//!
//! Builders for coins, wallets, records and rates so that tests across
//! modules share a single source of dummy data.

use rust_decimal::Decimal;

use crate::types::{
    BlockHeight, Coin, CoinType, Currency, CurrencyValue, TransactionItem, TransactionRecord,
    TransactionType, Wallet,
};

// ==============================================================================
// Coins and Wallets
// ==============================================================================

pub fn coin(id: &str, code: &str, coin_type: CoinType, decimals: u32) -> Coin {
    Coin {
        id: id.into(),
        title: code.into(),
        code: code.into(),
        decimals,
        coin_type,
    }
}

pub fn bitcoin_coin() -> Coin {
    Coin {
        title: "Bitcoin".into(),
        ..coin("btc", "BTC", CoinType::Bitcoin, 8)
    }
}

pub fn ethereum_coin() -> Coin {
    Coin {
        title: "Ethereum".into(),
        ..coin("eth", "ETH", CoinType::Ethereum, 18)
    }
}

pub fn erc20_coin() -> Coin {
    Coin {
        title: "Dai".into(),
        ..coin("dai", "DAI", CoinType::Erc20, 18)
    }
}

pub fn wallet(coin: Coin) -> Wallet {
    Wallet {
        coin,
        account_id: "main".into(),
    }
}

// ==============================================================================
// Records
// ==============================================================================

/// An incoming, confirmed record with no fee. Override fields as needed.
pub fn record(hash: &str) -> TransactionRecord {
    TransactionRecord {
        transaction_hash: hash.into(),
        amount: Decimal::new(15, 1),
        block_height: Some(BlockHeight(100)),
        fee: None,
        from: Some("sender-address".into()),
        to: Some("receiver-address".into()),
        transaction_type: TransactionType::Incoming,
        timestamp: 1_600_000_000,
        failed: false,
        lock_info: None,
    }
}

pub fn tx_item(wallet: &Wallet, record: TransactionRecord) -> TransactionItem {
    TransactionItem {
        wallet: wallet.clone(),
        record,
    }
}

// ==============================================================================
// Rates
// ==============================================================================

pub fn usd() -> Currency {
    Currency {
        code: "USD".into(),
        symbol: "$".into(),
        decimals: 2,
    }
}

pub fn usd_rate(value: Decimal) -> CurrencyValue {
    CurrencyValue {
        currency: usd(),
        value,
    }
}
