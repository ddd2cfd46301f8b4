//! Domain types for the wallet presentation model.
//!
//! Contains the coin and wallet descriptions (`Coin`, `CoinType`, `Wallet`),
//! value types (`CoinValue`, `CurrencyValue`), the raw transaction input
//! (`TransactionRecord`, `TransactionItem`), and the `BlockHeight` and
//! `Threshold` newtypes used by status resolution.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ==============================================================================
// Coins and Wallets
// ==============================================================================

/// Chain or protocol family of a coin.
///
/// Only consulted for display policy (whether the sender address is shown)
/// and for the default fee-coin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinType {
    Bitcoin,
    BitcoinCash,
    Dash,
    Ethereum,
    Erc20,
    Binance,
    Bep2,
    Eos,
    Zcash,
    Other,
}

impl CoinType {
    /// Explorer shown to users restoring a wallet from the chain.
    pub fn restore_url(&self) -> &'static str {
        match self {
            Self::Bitcoin => "https://blockstream.info",
            Self::BitcoinCash => "https://blockchair.com/bitcoin-cash",
            Self::Dash => "https://insight.dash.org",
            Self::Ethereum | Self::Erc20 => "https://etherscan.io",
            Self::Binance | Self::Bep2 => "https://explorer.binance.org",
            Self::Eos => "https://bloks.io",
            Self::Zcash => "https://explorer.zcha.in",
            Self::Other => "",
        }
    }
}

impl std::fmt::Display for CoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bitcoin => write!(f, "bitcoin"),
            Self::BitcoinCash => write!(f, "bitcoin_cash"),
            Self::Dash => write!(f, "dash"),
            Self::Ethereum => write!(f, "ethereum"),
            Self::Erc20 => write!(f, "erc20"),
            Self::Binance => write!(f, "binance"),
            Self::Bep2 => write!(f, "bep2"),
            Self::Eos => write!(f, "eos"),
            Self::Zcash => write!(f, "zcash"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    pub title: String,
    pub code: String,
    pub decimals: u32,
    pub coin_type: CoinType,
}

/// A wallet holding a single coin within an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wallet {
    pub coin: Coin,
    #[serde(default)]
    pub account_id: String,
}

// ==============================================================================
// Values
// ==============================================================================

/// A fiat currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub decimals: u32,
}

/// A decimal amount denominated in a fiat currency. Also used for rates,
/// where `value` is the price of one coin unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyValue {
    pub currency: Currency,
    pub value: Decimal,
}

/// A decimal amount denominated in a coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinValue {
    pub coin: Coin,
    pub value: Decimal,
}

// ==============================================================================
// Block Height and Threshold
// ==============================================================================

/// A block height, wrapped for type safety.
///
/// `#[serde(transparent)]` keeps the JSON representation a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHeight(pub u32);

impl From<u32> for BlockHeight {
    fn from(h: u32) -> Self {
        Self(h)
    }
}

impl From<BlockHeight> for u32 {
    fn from(h: BlockHeight) -> Self {
        h.0
    }
}

impl std::ops::Deref for BlockHeight {
    type Target = u32;
    fn deref(&self) -> &u32 {
        &self.0
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Number of confirmations after which a transaction counts as completed.
///
/// Always at least one; a zero threshold is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Threshold(NonZeroU32);

impl Threshold {
    pub fn new(confirmations: u32) -> Result<Self, CoreError> {
        NonZeroU32::new(confirmations)
            .map(Self)
            .ok_or(CoreError::InvalidThreshold(confirmations))
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for Threshold {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for u32 {
    fn from(t: Threshold) -> Self {
        t.get()
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ==============================================================================
// Transaction Records
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Incoming,
    Outgoing,
    SentToSelf,
}

/// Time-lock metadata attached to a transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockInfo {
    /// Unix seconds until which the output cannot be spent.
    pub locked_until: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_address: Option<String>,
}

/// A transaction as reported by the chain-sync collaborator for one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_hash: String,
    /// Signed amount in the wallet's coin.
    pub amount: Decimal,
    /// Block height; `None` while the transaction is unconfirmed.
    #[serde(default)]
    pub block_height: Option<BlockHeight>,
    #[serde(default)]
    pub fee: Option<Decimal>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Unix seconds; `0` when no confirmation time is known yet.
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub failed: bool,
    #[serde(default)]
    pub lock_info: Option<LockInfo>,
}

/// A record together with the wallet it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionItem {
    pub wallet: Wallet,
    pub record: TransactionRecord,
}
