//! Fee-coin lookup.
//!
//! Token transfers pay network fees in the chain's base coin (an ERC20
//! transfer pays in ETH). [`FeeCoinProvider`] answers which coin a
//! transaction's fee is denominated in; [`StaticFeeCoinProvider`] is a
//! table-driven implementation keyed by coin type.

use std::collections::HashMap;

use crate::types::{Coin, CoinType};

/// The coin fees are paid in, and the token protocol that routes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeCoinData {
    pub coin: Coin,
    pub protocol: String,
}

/// Maps a transaction's coin to the coin its fees are denominated in.
///
/// `None` means fees are paid in the coin itself.
pub trait FeeCoinProvider: Send + Sync {
    fn fee_coin_data(&self, coin: &Coin) -> Option<FeeCoinData>;
}

/// Default token routing: (token type, fee-bearing base coin type, protocol).
const DEFAULT_FEE_ROUTES: &[(CoinType, CoinType, &str)] = &[
    (CoinType::Erc20, CoinType::Ethereum, "ERC20"),
    (CoinType::Bep2, CoinType::Binance, "BEP2"),
];

#[derive(Debug, Clone, Default)]
pub struct StaticFeeCoinProvider {
    routes: HashMap<CoinType, FeeCoinData>,
}

impl StaticFeeCoinProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the default token routes from the base coins available in
    /// `coins`. Routes whose base coin is missing are skipped.
    pub fn from_coins<'a>(coins: impl IntoIterator<Item = &'a Coin>) -> Self {
        let coins: Vec<&Coin> = coins.into_iter().collect();
        let mut provider = Self::new();
        for (token_type, base_type, protocol) in DEFAULT_FEE_ROUTES {
            match coins.iter().find(|c| c.coin_type == *base_type) {
                Some(base) => {
                    provider = provider.with_route(*token_type, (*base).clone(), *protocol);
                }
                None => {
                    tracing::debug!(
                        token_type = %token_type,
                        base_type = %base_type,
                        "no base coin for fee route"
                    );
                }
            }
        }
        provider
    }

    /// Route fees of every coin of `coin_type` to `fee_coin`.
    pub fn with_route(mut self, coin_type: CoinType, fee_coin: Coin, protocol: &str) -> Self {
        self.routes.insert(
            coin_type,
            FeeCoinData {
                coin: fee_coin,
                protocol: protocol.to_string(),
            },
        );
        self
    }
}

impl FeeCoinProvider for StaticFeeCoinProvider {
    fn fee_coin_data(&self, coin: &Coin) -> Option<FeeCoinData> {
        self.routes
            .get(&coin.coin_type)
            .filter(|data| data.coin != *coin)
            .cloned()
    }
}
