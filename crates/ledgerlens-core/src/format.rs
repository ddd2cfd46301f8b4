//! Display formatting for transaction rows.
//!
//! [`DisplayFormatter`] turns values and instants into the strings a row
//! shows; [`TransactionRow`] is the bound result for one view item.

use rust_decimal::Decimal;
use serde::Serialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::status::TransactionStatus;
use crate::types::{CoinValue, CurrencyValue, TransactionType};
use crate::view_item::TransactionViewItem;

const SHORT_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none]");
const ONLY_TIME: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const FULL_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [hour]:[minute]");
const DATE_WITH_YEAR: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Coin amounts never show more fraction digits than this.
pub const MAX_COIN_FRACTION_DIGITS: u32 = 8;

// ==============================================================================
// Formatter
// ==============================================================================

#[derive(Debug, Clone, Copy)]
pub struct DisplayFormatter {
    offset: UtcOffset,
    max_coin_fraction_digits: u32,
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new(UtcOffset::UTC)
    }
}

impl DisplayFormatter {
    /// A formatter rendering dates in the given local offset.
    pub fn new(offset: UtcOffset) -> Self {
        Self {
            offset,
            max_coin_fraction_digits: MAX_COIN_FRACTION_DIGITS,
        }
    }

    pub fn with_max_coin_fraction_digits(mut self, digits: u32) -> Self {
        self.max_coin_fraction_digits = digits;
        self
    }

    /// Signed coin amount trimmed to the coin's precision, e.g. `+1.5 BTC`.
    pub fn coin_value(&self, value: &CoinValue) -> String {
        let digits = value.coin.decimals.min(self.max_coin_fraction_digits);
        let magnitude = value.value.abs().round_dp(digits).normalize();
        format!("{}{magnitude} {}", sign(value.value, magnitude), value.coin.code)
    }

    /// Fiat amount of a transaction, signed by direction, e.g. `-$12.50`.
    pub fn currency_for_transaction(&self, value: &CurrencyValue, incoming: bool) -> String {
        let decimals = value.currency.decimals;
        let magnitude = value.value.abs().round_dp(decimals);
        let sign = if incoming { "+" } else { "-" };
        format!(
            "{sign}{}{magnitude:.prec$}",
            value.currency.symbol,
            prec = decimals as usize
        )
    }

    /// Plain fiat amount without grouping, e.g. `$9000.00`.
    pub fn currency(&self, value: &CurrencyValue) -> String {
        let decimals = value.currency.decimals;
        let magnitude = value.value.abs().round_dp(decimals);
        let sign = if value.value.is_sign_negative() && !magnitude.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{}{magnitude:.prec$}",
            value.currency.symbol,
            prec = decimals as usize
        )
    }

    pub fn short_date(&self, date: OffsetDateTime) -> String {
        self.format_date(date, SHORT_DATE)
    }

    pub fn only_time(&self, date: OffsetDateTime) -> String {
        self.format_date(date, ONLY_TIME)
    }

    pub fn full_date(&self, date: OffsetDateTime) -> String {
        self.format_date(date, FULL_DATE)
    }

    pub fn date_with_year(&self, date: OffsetDateTime) -> String {
        self.format_date(date, DATE_WITH_YEAR)
    }

    pub fn status(&self, status: &TransactionStatus) -> String {
        match status {
            TransactionStatus::Pending => "Pending".to_string(),
            TransactionStatus::Processing { progress } => {
                format!("Processing {}%", (progress * 100.0).floor() as u32)
            }
            TransactionStatus::Completed => "Completed".to_string(),
            TransactionStatus::Failed => "Failed".to_string(),
        }
    }

    fn format_date(&self, date: OffsetDateTime, description: &[BorrowedFormatItem<'_>]) -> String {
        date.to_offset(self.offset)
            .format(description)
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "date formatting failed");
                String::new()
            })
    }
}

fn sign(value: Decimal, magnitude: Decimal) -> &'static str {
    if magnitude.is_zero() {
        ""
    } else if value.is_sign_negative() {
        "-"
    } else {
        "+"
    }
}

// ==============================================================================
// Transaction Row
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// The strings and flags one transaction row displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    pub fiat_text: Option<String>,
    pub coin_text: String,
    pub direction: Direction,
    pub sent_to_self: bool,
    pub date_text: Option<String>,
    pub time_text: Option<String>,
    pub status_text: String,
    pub locked: bool,
    pub show_bottom_shade: bool,
}

impl TransactionRow {
    pub fn bind(
        item: &TransactionViewItem,
        show_bottom_shade: bool,
        formatter: &DisplayFormatter,
    ) -> Self {
        let incoming = item.transaction_type == TransactionType::Incoming;

        Self {
            fiat_text: item
                .currency_value
                .as_ref()
                .map(|value| formatter.currency_for_transaction(value, incoming)),
            coin_text: formatter.coin_value(&item.coin_value),
            direction: if incoming {
                Direction::Incoming
            } else {
                Direction::Outgoing
            },
            sent_to_self: item.transaction_type == TransactionType::SentToSelf,
            date_text: item.date.map(|date| formatter.short_date(date)),
            time_text: item.date.map(|date| formatter.only_time(date)),
            status_text: formatter.status(&item.status),
            locked: item.lock_info.is_some(),
            show_bottom_shade,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::macros::{datetime, offset};

    use super::*;
    use crate::fee::StaticFeeCoinProvider;
    use crate::test_util::*;
    use crate::types::{BlockHeight, LockInfo, Threshold};
    use crate::view_item::ViewItemFactory;

    #[test]
    fn coin_value_trims_and_signs() {
        let f = DisplayFormatter::default();
        let btc = bitcoin_coin();
        let value = |v| CoinValue {
            coin: btc.clone(),
            value: v,
        };
        assert_eq!(f.coin_value(&value(Decimal::new(150_000_000, 8))), "+1.5 BTC");
        assert_eq!(f.coin_value(&value(Decimal::new(-25, 2))), "-0.25 BTC");
        assert_eq!(f.coin_value(&value(Decimal::ZERO)), "0 BTC");
    }

    #[test]
    fn coin_value_caps_fraction_digits() {
        let f = DisplayFormatter::default();
        let eth = CoinValue {
            coin: ethereum_coin(),
            value: Decimal::new(123_456_789_012, 12),
        };
        assert_eq!(f.coin_value(&eth), "+0.12345679 ETH");

        let f = f.with_max_coin_fraction_digits(4);
        assert_eq!(f.coin_value(&eth), "+0.1235 ETH");
    }

    #[test]
    fn currency_for_transaction_signs_by_direction() {
        let f = DisplayFormatter::default();
        let value = usd_rate(Decimal::new(-125, 1));
        assert_eq!(f.currency_for_transaction(&value, false), "-$12.50");
        assert_eq!(f.currency_for_transaction(&value, true), "+$12.50");
        assert_eq!(f.currency(&usd_rate(Decimal::new(900_000, 2))), "$9000.00");
    }

    #[test]
    fn dates_follow_offset() {
        let date = datetime!(2020-09-13 12:26:40 UTC);
        let utc = DisplayFormatter::default();
        assert_eq!(utc.short_date(date), "Sep 13");
        assert_eq!(utc.only_time(date), "12:26");
        assert_eq!(utc.full_date(date), "Sep 13, 12:26");
        assert_eq!(utc.date_with_year(date), "Sep 13, 2020");

        let tokyo = DisplayFormatter::new(offset!(+9));
        assert_eq!(tokyo.only_time(date), "21:26");
    }

    #[test]
    fn status_text() {
        let f = DisplayFormatter::default();
        assert_eq!(f.status(&TransactionStatus::Pending), "Pending");
        assert_eq!(
            f.status(&TransactionStatus::Processing { progress: 1.0 / 3.0 }),
            "Processing 33%"
        );
        assert_eq!(f.status(&TransactionStatus::Completed), "Completed");
        assert_eq!(f.status(&TransactionStatus::Failed), "Failed");
    }

    #[test]
    fn row_binds_view_item() {
        let factory = ViewItemFactory::new(Arc::new(StaticFeeCoinProvider::new()));
        let btc = wallet(bitcoin_coin());
        let mut rec = record("aa");
        rec.lock_info = Some(LockInfo {
            locked_until: 1_700_000_000,
            origin_address: None,
        });
        let rate = usd_rate(Decimal::new(10_000, 0));
        let item = factory.item(
            &btc,
            &tx_item(&btc, rec),
            Some(BlockHeight(105)),
            Threshold::new(6).unwrap(),
            Some(&rate),
        );

        let row = TransactionRow::bind(&item, true, &DisplayFormatter::default());
        assert_eq!(row.fiat_text.as_deref(), Some("+$15000.00"));
        assert_eq!(row.coin_text, "+1.5 BTC");
        assert_eq!(row.direction, Direction::Incoming);
        assert!(!row.sent_to_self);
        assert_eq!(row.date_text.as_deref(), Some("Sep 13"));
        assert_eq!(row.time_text.as_deref(), Some("12:26"));
        assert_eq!(row.status_text, "Completed");
        assert!(row.locked);
        assert!(row.show_bottom_shade);
    }

    #[test]
    fn unconfirmed_row_has_no_date() {
        let factory = ViewItemFactory::new(Arc::new(StaticFeeCoinProvider::new()));
        let eth = wallet(ethereum_coin());
        let mut rec = record("bb");
        rec.timestamp = 0;
        rec.block_height = None;
        rec.transaction_type = TransactionType::SentToSelf;
        let item = factory.item(&eth, &tx_item(&eth, rec), None, Threshold::new(12).unwrap(), None);

        let row = TransactionRow::bind(&item, false, &DisplayFormatter::default());
        assert!(row.fiat_text.is_none());
        assert!(row.date_text.is_none());
        assert!(row.time_text.is_none());
        assert_eq!(row.direction, Direction::Outgoing);
        assert!(row.sent_to_self);
        assert_eq!(row.status_text, "Pending");
    }
}
