//! Rate chart and market info formatting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::format::DisplayFormatter;
use crate::types::{CoinValue, CurrencyValue};

/// Suffixes for thousands, millions, billions and trillions. Index is the
/// power of one thousand.
const MAGNITUDE_SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Daily,
    Weekly,
    Monthly,
    Monthly6,
    Monthly12,
}

/// Shorten a large value to a mantissa and magnitude suffix, e.g.
/// `1_500_000` becomes `(1.5, "M")`.
///
/// The fractional part is dropped first. Negative values, values below one
/// thousand, and values beyond the trillions come back unshortened with an
/// empty suffix.
#[must_use]
pub fn shorten_value(value: Decimal) -> (Decimal, &'static str) {
    let whole = value.trunc().normalize();
    if whole.is_zero() || whole.is_sign_negative() {
        return (whole, "");
    }

    let digits = whole.to_string().len() as u32;
    let base = (digits - 1) / 3;
    if base == 0 || base as usize >= MAGNITUDE_SUFFIXES.len() {
        return (whole, "");
    }

    let divisor = Decimal::from(10u64.pow(base * 3));
    ((whole / divisor).normalize(), MAGNITUDE_SUFFIXES[base as usize])
}

/// Label for a touched chart point. Short ranges show the time of day,
/// longer ones the year.
pub fn point_date_label(
    timestamp: i64,
    chart_type: ChartType,
    formatter: &DisplayFormatter,
) -> Option<String> {
    let date = OffsetDateTime::from_unix_timestamp(timestamp).ok()?;
    Some(match chart_type {
        ChartType::Daily | ChartType::Weekly => formatter.full_date(date),
        ChartType::Monthly | ChartType::Monthly6 | ChartType::Monthly12 => {
            formatter.date_with_year(date)
        }
    })
}

// ==============================================================================
// Market Info
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInfo {
    pub timestamp: i64,
    pub rate: CurrencyValue,
    pub market_cap: CurrencyValue,
    pub volume: CurrencyValue,
    pub supply: CoinValue,
    #[serde(default)]
    pub max_supply: Option<CoinValue>,
}

/// Display strings for the market info block of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketInfoView {
    pub updated_at: Option<String>,
    pub rate: String,
    pub market_cap: String,
    pub volume: String,
    pub supply: String,
    pub max_supply: String,
}

impl MarketInfoView {
    pub fn new(info: &MarketInfo, formatter: &DisplayFormatter) -> Self {
        Self {
            updated_at: OffsetDateTime::from_unix_timestamp(info.timestamp)
                .ok()
                .map(|date| formatter.full_date(date)),
            rate: formatter.currency(&info.rate),
            market_cap: shortened_currency(&info.market_cap, formatter),
            volume: shortened_currency(&info.volume, formatter),
            supply: plain_coin_value(&info.supply),
            max_supply: info
                .max_supply
                .as_ref()
                .map(plain_coin_value)
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

fn shortened_currency(value: &CurrencyValue, formatter: &DisplayFormatter) -> String {
    let (mantissa, suffix) = shorten_value(value.value);
    let short = CurrencyValue {
        currency: value.currency.clone(),
        value: mantissa,
    };
    format!("{}{suffix}", formatter.currency(&short))
}

fn plain_coin_value(value: &CoinValue) -> String {
    format!("{} {}", value.value.trunc().normalize(), value.coin.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{bitcoin_coin, usd_rate};

    #[test]
    fn shorten_millions() {
        assert_eq!(
            shorten_value(Decimal::from(1_500_000)),
            (Decimal::new(15, 1), "M")
        );
    }

    #[test]
    fn shorten_each_magnitude() {
        assert_eq!(shorten_value(Decimal::from(2_000)).1, "K");
        assert_eq!(shorten_value(Decimal::from(999_999)).1, "K");
        assert_eq!(shorten_value(Decimal::from(45_000_000_000u64)).1, "B");
        assert_eq!(
            shorten_value(Decimal::from(3_200_000_000_000u64)),
            (Decimal::new(32, 1), "T")
        );
    }

    #[test]
    fn small_and_huge_values_are_not_shortened() {
        assert_eq!(shorten_value(Decimal::new(9995, 1)), (Decimal::from(999), ""));
        assert_eq!(shorten_value(Decimal::ZERO), (Decimal::ZERO, ""));
        let huge = Decimal::from(5_000_000_000_000_000u64);
        assert_eq!(shorten_value(huge), (huge, ""));
    }

    #[test]
    fn negative_values_keep_their_sign() {
        assert_eq!(
            shorten_value(Decimal::from(-1_500_000)),
            (Decimal::from(-1_500_000), "")
        );
        assert_eq!(shorten_value(Decimal::new(-25, 1)), (Decimal::from(-2), ""));
    }

    #[test]
    fn point_labels_depend_on_range() {
        let f = DisplayFormatter::default();
        assert_eq!(
            point_date_label(1_600_000_000, ChartType::Daily, &f).as_deref(),
            Some("Sep 13, 12:26")
        );
        assert_eq!(
            point_date_label(1_600_000_000, ChartType::Monthly12, &f).as_deref(),
            Some("Sep 13, 2020")
        );
    }

    #[test]
    fn market_info_view() {
        let info = MarketInfo {
            timestamp: 1_600_000_000,
            rate: usd_rate(Decimal::new(1_043_512, 2)),
            market_cap: usd_rate(Decimal::from(192_700_000_000u64)),
            volume: usd_rate(Decimal::from(25_400_000)),
            supply: CoinValue {
                coin: bitcoin_coin(),
                value: Decimal::from(18_490_000),
            },
            max_supply: None,
        };
        let view = MarketInfoView::new(&info, &DisplayFormatter::default());
        assert_eq!(view.rate, "$10435.12");
        assert_eq!(view.market_cap, "$192.70B");
        assert_eq!(view.volume, "$25.40M");
        assert_eq!(view.supply, "18490000 BTC");
        assert_eq!(view.max_supply, "N/A");
        assert_eq!(view.updated_at.as_deref(), Some("Sep 13, 12:26"));
    }
}
