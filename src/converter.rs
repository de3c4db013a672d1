//! Bidirectional KRW/asset conversion engine.
//!
//! [`Converter`] owns a [`ConversionState`] exclusively and recomputes it
//! synchronously on every edit or price-table update. Exactly one side is
//! user-authoritative at a time, tracked by [`Direction`]; the other side is
//! always derived from it. Price updates recompute the derived side but
//! never flip the direction.
//!
//! All arithmetic stays in full [`Decimal`] precision; only the display
//! formatters truncate.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::PriceTable;

/// Symbol selected when the converter starts.
pub const DEFAULT_SYMBOL: &str = "USDT";

/// Initial KRW amount shown before any edit.
const DEFAULT_KRW_AMOUNT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Maximum fractional digits shown for coin-denominated amounts.
const COIN_DISPLAY_DP: u32 = 6;

/// Which amount field the user last edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The KRW field is authoritative; the coin amount is derived.
    KrwToCoin,
    /// The coin field is authoritative; the KRW amount is derived.
    CoinToKrw,
}

/// Current converter state. The field matching `direction`'s source side
/// holds the user's input; the other field is always derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionState {
    pub krw_amount: Decimal,
    pub coin_amount: Decimal,
    pub selected_symbol: String,
    pub direction: Direction,
}

/// Two-way amount calculator over a read-only price table.
pub struct Converter {
    state: ConversionState,
}

impl Converter {
    /// Creates a converter with the default symbol and KRW amount,
    /// derived against the given table.
    #[must_use]
    pub fn new(table: &PriceTable) -> Self {
        let mut converter = Self {
            state: ConversionState {
                krw_amount: DEFAULT_KRW_AMOUNT,
                coin_amount: Decimal::ZERO,
                selected_symbol: DEFAULT_SYMBOL.to_string(),
                direction: Direction::KrwToCoin,
            },
        };
        converter.recompute(table);
        converter
    }

    #[must_use]
    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// Sets the KRW amount, making the KRW side authoritative.
    pub fn set_krw_amount(&mut self, amount: Decimal, table: &PriceTable) {
        self.state.direction = Direction::KrwToCoin;
        self.state.krw_amount = amount;
        self.recompute(table);
    }

    /// Parses user text (thousands separators allowed) into the KRW amount.
    pub fn set_krw_input(&mut self, input: &str, table: &PriceTable) {
        self.set_krw_amount(parse_amount(input), table);
    }

    /// Sets the coin amount, making the coin side authoritative.
    pub fn set_coin_amount(&mut self, amount: Decimal, table: &PriceTable) {
        self.state.direction = Direction::CoinToKrw;
        self.state.coin_amount = amount;
        self.recompute(table);
    }

    /// Parses user text (thousands separators allowed) into the coin amount.
    pub fn set_coin_input(&mut self, input: &str, table: &PriceTable) {
        self.set_coin_amount(parse_amount(input), table);
    }

    /// Switches the selected asset, keeping the current direction so the
    /// side the user was editing stays authoritative.
    pub fn set_symbol(&mut self, symbol: &str, table: &PriceTable) {
        self.state.selected_symbol = symbol.to_string();
        self.recompute(table);
    }

    /// Explicitly flips which side is authoritative and re-derives the other.
    pub fn toggle_direction(&mut self, table: &PriceTable) {
        self.state.direction = match self.state.direction {
            Direction::KrwToCoin => Direction::CoinToKrw,
            Direction::CoinToKrw => Direction::KrwToCoin,
        };
        self.recompute(table);
    }

    /// Re-derives against a fresh price table without flipping direction.
    pub fn apply_table(&mut self, table: &PriceTable) {
        self.recompute(table);
    }

    fn recompute(&mut self, table: &PriceTable) {
        let price = table
            .price(&self.state.selected_symbol)
            .unwrap_or(Decimal::ZERO);

        match self.state.direction {
            Direction::KrwToCoin => {
                // A zero or unknown price derives 0, never a division error.
                self.state.coin_amount = if price > Decimal::ZERO {
                    self.state.krw_amount / price
                } else {
                    Decimal::ZERO
                };
            }
            Direction::CoinToKrw => {
                self.state.krw_amount = self.state.coin_amount * price;
            }
        }
    }
}

/// Parses a user-typed amount, stripping thousands separators.
///
/// Anything that does not parse as a number (including the empty string)
/// becomes zero; parse failures never reach the caller.
#[must_use]
pub fn parse_amount(input: &str) -> Decimal {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Formats a coin-denominated amount: truncated to at most six fractional
/// digits, integer part grouped by thousands.
#[must_use]
pub fn format_coin_amount(amount: Decimal) -> String {
    let truncated = amount
        .round_dp_with_strategy(COIN_DISPLAY_DP, RoundingStrategy::ToZero)
        .normalize();
    group_thousands(&truncated.to_string())
}

/// Formats a KRW-denominated amount: truncated to whole won, grouped by
/// thousands.
#[must_use]
pub fn format_krw_amount(amount: Decimal) -> String {
    let truncated = amount
        .round_dp_with_strategy(0, RoundingStrategy::ToZero)
        .normalize();
    group_thousands(&truncated.to_string())
}

/// Inserts comma separators into the integer part of a plain decimal string.
fn group_thousands(raw: &str) -> String {
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::from(sign);
    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetClass, PriceEntry, PriceSource};
    use rust_decimal_macros::dec;

    fn table_with(symbol: &str, price: Decimal) -> PriceTable {
        let mut table = PriceTable::new();
        table.push(PriceEntry {
            symbol: symbol.to_string(),
            price,
            change_pct: None,
            source: PriceSource::Upbit,
            class: AssetClass::Stable,
        });
        table
    }

    #[test]
    fn krw_to_coin_divides_by_price() {
        let table = table_with("USDT", dec!(1350));
        let mut converter = Converter::new(&table);

        converter.set_krw_amount(dec!(100000), &table);

        assert_eq!(converter.state().direction, Direction::KrwToCoin);
        assert_eq!(converter.state().coin_amount, dec!(100000) / dec!(1350));
        assert_eq!(format_coin_amount(converter.state().coin_amount), "74.074074");
    }

    #[test]
    fn coin_to_krw_multiplies_by_price() {
        let table = table_with("USDT", dec!(1350));
        let mut converter = Converter::new(&table);

        converter.set_coin_amount(dec!(2), &table);

        assert_eq!(converter.state().direction, Direction::CoinToKrw);
        assert_eq!(converter.state().krw_amount, dec!(2700));
    }

    #[test]
    fn zero_price_derives_zero_not_an_error() {
        let table = table_with("USDT", Decimal::ZERO);
        let mut converter = Converter::new(&table);

        converter.set_krw_amount(dec!(100000), &table);
        assert_eq!(converter.state().coin_amount, Decimal::ZERO);

        converter.set_coin_amount(dec!(5), &table);
        assert_eq!(converter.state().krw_amount, Decimal::ZERO);
    }

    #[test]
    fn unknown_symbol_derives_zero() {
        let table = table_with("USDT", dec!(1350));
        let mut converter = Converter::new(&table);

        converter.set_symbol("DOGE", &table);
        converter.set_krw_amount(dec!(100000), &table);

        assert_eq!(converter.state().coin_amount, Decimal::ZERO);
    }

    #[test]
    fn round_trip_reproduces_krw_within_tolerance() {
        let table = table_with("USDT", dec!(1350));
        let mut converter = Converter::new(&table);

        converter.set_krw_amount(dec!(100000), &table);
        let derived_coins = converter.state().coin_amount;
        converter.set_coin_amount(derived_coins, &table);

        let diff = (converter.state().krw_amount - dec!(100000)).abs();
        assert!(diff < dec!(0.000001), "diff was {diff}");
    }

    #[test]
    fn switching_symbol_keeps_authoritative_side() {
        let mut table = table_with("USDT", dec!(1350));
        table.push(PriceEntry {
            symbol: "USDC".to_string(),
            price: dec!(1400),
            change_pct: None,
            source: PriceSource::Upbit,
            class: AssetClass::Stable,
        });
        let mut converter = Converter::new(&table);

        converter.set_coin_amount(dec!(2), &table);
        converter.set_symbol("USDC", &table);

        // Coin side stays authoritative; KRW is re-derived at the new price.
        assert_eq!(converter.state().direction, Direction::CoinToKrw);
        assert_eq!(converter.state().coin_amount, dec!(2));
        assert_eq!(converter.state().krw_amount, dec!(2800));
    }

    #[test]
    fn price_update_recomputes_without_flipping_direction() {
        let table = table_with("USDT", dec!(1350));
        let mut converter = Converter::new(&table);
        converter.set_krw_amount(dec!(135000), &table);
        assert_eq!(converter.state().coin_amount, dec!(100));

        let updated = table_with("USDT", dec!(1500));
        converter.apply_table(&updated);

        assert_eq!(converter.state().direction, Direction::KrwToCoin);
        assert_eq!(converter.state().coin_amount, dec!(90));
    }

    #[test]
    fn toggle_flips_direction_and_rederives() {
        let table = table_with("USDT", dec!(1350));
        let mut converter = Converter::new(&table);
        converter.set_coin_amount(dec!(3), &table);
        assert_eq!(converter.state().krw_amount, dec!(4050));

        converter.toggle_direction(&table);

        // KRW is now authoritative at its current value; coins re-derive.
        assert_eq!(converter.state().direction, Direction::KrwToCoin);
        assert_eq!(converter.state().coin_amount, dec!(3));
    }

    #[test]
    fn defaults_match_initial_view() {
        let table = table_with("USDT", dec!(1350));
        let converter = Converter::new(&table);

        assert_eq!(converter.state().selected_symbol, "USDT");
        assert_eq!(converter.state().krw_amount, dec!(100000));
        assert_eq!(converter.state().direction, Direction::KrwToCoin);
        assert_eq!(converter.state().coin_amount, dec!(100000) / dec!(1350));
    }

    #[test]
    fn parse_amount_strips_separators() {
        assert_eq!(parse_amount("100,000"), dec!(100000));
        assert_eq!(parse_amount(" 1,234.56 "), dec!(1234.56));
    }

    #[test]
    fn parse_amount_rejects_garbage_as_zero() {
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("12x3"), Decimal::ZERO);
    }

    #[test]
    fn coin_formatting_truncates_to_six_digits() {
        assert_eq!(format_coin_amount(dec!(74.0740749999)), "74.074074");
        assert_eq!(format_coin_amount(dec!(0.1234567)), "0.123456");
        assert_eq!(format_coin_amount(dec!(1000000)), "1,000,000");
    }

    #[test]
    fn coin_formatting_drops_trailing_zeros() {
        assert_eq!(format_coin_amount(dec!(2.500000)), "2.5");
        assert_eq!(format_coin_amount(dec!(2.000000)), "2");
    }

    #[test]
    fn krw_formatting_truncates_to_whole_won() {
        assert_eq!(format_krw_amount(dec!(2700.999)), "2,700");
        assert_eq!(format_krw_amount(dec!(95123456)), "95,123,456");
        assert_eq!(format_krw_amount(Decimal::ZERO), "0");
    }

    #[test]
    fn grouping_handles_short_and_negative_values() {
        assert_eq!(format_krw_amount(dec!(999)), "999");
        assert_eq!(format_krw_amount(dec!(-1234567)), "-1,234,567");
    }
}
