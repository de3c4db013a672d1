mod common;

use common::{entry, table};
use rust_decimal_macros::dec;

use woncalc::converter::{
    Converter, Direction, format_coin_amount, format_krw_amount, parse_amount,
};
use woncalc::models::{AssetClass, PriceSource, PriceTable};

fn usdt_table() -> PriceTable {
    table(vec![
        entry("USDT", dec!(1350), PriceSource::Upbit, AssetClass::Stable),
        entry("BTC", dec!(95000000), PriceSource::Upbit, AssetClass::Normal),
    ])
}

#[test]
fn hundred_thousand_krw_at_1350_is_74_074074_coins() {
    let table = usdt_table();
    let mut converter = Converter::new(&table);

    converter.set_krw_input("100,000", &table);

    assert_eq!(format_coin_amount(converter.state().coin_amount), "74.074074");
}

#[test]
fn two_usdt_at_1350_is_2700_krw() {
    let table = usdt_table();
    let mut converter = Converter::new(&table);

    converter.set_coin_input("2", &table);

    assert_eq!(converter.state().krw_amount, dec!(2700));
    assert_eq!(format_krw_amount(converter.state().krw_amount), "2,700");
}

#[test]
fn derived_side_is_zero_for_untracked_symbol() {
    let table = usdt_table();
    let mut converter = Converter::new(&table);
    converter.set_symbol("XRP", &table);

    converter.set_krw_input("100,000", &table);
    assert_eq!(converter.state().coin_amount, dec!(0));

    converter.set_coin_input("3", &table);
    assert_eq!(converter.state().krw_amount, dec!(0));
}

#[test]
fn derived_side_is_zero_for_zero_price() {
    let table = table(vec![entry(
        "USDT",
        dec!(0),
        PriceSource::Upbit,
        AssetClass::Stable,
    )]);
    let mut converter = Converter::new(&table);

    converter.set_krw_input("100,000", &table);

    assert_eq!(converter.state().coin_amount, dec!(0));
}

#[test]
fn round_trip_from_derived_coin_amount() {
    let table = usdt_table();
    let mut converter = Converter::new(&table);

    converter.set_krw_amount(dec!(100000), &table);
    let coins = converter.state().coin_amount;
    converter.set_coin_amount(coins, &table);

    let diff = (converter.state().krw_amount - dec!(100000)).abs();
    assert!(diff < dec!(0.000001), "diff was {diff}");
}

#[test]
fn empty_table_converts_everything_to_zero() {
    let table = PriceTable::new();
    let mut converter = Converter::new(&table);

    converter.set_krw_input("100,000", &table);

    assert_eq!(converter.state().coin_amount, dec!(0));
}

#[test]
fn editing_krw_then_updating_prices_keeps_krw_authoritative() {
    let table = usdt_table();
    let mut converter = Converter::new(&table);
    converter.set_krw_input("135,000", &table);
    assert_eq!(converter.state().coin_amount, dec!(100));

    // A refresh cycle delivers a new table; direction must not flip.
    let updated = common::table(vec![entry(
        "USDT",
        dec!(1500),
        PriceSource::Upbit,
        AssetClass::Stable,
    )]);
    converter.apply_table(&updated);

    assert_eq!(converter.state().direction, Direction::KrwToCoin);
    assert_eq!(converter.state().krw_amount, dec!(135000));
    assert_eq!(converter.state().coin_amount, dec!(90));
}

#[test]
fn garbage_input_falls_back_to_zero() {
    let table = usdt_table();
    let mut converter = Converter::new(&table);

    converter.set_krw_input("1.2.3", &table);

    assert_eq!(converter.state().krw_amount, dec!(0));
    assert_eq!(converter.state().coin_amount, dec!(0));
}

#[test]
fn parse_amount_handles_separators_and_whitespace() {
    assert_eq!(parse_amount("95,123,456"), dec!(95123456));
    assert_eq!(parse_amount("  0.5"), dec!(0.5));
    assert_eq!(parse_amount("-"), dec!(0));
}

#[test]
fn btc_conversion_formats_with_many_fraction_digits() {
    let table = usdt_table();
    let mut converter = Converter::new(&table);
    converter.set_symbol("BTC", &table);

    converter.set_krw_input("100,000", &table);

    // 100000 / 95000000, truncated to six fractional digits.
    assert_eq!(format_coin_amount(converter.state().coin_amount), "0.001052");
}
