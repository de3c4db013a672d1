//! Wire model for the exchange ticker feed (Upbit batched ticker shape).

use rust_decimal::Decimal;
use serde::Deserialize;

/// One market's ticker from the batched response array.
///
/// The upstream returns many more fields; only the market identifier and
/// last trade price are consumed.
#[derive(Debug, Deserialize)]
pub struct TickerItem {
    /// Market identifier, e.g. `"KRW-BTC"`.
    pub market: String,
    /// Last trade price in the market's quote currency (KRW).
    pub trade_price: Decimal,
}
