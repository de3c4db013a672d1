//! Wire model for the gold price feed (FSC general-product-info shape).
//!
//! The upstream wraps its payload in `response.body.items.item[]` and
//! reports numbers as strings.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GoldResponse {
    pub response: GoldResponseInner,
}

#[derive(Debug, Deserialize)]
pub struct GoldResponseInner {
    #[serde(default)]
    pub body: Option<GoldBody>,
}

#[derive(Debug, Deserialize)]
pub struct GoldBody {
    /// Absent or empty when the query matched nothing (e.g. market holiday).
    #[serde(default)]
    pub items: Option<GoldItems>,
}

#[derive(Debug, Deserialize)]
pub struct GoldItems {
    #[serde(default)]
    pub item: Vec<GoldItem>,
}

/// One listed product. Commodities other than gold appear here too;
/// the feed adapter scans for the gold row by name.
#[derive(Debug, Deserialize)]
pub struct GoldItem {
    /// Product name, e.g. `"금 99.99_1Kg"`.
    #[serde(default, rename = "itmsNm")]
    pub item_name: Option<String>,
    /// Closing price as a decimal string.
    #[serde(default)]
    pub clpr: Option<String>,
}
