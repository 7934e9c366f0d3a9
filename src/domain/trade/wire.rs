//! Wire types for the account trade list (`GET /api/v3/myTrades`).

use serde::{Deserialize, Serialize};

/// REST response item for a single account trade.
///
/// Numeric fields arrive as decimal strings. Every field is defaulted so that a
/// record missing a value still deserializes; conversion substitutes zero for
/// absent or unparseable amounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MyTradeResponse {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub qty: Option<String>,
    #[serde(default)]
    pub quote_qty: Option<String>,
    #[serde(default)]
    pub commission: Option<String>,
    #[serde(default)]
    pub commission_asset: Option<String>,
    /// Execution timestamp (milliseconds since epoch)
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub is_buyer: bool,
    #[serde(default)]
    pub is_maker: bool,
}

/// Query parameters for `GET /api/v3/myTrades`, in signing order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyTradesQuery<'a> {
    pub symbol: &'a str,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    pub recv_window: u64,
    pub timestamp: i64,
}

/// Error body returned by the exchange on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ApiErrorResponse {
    /// Human-readable message, falling back to the raw body.
    pub fn message_or(body: &str) -> String {
        match serde_json::from_str::<ApiErrorResponse>(body) {
            Ok(ApiErrorResponse {
                code: Some(code),
                msg: Some(msg),
            }) => format!("{} ({})", msg, code),
            Ok(ApiErrorResponse { msg: Some(msg), .. }) => msg,
            _ => body.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_my_trade_deserialize() {
        let json = r#"{
            "symbol": "BNBBTC",
            "id": 28457,
            "orderId": 100234,
            "orderListId": -1,
            "price": "4.00000100",
            "qty": "12.00000000",
            "quoteQty": "48.000012",
            "commission": "10.10000000",
            "commissionAsset": "BNB",
            "time": 1499865549590,
            "isBuyer": true,
            "isMaker": false,
            "isBestMatch": true
        }"#;
        let trade: MyTradeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(trade.symbol, "BNBBTC");
        assert_eq!(trade.id, 28457);
        assert_eq!(trade.price.as_deref(), Some("4.00000100"));
        assert_eq!(trade.commission_asset.as_deref(), Some("BNB"));
        assert_eq!(trade.time, 1499865549590);
        assert!(trade.is_buyer);
    }

    #[test]
    fn test_my_trade_missing_fields_default() {
        let trade: MyTradeResponse = serde_json::from_str(r#"{"symbol": "BTCUSDT"}"#).unwrap();
        assert!(trade.price.is_none());
        assert!(trade.qty.is_none());
        assert!(trade.commission.is_none());
        assert!(!trade.is_buyer);
    }

    #[test]
    fn test_query_serializes_in_order() {
        let query = MyTradesQuery {
            symbol: "BTCUSDT",
            limit: 1000,
            end_time: Some(1700000000000),
            recv_window: 5000,
            timestamp: 1700000001000,
        };
        let encoded = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(
            encoded,
            "symbol=BTCUSDT&limit=1000&endTime=1700000000000&recvWindow=5000&timestamp=1700000001000"
        );
    }

    #[test]
    fn test_query_omits_missing_end_time() {
        let query = MyTradesQuery {
            symbol: "ETHUSDT",
            limit: 1000,
            end_time: None,
            recv_window: 5000,
            timestamp: 1,
        };
        let encoded = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(encoded, "symbol=ETHUSDT&limit=1000&recvWindow=5000&timestamp=1");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            ApiErrorResponse::message_or(r#"{"code":-1003,"msg":"Too many requests."}"#),
            "Too many requests. (-1003)"
        );
        assert_eq!(ApiErrorResponse::message_or("plain text"), "plain text");
    }
}
