//! Types for CoinEx REST API requests and responses

use crate::error::{RestError, RestResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// API Response Wrapper
// ============================================================================

/// Standard CoinEx response envelope
///
/// `code == 0` is the only success value. On any other code `data` is not
/// to be trusted.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Application status code
    #[serde(default)]
    pub code: Option<i64>,
    /// Error message (usually "OK" on success)
    #[serde(default)]
    pub message: Option<String>,
    /// Endpoint payload; `Some(Value::Null)` when the field is present but null
    #[serde(default, deserialize_with = "present")]
    pub data: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl ApiResponse {
    /// Parse an envelope from a response body
    ///
    /// The body must be a JSON object; arrays and scalars are rejected even
    /// though serde would map an array onto the fields by position.
    pub fn from_body(body: &str) -> RestResult<Self> {
        let value: Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(RestError::Decode("Response is not a JSON object".to_string()));
        }
        Ok(Self::deserialize(value)?)
    }

    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Unwrap the payload, or the error the envelope describes
    ///
    /// A missing `code` is a decode error rather than an implicit success.
    pub fn into_result(self) -> RestResult<Value> {
        match self.code {
            Some(0) => self
                .data
                .ok_or_else(|| RestError::Decode("Missing data in response".to_string())),
            Some(code) => Err(RestError::Api {
                code,
                message: self
                    .message
                    .unwrap_or_else(|| "No error message".to_string()),
            }),
            None => Err(RestError::Decode("Missing code in response".to_string())),
        }
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Candlestick period accepted by the kline endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KlinePeriod {
    #[serde(rename = "1min")]
    #[default]
    OneMinute,
    #[serde(rename = "3min")]
    ThreeMinutes,
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "2hour")]
    TwoHours,
    #[serde(rename = "4hour")]
    FourHours,
    #[serde(rename = "6hour")]
    SixHours,
    #[serde(rename = "12hour")]
    TwelveHours,
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "3day")]
    ThreeDays,
    #[serde(rename = "1week")]
    OneWeek,
}

impl KlinePeriod {
    /// Get the API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1min",
            Self::ThreeMinutes => "3min",
            Self::FiveMinutes => "5min",
            Self::FifteenMinutes => "15min",
            Self::ThirtyMinutes => "30min",
            Self::OneHour => "1hour",
            Self::TwoHours => "2hour",
            Self::FourHours => "4hour",
            Self::SixHours => "6hour",
            Self::TwelveHours => "12hour",
            Self::OneDay => "1day",
            Self::ThreeDays => "3day",
            Self::OneWeek => "1week",
        }
    }
}

impl std::fmt::Display for KlinePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Account the order trades against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketType {
    /// Spot account
    #[default]
    Spot,
    /// Margin account
    Margin,
}

impl std::fmt::Display for MarketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spot => write!(f, "SPOT"),
            Self::Margin => write!(f, "MARGIN"),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
    /// Post-only limit order
    MakerOnly,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
}

impl OrderType {
    /// Whether orders of this type must carry a price
    pub fn requires_price(&self) -> bool {
        !matches!(self, Self::Market)
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Limit => "limit",
            Self::Market => "market",
            Self::MakerOnly => "maker_only",
            Self::Ioc => "ioc",
            Self::Fok => "fok",
        };
        write!(f, "{}", s)
    }
}

/// Request to place an order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Market name, e.g. "BTCUSDT"
    pub market: String,
    /// Account type
    pub market_type: MarketType,
    /// Order side
    pub side: OrderSide,
    /// Order type
    pub order_type: OrderType,
    /// Order amount
    pub amount: Decimal,
    /// Price (required for every type except market)
    pub price: Option<Decimal>,
    /// Caller-assigned id
    pub client_id: Option<String>,
    /// Hide the order from the public book
    pub is_hide: bool,
}

impl OrderRequest {
    /// Create an order with no price set
    pub fn new(
        market: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        amount: Decimal,
    ) -> Self {
        Self {
            market: market.into(),
            market_type: MarketType::Spot,
            side,
            order_type,
            amount,
            price: None,
            client_id: None,
            is_hide: false,
        }
    }

    /// Create a market order
    pub fn market(market: impl Into<String>, side: OrderSide, amount: Decimal) -> Self {
        Self::new(market, side, OrderType::Market, amount)
    }

    /// Create a limit order
    pub fn limit(
        market: impl Into<String>,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self::new(market, side, OrderType::Limit, amount).with_price(price)
    }

    /// Set the price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the account type
    pub fn with_market_type(mut self, market_type: MarketType) -> Self {
        self.market_type = market_type;
        self
    }

    /// Set a client id
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Hide the order from the public book
    pub fn hidden(mut self) -> Self {
        self.is_hide = true;
        self
    }

    /// Check conditional required fields
    pub fn validate(&self) -> RestResult<()> {
        if self.order_type.requires_price() && self.price.is_none() {
            return Err(RestError::Validation(format!(
                "{} orders require a price",
                self.order_type
            )));
        }
        Ok(())
    }

    /// Validate and build the wire body
    pub fn to_body(&self) -> RestResult<PlaceOrderBody<'_>> {
        self.validate()?;

        Ok(PlaceOrderBody {
            market: &self.market,
            market_type: self.market_type,
            side: self.side,
            order_type: self.order_type,
            amount: self.amount,
            price: if self.order_type.requires_price() {
                self.price
            } else {
                None
            },
            client_id: self.client_id.as_deref(),
            is_hide: self.is_hide,
        })
    }
}

/// Wire body for `POST /spot/order`
///
/// Amounts and prices travel as strings.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderBody<'a> {
    market: &'a str,
    market_type: MarketType,
    side: OrderSide,
    #[serde(rename = "type")]
    order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<&'a str>,
    is_hide: bool,
}

/// Wire body for `POST /spot/cancel-order`
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderBody<'a> {
    pub market: &'a str,
    pub order_id: u64,
}
