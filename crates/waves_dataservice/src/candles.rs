use std::fmt;
use std::str::FromStr;

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataServiceError;
use crate::method::Method;
use crate::models::{ListResponse, Typed};
use crate::request::{DataRequest, path_segment};

/// Most candles the service returns for one request, whatever the window.
pub const MAX_CANDLES: usize = 1440;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

#[derive(Debug, Clone, Builder)]
pub struct CandlesParams {
    #[builder(into)]
    pub amount_asset: Option<String>,
    #[builder(into)]
    pub price_asset: Option<String>,
    #[builder(into)]
    pub interval: String,
    /// Epoch milliseconds.
    pub time_start: i64,
    /// Epoch milliseconds.
    pub time_end: i64,
}

impl CandlesParams {
    /// Splits the requested window into consecutive requests of at most
    /// [`MAX_CANDLES`] candles each. Adjacent windows share their boundary.
    pub fn windows(&self) -> Vec<CandlesParams> {
        let Ok(interval) = self.interval.parse::<CandleInterval>() else {
            return vec![self.clone()];
        };
        if self.time_end <= self.time_start {
            return vec![self.clone()];
        }

        let span = interval.duration_ms() * (MAX_CANDLES as i64 - 1);
        let mut windows = Vec::new();
        let mut start = self.time_start;
        loop {
            let end = start.saturating_add(span).min(self.time_end);
            windows.push(CandlesParams {
                time_start: start,
                time_end: end,
                ..self.clone()
            });
            if end >= self.time_end {
                break;
            }
            start = end;
        }
        windows
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandleInterval {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "3h")]
    Hour3,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "1w")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
}

impl CandleInterval {
    pub const ALL: [CandleInterval; 13] = [
        Self::Minute1,
        Self::Minute5,
        Self::Minute15,
        Self::Minute30,
        Self::Hour1,
        Self::Hour2,
        Self::Hour3,
        Self::Hour4,
        Self::Hour6,
        Self::Hour12,
        Self::Day1,
        Self::Week1,
        Self::Month1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "1m",
            Self::Minute5 => "5m",
            Self::Minute15 => "15m",
            Self::Minute30 => "30m",
            Self::Hour1 => "1h",
            Self::Hour2 => "2h",
            Self::Hour3 => "3h",
            Self::Hour4 => "4h",
            Self::Hour6 => "6h",
            Self::Hour12 => "12h",
            Self::Day1 => "1d",
            Self::Week1 => "1w",
            Self::Month1 => "1M",
        }
    }

    /// Length in milliseconds. A month counts as 28 days.
    pub fn duration_ms(&self) -> i64 {
        match self {
            Self::Minute1 => MINUTE_MS,
            Self::Minute5 => 5 * MINUTE_MS,
            Self::Minute15 => 15 * MINUTE_MS,
            Self::Minute30 => 30 * MINUTE_MS,
            Self::Hour1 => HOUR_MS,
            Self::Hour2 => 2 * HOUR_MS,
            Self::Hour3 => 3 * HOUR_MS,
            Self::Hour4 => 4 * HOUR_MS,
            Self::Hour6 => 6 * HOUR_MS,
            Self::Hour12 => 12 * HOUR_MS,
            Self::Day1 => DAY_MS,
            Self::Week1 => 7 * DAY_MS,
            Self::Month1 => 28 * DAY_MS,
        }
    }
}

impl fmt::Display for CandleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandleInterval {
    type Err = DataServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| DataServiceError::Config(format!("unknown candle interval `{s}`")))
    }
}

impl From<CandleInterval> for String {
    fn from(interval: CandleInterval) -> Self {
        interval.as_str().to_string()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Candle {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(rename = "quoteVolume", default)]
    pub quote_volume: Option<f64>,
    #[serde(rename = "weightedAveragePrice", default)]
    pub weighted_average_price: Option<f64>,
    #[serde(rename = "maxHeight", default)]
    pub max_height: Option<u64>,
    #[serde(rename = "txsCount", default)]
    pub txs_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
}

/// At most [`MAX_CANDLES`] entries, so the requested window may be cut short.
pub type CandlesResponse = ListResponse<Typed<Candle>>;

/// `GET candles/{amountAsset}/{priceAsset}`
pub struct Candles;

impl Method for Candles {
    type Params = CandlesParams;
    type Response = CandlesResponse;

    fn request(params: &CandlesParams) -> DataRequest {
        DataRequest::get(format!(
            "candles/{}/{}",
            path_segment(params.amount_asset.as_deref()),
            path_segment(params.price_asset.as_deref())
        ))
        .param("interval", &params.interval)
        .param("timeStart", params.time_start)
        .param("timeEnd", params.time_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(interval: &str, time_start: i64, time_end: i64) -> CandlesParams {
        CandlesParams::builder()
            .amount_asset("A")
            .price_asset("B")
            .interval(interval)
            .time_start(time_start)
            .time_end(time_end)
            .build()
    }

    #[test]
    fn candles_request_url() {
        let request = Candles::request(&params("1h", 1000, 2000));
        assert_eq!(
            request.relative_url(),
            "candles/A/B?interval=1h&timeStart=1000&timeEnd=2000"
        );
    }

    #[test]
    fn interval_round_trips_through_str() {
        for interval in CandleInterval::ALL {
            assert_eq!(interval.as_str().parse::<CandleInterval>().unwrap(), interval);
        }
        assert!("1y".parse::<CandleInterval>().is_err());
        assert_ne!(
            "1m".parse::<CandleInterval>().unwrap(),
            "1M".parse::<CandleInterval>().unwrap()
        );
    }

    #[test]
    fn short_window_is_not_split() {
        let windows = params("1m", 0, 10 * MINUTE_MS).windows();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].time_start, 0);
        assert_eq!(windows[0].time_end, 10 * MINUTE_MS);
    }

    #[test]
    fn long_window_is_split_within_cap() {
        let end = 3 * DAY_MS;
        let windows = params("1m", 0, end).windows();

        assert_eq!(windows.len(), 4);
        assert_eq!(windows.first().unwrap().time_start, 0);
        assert_eq!(windows.last().unwrap().time_end, end);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].time_end, pair[1].time_start);
        }
        for window in &windows {
            let candles = (window.time_end - window.time_start) / MINUTE_MS + 1;
            assert!(candles as usize <= MAX_CANDLES);
            assert_eq!(window.amount_asset.as_deref(), Some("A"));
        }
    }

    #[test]
    fn unknown_interval_or_empty_window_passes_through() {
        assert_eq!(params("7x", 0, 10 * DAY_MS).windows().len(), 1);
        assert_eq!(params("1h", 5000, 1000).windows().len(), 1);
    }

    #[test]
    fn decode_empty_candle() {
        let response: CandlesResponse = serde_json::from_str(
            r#"{"__type":"list","data":[{"__type":"candle","data":{
                "time":"2019-01-01T00:00:00.000Z","open":null,"close":null,"high":null,"low":null,
                "volume":0,"quoteVolume":0,"weightedAveragePrice":0,"maxHeight":null,"txsCount":0
            }}]}"#,
        )
        .unwrap();

        let candle = &response.data[0].data;
        assert_eq!(candle.open, None);
        assert_eq!(candle.txs_count, 0);
        assert_eq!(candle.time.timestamp(), 1_546_300_800);
    }
}
