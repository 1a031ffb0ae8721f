use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::FeedError;
use crate::resolver::normalize_query;
use crate::types::{CoinListing, CoinRecord, PricePoint};

/// Источник списка тикеров ("fetch ticker list").
///
/// Реальная реализация ходит в HTTP, тестовые дубли отдают фиксированный список.
pub trait TickerFeed: Send + Sync {
    fn fetch_tickers(&self) -> Result<Vec<CoinRecord>, FeedError>;
}

/// Источник данных для графиков: справочник монет + исторические цены.
pub trait ChartFeed: Send + Sync {
    fn coin_list(&self) -> Result<Vec<CoinListing>, FeedError>;

    fn price_history(&self, coin_id: &str, days: u32) -> Result<Vec<PricePoint>, FeedError>;
}

impl<T: TickerFeed + ?Sized> TickerFeed for Box<T> {
    fn fetch_tickers(&self) -> Result<Vec<CoinRecord>, FeedError> {
        (**self).fetch_tickers()
    }
}

impl<T: TickerFeed + ?Sized> TickerFeed for Arc<T> {
    fn fetch_tickers(&self) -> Result<Vec<CoinRecord>, FeedError> {
        (**self).fetch_tickers()
    }
}

impl<T: ChartFeed + ?Sized> ChartFeed for Box<T> {
    fn coin_list(&self) -> Result<Vec<CoinListing>, FeedError> {
        (**self).coin_list()
    }

    fn price_history(&self, coin_id: &str, days: u32) -> Result<Vec<PricePoint>, FeedError> {
        (**self).price_history(coin_id, days)
    }
}

impl<T: ChartFeed + ?Sized> ChartFeed for Arc<T> {
    fn coin_list(&self) -> Result<Vec<CoinListing>, FeedError> {
        (**self).coin_list()
    }

    fn price_history(&self, coin_id: &str, days: u32) -> Result<Vec<PricePoint>, FeedError> {
        (**self).price_history(coin_id, days)
    }
}

#[derive(Deserialize)]
struct TickerBody {
    #[serde(default)]
    data: Vec<CoinRecord>,
}

/// Разбор тела тикер-фида: `{"data": [ {...}, ... ]}`.
/// Отсутствующий `data` означает пустой список.
pub fn parse_ticker_body(body: &str) -> Result<Vec<CoinRecord>, FeedError> {
    let parsed: TickerBody = serde_json::from_str(body)?;
    Ok(parsed.data)
}

/// Разбор справочника монет: `[{"id", "symbol", "name"}, ...]`.
pub fn parse_coin_list(body: &str) -> Result<Vec<CoinListing>, FeedError> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Deserialize)]
struct MarketChartBody {
    #[serde(default)]
    prices: Vec<(f64, f64)>,
}

/// Разбор ценового ряда: `{"prices": [[timestamp_ms, price], ...]}`.
pub fn parse_market_chart(body: &str) -> Result<Vec<PricePoint>, FeedError> {
    let parsed: MarketChartBody = serde_json::from_str(body)?;

    parsed
        .prices
        .into_iter()
        .map(|(ts, price)| {
            if !ts.is_finite() || ts < 0.0 {
                return Err(FeedError::Parse(format!("invalid timestamp: {ts}")));
            }
            let price = Decimal::try_from(price)
                .map_err(|e| FeedError::Parse(format!("invalid price {price}: {e}")))?;
            Ok(PricePoint {
                timestamp_ms: ts as u64,
                price,
            })
        })
        .collect()
}

/// Первая запись справочника, у которой id, символ или имя совпадает с запросом
/// (без учёта регистра).
pub fn find_listing<'a>(listings: &'a [CoinListing], raw_query: &str) -> Option<&'a CoinListing> {
    let query = normalize_query(raw_query);
    if query.is_empty() {
        return None;
    }

    listings.iter().find(|c| {
        c.id.to_lowercase() == query
            || c.symbol.to_lowercase() == query
            || c.name.to_lowercase() == query
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_ticker_body_reads_coinlore_shape() {
        let body = r#"{"data":[
            {"id":"90","symbol":"BTC","name":"Bitcoin","nameid":"bitcoin","rank":1,
             "price_usd":"65000.12","market_cap_usd":"1280000000000.00"},
            {"id":"80","symbol":"ETH","name":"Ethereum","rank":2,"price_usd":"3000.5"}
        ],"info":{"coins_num":2}}"#;

        let coins = parse_ticker_body(body).unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].symbol, "BTC");
        assert_eq!(coins[1].price_usd, Some(dec!(3000.5)));
        assert_eq!(coins[1].market_cap_usd, None);
    }

    #[test]
    fn parse_ticker_body_without_data_is_empty() {
        assert!(parse_ticker_body("{}").unwrap().is_empty());
    }

    #[test]
    fn parse_ticker_body_rejects_non_json() {
        let err = parse_ticker_body("<html>oops</html>").unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn parse_market_chart_maps_points() {
        let body = r#"{"prices":[[1700000000000,65000.5],[1700003600000,65100.25]],"market_caps":[]}"#;

        let points = parse_market_chart(body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp_ms, 1_700_000_000_000);
        assert_eq!(points[1].price, dec!(65100.25));
    }

    #[test]
    fn parse_market_chart_rejects_negative_timestamp() {
        let err = parse_market_chart(r#"{"prices":[[-1,1.0]]}"#).unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn find_listing_matches_id_symbol_or_name() {
        let list = parse_coin_list(
            r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin"},
                {"id":"ethereum","symbol":"eth","name":"Ethereum"},
                {"id":"ethereum-wormhole","symbol":"eth","name":"Ethereum (Wormhole)"}]"#,
        )
        .unwrap();

        assert_eq!(find_listing(&list, "BTC").unwrap().id, "bitcoin");
        assert_eq!(find_listing(&list, " Ethereum ").unwrap().id, "ethereum");
        // первый по порядку среди одинаковых символов
        assert_eq!(find_listing(&list, "eth").unwrap().id, "ethereum");
        assert!(find_listing(&list, "doge").is_none());
        assert!(find_listing(&list, "").is_none());
    }
}
