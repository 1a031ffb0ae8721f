use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use coin_core::feed::{parse_coin_list, parse_market_chart, parse_ticker_body};
use coin_core::{ChartFeed, CoinListing, CoinRecord, FeedError, PricePoint, TickerFeed};
use log::debug;
use reqwest::blocking::Client;

use crate::config::HttpFeedConfig;

fn build_client(cfg: HttpFeedConfig) -> anyhow::Result<Client> {
    Client::builder()
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.request_timeout)
        .user_agent(concat!("coin-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build HTTP client")
}

fn classify(e: reqwest::Error, timeout: Duration) -> FeedError {
    if e.is_timeout() {
        FeedError::Timeout(timeout)
    } else if e.is_decode() {
        FeedError::Parse(e.to_string())
    } else {
        FeedError::Unreachable(e.to_string())
    }
}

/// GET + проверка статуса, тело целиком строкой
fn get_text(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    timeout: Duration,
) -> Result<String, FeedError> {
    let resp = client
        .get(url)
        .query(query)
        .send()
        .map_err(|e| classify(e, timeout))?;

    let status = resp.status();
    debug!("GET {url} -> {status}");
    if !status.is_success() {
        return Err(FeedError::Status(status.as_u16()));
    }

    resp.text().map_err(|e| classify(e, timeout))
}

/// Тикер-фид по HTTP (по умолчанию coinlore)
pub(crate) struct HttpTickerFeed {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpTickerFeed {
    pub(crate) fn new(url: impl Into<String>, cfg: HttpFeedConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(cfg)?,
            url: url.into(),
            timeout: cfg.request_timeout,
        })
    }
}

impl TickerFeed for HttpTickerFeed {
    fn fetch_tickers(&self) -> Result<Vec<CoinRecord>, FeedError> {
        let body = get_text(&self.client, &self.url, &[], self.timeout)?;
        parse_ticker_body(&body)
    }
}

/// Снимок тикер-фида на диске; перечитывается на каждый запрос
pub(crate) struct FileTickerFeed {
    path: PathBuf,
}

impl FileTickerFeed {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TickerFeed for FileTickerFeed {
    fn fetch_tickers(&self) -> Result<Vec<CoinRecord>, FeedError> {
        let body = std::fs::read_to_string(&self.path)
            .map_err(|e| FeedError::Unreachable(format!("{}: {e}", self.path.display())))?;
        parse_ticker_body(&body)
    }
}

/// Справочник монет и исторические цены (API в стиле coingecko)
pub(crate) struct HttpChartFeed {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpChartFeed {
    pub(crate) fn new(base_url: impl Into<String>, cfg: HttpFeedConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(cfg)?,
            base_url: base_url.into(),
            timeout: cfg.request_timeout,
        })
    }
}

impl ChartFeed for HttpChartFeed {
    fn coin_list(&self) -> Result<Vec<CoinListing>, FeedError> {
        let url = format!("{}/coins/list", self.base_url);
        let body = get_text(&self.client, &url, &[], self.timeout)?;
        parse_coin_list(&body)
    }

    fn price_history(&self, coin_id: &str, days: u32) -> Result<Vec<PricePoint>, FeedError> {
        let url = format!("{}/coins/{coin_id}/market_chart", self.base_url);
        let query = [("vs_currency", "usd".to_string()), ("days", days.to_string())];
        let body = get_text(&self.client, &url, &query, self.timeout)?;
        parse_market_chart(&body)
    }
}
