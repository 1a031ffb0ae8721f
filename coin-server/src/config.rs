use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cli::Args;

pub(crate) use coin_core::{COIN_LIST_TTL, HISTORY_CAPACITY};

pub(crate) const TCP_BIND_ADDR: &str = "0.0.0.0:5555";

/// Тикер-фид: топ-100 монет с ценой, рангом и капитализацией
pub(crate) const FEED_URL: &str = "https://api.coinlore.net/api/tickers/";

/// Справочник монет и исторические цены для графиков
pub(crate) const CHART_API_URL: &str = "https://api.coingecko.com/api/v3";

pub(crate) const CONNECT_TIMEOUT_MS: u64 = 5_000;
pub(crate) const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Сессия без запросов дольше этого времени забывается
pub(crate) const SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroTimeout { name: &'static str },

    #[error("{name} must be an http:// or https:// URL (got: {value})")]
    BadUrl { name: &'static str, value: String },
}

/// Откуда брать список тикеров
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TickerSource {
    Http(String),
    /// JSON-снимок той же формы, что отдаёт фид (офлайн/демо)
    File(PathBuf),
}

/// Таймауты HTTP-клиента. Оба обязаны быть конечными.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HttpFeedConfig {
    pub(crate) connect_timeout: Duration,
    pub(crate) request_timeout: Duration,
}

impl Default for HttpFeedConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(CONNECT_TIMEOUT_MS),
            request_timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceConfig {
    pub(crate) coin_list_ttl: Duration,
    pub(crate) history_capacity: usize,
    pub(crate) session_idle_ttl: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            coin_list_ttl: COIN_LIST_TTL,
            history_capacity: HISTORY_CAPACITY,
            session_idle_ttl: SESSION_IDLE_TTL,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub(crate) tcp_bind: SocketAddr,
    pub(crate) tickers: TickerSource,
    pub(crate) chart_api_url: String,
    pub(crate) http: HttpFeedConfig,
    pub(crate) service: ServiceConfig,
}

impl ServerConfig {
    pub(crate) fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if args.connect_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout {
                name: "--connect-timeout-ms",
            });
        }
        if args.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout {
                name: "--request-timeout-ms",
            });
        }

        let tickers = match &args.feed_file {
            Some(path) => TickerSource::File(path.clone()),
            None => {
                let url = args.feed_url.clone().unwrap_or_else(|| FEED_URL.to_string());
                TickerSource::Http(check_url("--feed-url", url)?)
            }
        };

        let chart_api_url = check_url("--chart-api-url", args.chart_api_url.clone())?;

        Ok(Self {
            tcp_bind: args.tcp_bind,
            tickers,
            chart_api_url: chart_api_url.trim_end_matches('/').to_string(),
            http: HttpFeedConfig {
                connect_timeout: Duration::from_millis(args.connect_timeout_ms),
                request_timeout: Duration::from_millis(args.request_timeout_ms),
            },
            service: ServiceConfig {
                coin_list_ttl: Duration::from_secs(args.coin_list_ttl_s),
                ..ServiceConfig::default()
            },
        })
    }
}

fn check_url(name: &'static str, value: String) -> Result<String, ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value)
    } else {
        Err(ConfigError::BadUrl { name, value })
    }
}
