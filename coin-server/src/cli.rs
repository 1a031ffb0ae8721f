use clap::{ArgGroup, Parser};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config;

/// Coin Server - ищет монету по имени/символу в публичном тикер-фиде,
/// отвечает по TCP одной строкой на команду LOOKUP/HISTORY/CHART.
#[derive(Parser, Debug, Clone)]
#[command(name = "coin-server", version, about)]
#[command(
    group(
        ArgGroup::new("ticker_source")
            .required(false)
            .multiple(false)
            .args(["feed_url", "feed_file"])
    )
)]
pub(crate) struct Args {
    /// TCP bind address, например 0.0.0.0:5555
    #[arg(long, default_value = config::TCP_BIND_ADDR)]
    pub(crate) tcp_bind: SocketAddr,

    /// URL тикер-фида (ответ вида {"data": [...]})
    #[arg(long, conflicts_with = "feed_file")]
    pub(crate) feed_url: Option<String>,

    /// JSON-снимок тикер-фида на диске, читается заново на каждый запрос
    #[arg(long, conflicts_with = "feed_url")]
    pub(crate) feed_file: Option<PathBuf>,

    /// Базовый URL API графиков (справочник монет + market_chart)
    #[arg(long, default_value = config::CHART_API_URL)]
    pub(crate) chart_api_url: String,

    /// Таймаут установки соединения с внешними API, мс
    #[arg(long, default_value_t = config::CONNECT_TIMEOUT_MS)]
    pub(crate) connect_timeout_ms: u64,

    /// Таймаут запроса к внешним API целиком, мс
    #[arg(long, default_value_t = config::REQUEST_TIMEOUT_MS)]
    pub(crate) request_timeout_ms: u64,

    /// Сколько секунд держать справочник монет для графиков
    #[arg(long, default_value_t = config::COIN_LIST_TTL.as_secs())]
    pub(crate) coin_list_ttl_s: u64,
}
