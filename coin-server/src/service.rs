use chrono::Utc;
use coin_core::format::format_summary;
use coin_core::protocol::LookupReply;
use coin_core::resolver::normalize_query;
use coin_core::{
    ChartFeed, ErrorCode, FeedError, Reply, Request, Resolution, Resolver, TickerFeed,
};
use log::{info, warn};

use crate::cache::CoinDirectory;
use crate::config::{ServerConfig, ServiceConfig, TickerSource};
use crate::feed::{FileTickerFeed, HttpChartFeed, HttpTickerFeed};
use crate::session::SessionStore;

/// Обработчик запросов: резолвер + форматтер для LOOKUP, история сессий,
/// справочник монет для CHART.
pub(crate) struct PriceService {
    resolver: Resolver<Box<dyn TickerFeed>>,
    directory: CoinDirectory<Box<dyn ChartFeed>>,
    sessions: SessionStore,
}

impl PriceService {
    pub(crate) fn new(
        tickers: Box<dyn TickerFeed>,
        charts: Box<dyn ChartFeed>,
        cfg: &ServiceConfig,
    ) -> Self {
        Self {
            resolver: Resolver::new(tickers),
            directory: CoinDirectory::new(charts, cfg.coin_list_ttl),
            sessions: SessionStore::new(cfg.history_capacity, cfg.session_idle_ttl),
        }
    }

    pub(crate) fn from_config(cfg: &ServerConfig) -> anyhow::Result<Self> {
        let tickers: Box<dyn TickerFeed> = match &cfg.tickers {
            TickerSource::Http(url) => Box::new(HttpTickerFeed::new(url.clone(), cfg.http)?),
            TickerSource::File(path) => Box::new(FileTickerFeed::new(path.clone())),
        };
        let charts = Box::new(HttpChartFeed::new(cfg.chart_api_url.clone(), cfg.http)?);

        Ok(Self::new(tickers, charts, &cfg.service))
    }

    pub(crate) fn handle(&self, req: Request) -> Reply {
        match req {
            Request::Lookup { session, query } => self.lookup(&session, &query),
            Request::History { session } => Reply::History(self.sessions.history(&session)),
            Request::Chart { days, query } => self.chart(days, &query),
        }
    }

    fn lookup(&self, session: &str, query: &str) -> Reply {
        match self.resolver.resolve(query) {
            Ok(Resolution::Found(coin)) => {
                info!("lookup {query:?} -> {} ({})", coin.name, coin.symbol);
                self.sessions.record(session, query);
                Reply::Lookup(LookupReply {
                    summary: format_summary(&coin),
                    coin,
                    fetched_at: Utc::now(),
                })
            }
            Ok(Resolution::NotFound(q)) => {
                info!("lookup {query:?} -> not found");
                Reply::error(
                    ErrorCode::NotFound,
                    format!("Cryptocurrency '{q}' not found in top 100."),
                )
            }
            Err(e) => feed_failure("lookup", query, &e),
        }
    }

    fn chart(&self, days: u32, query: &str) -> Reply {
        match self.directory.chart(query, days) {
            Ok(Some(chart)) => {
                info!("chart {query:?} -> {} ({} points)", chart.coin_id, chart.points.len());
                Reply::Chart(chart)
            }
            Ok(None) => Reply::error(
                ErrorCode::NotFound,
                format!(
                    "Coin '{}' not found in chart directory.",
                    normalize_query(query)
                ),
            ),
            Err(e) => feed_failure("chart", query, &e),
        }
    }
}

fn feed_failure(op: &str, query: &str, e: &FeedError) -> Reply {
    warn!("{op} {query:?} failed: {e}");
    Reply::error(ErrorCode::from(e), e.to_string())
}
