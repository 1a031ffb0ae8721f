//! # coin-core
//!
//! Базовые типы и протокол для Coin Server / Coin Client.
//!
//! Этот крейт содержит:
//!
//! - [`resolver`] — поиск монеты по свободному тексту (символ → имя → подстрока имени)
//! - [`format`] — текстовая сводка по монете и форматирование денег
//! - [`feed`] — трейты источников данных и разбор ответов внешних API
//! - [`protocol`] — парсинг и форматирование строк запросов/ответов по TCP
//! - [`history`] — ограниченная история поисковых запросов сессии
//! - [`types`] — доменные типы
//! - [`error`] — типы ошибок, которые возвращают компоненты `coin-core`
//!
//! ## Быстрый пример: поиск и сводка
//!
//! ```rust
//! use coin_core::{CoinRecord, FeedError, Resolution, Resolver, TickerFeed};
//! use coin_core::format::format_summary;
//!
//! struct Fixed;
//!
//! impl TickerFeed for Fixed {
//!     fn fetch_tickers(&self) -> Result<Vec<CoinRecord>, FeedError> {
//!         coin_core::feed::parse_ticker_body(
//!             r#"{"data":[{"name":"Bitcoin","symbol":"BTC","price_usd":"65000.1234","rank":1,"market_cap_usd":"1280000000000"}]}"#,
//!         )
//!     }
//! }
//!
//! let resolver = Resolver::new(Fixed);
//! let Resolution::Found(coin) = resolver.resolve(" btc ").unwrap() else {
//!     panic!("expected a match");
//! };
//! let text = format_summary(&coin);
//! assert!(text.starts_with("💰 Bitcoin (BTC)"));
//! assert!(text.contains("• Price: $65,000.12"));
//! ```
//!
//! ## Пример: протокол
//!
//! ```rust
//! use coin_core::protocol::{parse_request, Request};
//!
//! let req = parse_request("LOOKUP s1 bitcoin cash").unwrap();
//! assert_eq!(
//!     req,
//!     Request::Lookup { session: "s1".into(), query: "bitcoin cash".into() }
//! );
//! ```
//!
//! ## Дизайн
//!
//! `coin-core` задуман как “нулевая” зависимость для всех частей системы:
//! сервер, клиент, тесты. Поэтому здесь держим только:
//! чистые типы, парсинг/сериализацию и простую утилитарщину,
//! без runtime/async и без HTTP.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Поиск монеты по запросу пользователя.
pub mod resolver;

/// Текстовая сводка и форматирование сумм.
pub mod format;

/// Источники данных (тикер-фид, графики) и разбор их ответов.
pub mod feed;

/// Текстовый протокол запросов/ответов (например `LOOKUP s1 btc`).
pub mod protocol;

/// История поисковых запросов.
pub mod history;

/// Доменные типы (запись о монете, точка графика).
pub mod types;

/// Ошибки `coin-core`.
pub mod error;

/// Общие константы
mod constants;
pub use constants::{
    COIN_LIST_TTL, DEFAULT_CHART_DAYS, HISTORY_CAPACITY, MAX_CHART_DAYS, MAX_SESSION_ID_LEN,
};

// --- Re-exports (публичный фасад API) ---

pub use crate::error::{FeedError, ProtocolError};
pub use crate::feed::{ChartFeed, TickerFeed};
pub use crate::history::SearchHistory;
pub use crate::protocol::{ErrorCode, Reply, Request};
pub use crate::resolver::Resolver;
pub use crate::types::{CoinListing, CoinRecord, MatchTier, PricePoint, Resolution};
