use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use coin_core::feed::find_listing;
use coin_core::protocol::ChartReply;
use coin_core::{ChartFeed, CoinListing, FeedError};
use log::{debug, info};

struct CachedList {
    fetched_at: Instant,
    listings: Arc<Vec<CoinListing>>,
}

/// Справочник монет провайдера графиков с TTL.
///
/// Справочник только читается; обновляется целиком, когда протух или пуст.
/// Ошибки загрузки не кэшируются.
pub(crate) struct CoinDirectory<C> {
    feed: C,
    ttl: Duration,
    cached: RwLock<Option<CachedList>>,
}

impl<C: ChartFeed> CoinDirectory<C> {
    pub(crate) fn new(feed: C, ttl: Duration) -> Self {
        Self {
            feed,
            ttl,
            cached: RwLock::new(None),
        }
    }

    pub(crate) fn listings(&self) -> Result<Arc<Vec<CoinListing>>, FeedError> {
        {
            let guard = match self.cached.read() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Some(c) = guard.as_ref() {
                if c.fetched_at.elapsed() < self.ttl && !c.listings.is_empty() {
                    return Ok(c.listings.clone());
                }
            }
        }

        // грузим без блокировки; два параллельных промаха просто сходят в API дважды
        let listings = Arc::new(self.feed.coin_list()?);
        info!("coin directory refreshed: {} coins", listings.len());

        let mut guard = match self.cached.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(CachedList {
            fetched_at: Instant::now(),
            listings: listings.clone(),
        });

        Ok(listings)
    }

    /// Ценовой ряд для графика. `Ok(None)` — монеты нет в справочнике.
    pub(crate) fn chart(&self, query: &str, days: u32) -> Result<Option<ChartReply>, FeedError> {
        let listings = self.listings()?;
        let Some(listing) = find_listing(&listings, query) else {
            debug!("chart: {query:?} not in coin directory");
            return Ok(None);
        };

        let points = self.feed.price_history(&listing.id, days)?;
        Ok(Some(ChartReply {
            coin_id: listing.id.clone(),
            days,
            points,
        }))
    }
}
