use crate::error::FeedError;
use crate::feed::TickerFeed;
use crate::types::{CoinRecord, MatchTier, Resolution};

/// Нормализация пользовательского ввода: trim + lowercase.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Ищет монету по уже нормализованному запросу.
///
/// Уровни проверяются строго по порядку, каждый по всему списку:
/// символ, имя, подстрока имени. Внутри уровня побеждает первая запись
/// в порядке фида.
pub fn find_match<'a>(
    records: &'a [CoinRecord],
    query: &str,
) -> Option<(MatchTier, &'a CoinRecord)> {
    if let Some(rec) = records.iter().find(|c| c.symbol.to_lowercase() == query) {
        return Some((MatchTier::Symbol, rec));
    }

    if let Some(rec) = records.iter().find(|c| c.name.to_lowercase() == query) {
        return Some((MatchTier::Name, rec));
    }

    records
        .iter()
        .find(|c| c.name.to_lowercase().contains(query))
        .map(|rec| (MatchTier::NameSubstring, rec))
}

/// Резолвер монет поверх тикер-фида.
///
/// На каждый вызов `resolve` ровно одно обращение к фиду, без кэша и ретраев.
pub struct Resolver<F> {
    feed: F,
}

impl<F: TickerFeed> Resolver<F> {
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    pub fn resolve(&self, raw_query: &str) -> Result<Resolution, FeedError> {
        let query = normalize_query(raw_query);
        // пустая строка — подстрока любого имени; такой запрос не ищем
        if query.is_empty() {
            return Ok(Resolution::NotFound(query));
        }

        let records = self.feed.fetch_tickers()?;

        Ok(match find_match(&records, &query) {
            Some((_, rec)) => Resolution::Found(rec.clone()),
            None => Resolution::NotFound(query),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn coin(name: &str, symbol: &str, rank: u32) -> CoinRecord {
        CoinRecord {
            name: name.to_string(),
            symbol: symbol.to_string(),
            price_usd: Some(dec!(1)),
            rank: Some(rank),
            market_cap_usd: Some(dec!(100)),
        }
    }

    struct StaticFeed {
        records: Vec<CoinRecord>,
        calls: AtomicUsize,
    }

    impl StaticFeed {
        fn new(records: Vec<CoinRecord>) -> Self {
            Self {
                records,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TickerFeed for StaticFeed {
        fn fetch_tickers(&self) -> Result<Vec<CoinRecord>, FeedError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.records.clone())
        }
    }

    struct DownFeed;

    impl TickerFeed for DownFeed {
        fn fetch_tickers(&self) -> Result<Vec<CoinRecord>, FeedError> {
            Err(FeedError::Unreachable("connection refused".into()))
        }
    }

    #[test]
    fn normalize_query_trims_and_lowercases() {
        assert_eq!(normalize_query("  BiTcoin \n"), "bitcoin");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn symbol_tier_wins_over_exact_name_of_earlier_record() {
        // у первой записи имя "ETH", у второй символ "ETH"
        let records = vec![coin("ETH", "ETHX", 5), coin("Ethereum", "ETH", 2)];

        let (tier, rec) = find_match(&records, "eth").unwrap();
        assert_eq!(tier, MatchTier::Symbol);
        assert_eq!(rec.name, "Ethereum");
    }

    #[test]
    fn exact_name_beats_earlier_substring() {
        let records = vec![coin("Bitcoin Cash", "BCH", 10), coin("Bitcoin", "BTC", 1)];

        let (tier, rec) = find_match(&records, "bitcoin").unwrap();
        assert_eq!(tier, MatchTier::Name);
        assert_eq!(rec.symbol, "BTC");
    }

    #[test]
    fn substring_takes_first_in_feed_order() {
        let records = vec![
            coin("Bitcoin", "BTC", 1),
            coin("Ethereum", "ETH", 2),
            coin("Tether", "USDT", 3),
        ];

        let (tier, rec) = find_match(&records, "e").unwrap();
        assert_eq!(tier, MatchTier::NameSubstring);
        assert_eq!(rec.symbol, "ETH");
    }

    #[test]
    fn no_tier_matches_gives_none() {
        let records = vec![coin("Bitcoin", "BTC", 1)];
        assert!(find_match(&records, "zzz").is_none());
    }

    #[test]
    fn resolve_btc_scenario() {
        let btc = CoinRecord {
            name: "Bitcoin".into(),
            symbol: "BTC".into(),
            price_usd: Some(dec!(65000.1234)),
            rank: Some(1),
            market_cap_usd: Some(dec!(1280000000000)),
        };
        let resolver = Resolver::new(StaticFeed::new(vec![btc.clone()]));

        assert_eq!(resolver.resolve("btc").unwrap(), Resolution::Found(btc));
    }

    #[test]
    fn resolve_empty_feed_is_not_found() {
        let resolver = Resolver::new(StaticFeed::new(Vec::new()));

        for q in ["btc", "Bitcoin", "e"] {
            assert_eq!(
                resolver.resolve(q).unwrap(),
                Resolution::NotFound(normalize_query(q))
            );
        }
    }

    #[test]
    fn resolve_blank_query_skips_feed() {
        let feed = StaticFeed::new(vec![coin("Bitcoin", "BTC", 1)]);
        let resolver = Resolver::new(feed);

        assert_eq!(
            resolver.resolve("  ").unwrap(),
            Resolution::NotFound(String::new())
        );
        assert_eq!(resolver.feed.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn resolve_fetches_once_per_call() {
        let resolver = Resolver::new(StaticFeed::new(vec![coin("Bitcoin", "BTC", 1)]));

        resolver.resolve("btc").unwrap();
        resolver.resolve("btc").unwrap();
        assert_eq!(resolver.feed.calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn resolve_surfaces_transport_error() {
        let resolver = Resolver::new(DownFeed);

        let err = resolver.resolve("btc").unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(err, FeedError::Unreachable(_)));
    }
}
