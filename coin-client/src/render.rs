use coin_core::format::format_usd;
use coin_core::protocol::{ChartReply, LookupReply};
use coin_core::ErrorCode;
use rand::seq::IndexedRandom;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::i18n::Labels;

const QUOTES: &[&str] = &[
    "💡 'In crypto we trust, in code we rely.'",
    "🚀 'Bitcoin is the beginning of something great.'",
    "🔐 'Not your keys, not your coins.'",
    "🌍 'Decentralize everything, empower everyone.'",
    "📈 'HODL tight — the future is volatile but promising.'",
    "⏳ 'Time in the market beats timing the market.'",
    "💎 'Diamond hands never break.'",
    "🔥 'When others panic, crypto warriors buy.'",
];

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 40;

pub(crate) fn random_quote() -> &'static str {
    QUOTES.choose(&mut rand::rng()).copied().unwrap_or(QUOTES[0])
}

pub(crate) fn render_lookup(labels: &Labels, reply: &LookupReply, quote: &str) -> String {
    format!(
        "{}\n📅 {}: {}\n{}: {}\n",
        reply.summary,
        labels.updated,
        reply.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
        labels.quote_title,
        quote
    )
}

/// `now` — текущая цена из структурированной записи LOOKUP, если была
pub(crate) fn render_chart(labels: &Labels, chart: &ChartReply, now: Option<Decimal>) -> String {
    let mut out = format!("### {}\n", labels.graph_title);

    let prices: Vec<Decimal> = chart.points.iter().map(|p| p.price).collect();
    let (Some(first), Some(last)) = (prices.first(), prices.last()) else {
        out.push_str(labels.no_history);
        out.push('\n');
        return out;
    };
    // оба Some, значит и min/max есть
    let low = prices.iter().min().copied().unwrap_or(*first);
    let high = prices.iter().max().copied().unwrap_or(*first);

    out.push_str(&format!(
        "{} → {} ({})\n",
        format_usd(*first),
        format_usd(*last),
        change_pct(*first, *last)
    ));
    out.push_str(&format!("low {} / high {}\n", format_usd(low), format_usd(high)));
    if let Some(now) = now {
        out.push_str(&format!("now {}\n", format_usd(now)));
    }
    out.push_str(&sparkline(&prices, SPARK_WIDTH));
    out.push('\n');
    out
}

pub(crate) fn render_history(labels: &Labels, terms: &[String]) -> String {
    if terms.is_empty() {
        return String::new();
    }
    format!("### 🧠 {}\n{}\n", labels.history, terms.join(", "))
}

pub(crate) fn render_error(labels: &Labels, code: ErrorCode, message: &str) -> String {
    match code {
        ErrorCode::NotFound => format!("❌ {message}\n"),
        _ => format!("{} ({code}: {message})\n", labels.error),
    }
}

fn change_pct(first: Decimal, last: Decimal) -> String {
    if first.is_zero() {
        return "n/a".to_string();
    }
    let pct = ((last - first) / first * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if pct.is_sign_positive() && !pct.is_zero() { "+" } else { "" };
    format!("{sign}{pct:.2}%")
}

/// Строка из блоков ▁..█; длинный ряд прореживается до `width` точек
pub(crate) fn sparkline(prices: &[Decimal], width: usize) -> String {
    let values: Vec<f64> = prices.iter().filter_map(|p| p.to_f64()).collect();
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let sampled: Vec<f64> = if values.len() <= width {
        values
    } else {
        (0..width)
            .map(|i| values[i * (values.len() - 1) / (width - 1).max(1)])
            .collect()
    };

    let min = sampled.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sampled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = (SPARK_BARS.len() - 1) as f64;

    sampled
        .iter()
        .map(|v| {
            let idx = if span > 0.0 {
                (((v - min) / span) * top).round() as usize
            } else {
                SPARK_BARS.len() / 2
            };
            SPARK_BARS[idx.min(SPARK_BARS.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Lang, labels};
    use chrono::{TimeZone, Utc};
    use coin_core::{CoinRecord, PricePoint};
    use rust_decimal_macros::dec;

    fn lookup_reply() -> LookupReply {
        LookupReply {
            summary: "💰 Bitcoin (BTC)\n• Price: $65,000.12\n• Rank: #1\n• Market Cap: $1,280,000,000,000.00"
                .into(),
            coin: CoinRecord {
                name: "Bitcoin".into(),
                symbol: "BTC".into(),
                price_usd: Some(dec!(65000.1234)),
                rank: Some(1),
                market_cap_usd: Some(dec!(1280000000000)),
            },
            fetched_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn chart(prices: &[i64]) -> ChartReply {
        ChartReply {
            coin_id: "bitcoin".into(),
            days: 7,
            points: prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint {
                    timestamp_ms: i as u64,
                    price: Decimal::from(*p),
                })
                .collect(),
        }
    }

    #[test]
    fn lookup_shows_summary_timestamp_and_quote() {
        let text = render_lookup(labels(Lang::En), &lookup_reply(), "q!");

        assert!(text.starts_with("💰 Bitcoin (BTC)\n• Price: $65,000.12"));
        assert!(text.contains("📅 Last Updated: 2024-05-01 12:00:00 UTC"));
        assert!(text.contains("💬 Crypto Quote: q!"));
    }

    #[test]
    fn lookup_labels_follow_language() {
        let text = render_lookup(labels(Lang::Ar), &lookup_reply(), "q");
        assert!(text.contains("آخر تحديث"));
    }

    #[test]
    fn chart_summary_lines() {
        let text = render_chart(labels(Lang::En), &chart(&[100, 90, 150, 110]), None);

        assert!(text.starts_with("### 📈 Last 7 Days Price Chart (USD)\n"));
        assert!(text.contains("$100.00 → $110.00 (+10.00%)"));
        assert!(text.contains("low $90.00 / high $150.00"));
        assert!(!text.contains("now "));
    }

    #[test]
    fn chart_uses_structured_current_price() {
        let now = lookup_reply().coin.price_usd;
        let text = render_chart(labels(Lang::En), &chart(&[1, 2]), now);
        assert!(text.contains("now $65,000.12"));
    }

    #[test]
    fn chart_without_points() {
        let text = render_chart(labels(Lang::En), &chart(&[]), None);
        assert!(text.ends_with("No price history available.\n"));
    }

    #[test]
    fn change_pct_handles_drop_and_zero_base() {
        assert_eq!(change_pct(Decimal::from(200), Decimal::from(150)), "-25.00%");
        assert_eq!(change_pct(Decimal::from(5), Decimal::from(5)), "0.00%");
        assert_eq!(change_pct(Decimal::ZERO, Decimal::from(5)), "n/a");
    }

    #[test]
    fn sparkline_scales_and_samples() {
        let prices: Vec<Decimal> = [1, 2, 3, 4, 5, 6, 7, 8].iter().map(|p| Decimal::from(*p)).collect();
        assert_eq!(sparkline(&prices, 40), "▁▂▃▄▅▆▇█");

        let long: Vec<Decimal> = (0..500).map(Decimal::from).collect();
        let line = sparkline(&long, 40);
        assert_eq!(line.chars().count(), 40);
        assert!(line.starts_with('▁'));
        assert!(line.ends_with('█'));

        let flat = vec![Decimal::from(3); 5];
        assert_eq!(sparkline(&flat, 40), "▅▅▅▅▅");
    }

    #[test]
    fn history_hidden_when_empty() {
        assert_eq!(render_history(labels(Lang::En), &[]), "");
        assert_eq!(
            render_history(labels(Lang::En), &["btc".into(), "eth".into()]),
            "### 🧠 Last Searched Coins\nbtc, eth\n"
        );
    }

    #[test]
    fn errors_render_by_kind() {
        let en = labels(Lang::En);
        assert_eq!(
            render_error(en, ErrorCode::NotFound, "Cryptocurrency 'x' not found in top 100."),
            "❌ Cryptocurrency 'x' not found in top 100.\n"
        );
        assert_eq!(
            render_error(en, ErrorCode::Timeout, "feed timed out after 10s"),
            "❌ Could not get data. (timeout: feed timed out after 10s)\n"
        );
    }

    #[test]
    fn random_quote_is_from_list() {
        assert!(QUOTES.contains(&random_quote()));
    }
}
