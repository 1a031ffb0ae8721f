use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::CoinRecord;

const UNKNOWN_NAME: &str = "Unknown";
const UNKNOWN_FIELD: &str = "N/A";

/// Текстовая сводка по монете:
///
/// ```text
/// 💰 Bitcoin (BTC)
/// • Price: $65,000.12
/// • Rank: #1
/// • Market Cap: $1,280,000,000,000.00
/// ```
///
/// Отсутствующие числа выводятся как 0, отсутствующий ранг как `N/A`.
pub fn format_summary(coin: &CoinRecord) -> String {
    let name = non_empty_or(&coin.name, UNKNOWN_NAME);
    let symbol = non_empty_or(&coin.symbol, UNKNOWN_FIELD);
    let price = format_usd(coin.price_usd.unwrap_or_default());
    let rank = coin
        .rank
        .map(|r| r.to_string())
        .unwrap_or_else(|| UNKNOWN_FIELD.to_string());
    let market_cap = format_usd(coin.market_cap_usd.unwrap_or_default());

    format!(
        "💰 {name} ({symbol})\n\
         • Price: {price}\n\
         • Rank: #{rank}\n\
         • Market Cap: {market_cap}"
    )
}

/// `$1,234.50`: два знака после точки, запятые между тысячами.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}
