use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Запись о монете в том виде, в каком её отдаёт тикер-фид.
///
/// Числовые поля у фида бывают строками (`"65000.12"`), числами или вовсе
/// отсутствуют, поэтому они опциональны; подстановку значений по умолчанию
/// делает форматтер.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_rank")]
    pub rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub market_cap_usd: Option<Decimal>,
}

/// Результат поиска монеты.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(CoinRecord),
    /// Нормализованный текст запроса, по которому ничего не нашлось
    NotFound(String),
}

/// Какой уровень сопоставления сработал.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// точное совпадение символа
    Symbol,
    /// точное совпадение имени
    Name,
    /// запрос — подстрока имени
    NameSubstring,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchTier::Symbol => "symbol",
            MatchTier::Name => "name",
            MatchTier::NameSubstring => "name-substring",
        };
        f.write_str(s)
    }
}

/// Элемент справочника монет у провайдера графиков.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinListing {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

/// Точка ценового ряда для графика.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp_ms: u64,
    pub price: Decimal,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Num(serde_json::Number),
    Str(String),
}

impl RawScalar {
    fn text(&self) -> String {
        match self {
            RawScalar::Num(n) => n.to_string(),
            RawScalar::Str(s) => s.trim().to_string(),
        }
    }
}

pub(crate) fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<RawScalar>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = raw.text();
    if text.is_empty() {
        return Ok(None);
    }
    parse_decimal(&text)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid decimal: {text:?}")))
}

fn lenient_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<RawScalar>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = raw.text();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|_| de::Error::custom(format!("invalid rank: {text:?}")))
}
