use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CHART_DAYS, MAX_SESSION_ID_LEN};
use crate::error::{FeedError, ProtocolError};
use crate::types::{CoinRecord, PricePoint};

/// Запрос клиента: одна строка на одно TCP-соединение.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `LOOKUP <session> <query...>`
    Lookup { session: String, query: String },
    /// `HISTORY <session>`
    History { session: String },
    /// `CHART <days> <query...>`
    Chart { days: u32, query: String },
}

/// Ответ на `LOOKUP`: готовая сводка и структурированная запись рядом с ней,
/// чтобы клиенту не приходилось выковыривать цену из текста.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupReply {
    pub summary: String,
    pub coin: CoinRecord,
    pub fetched_at: DateTime<Utc>,
}

/// Ответ на `CHART`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartReply {
    pub coin_id: String,
    pub days: u32,
    pub points: Vec<PricePoint>,
}

/// Коды ошибок в строке `ERR <code> <message>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    Unreachable,
    Timeout,
    UpstreamStatus,
    BadFeed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "bad_request",
            ErrorCode::NotFound => "not_found",
            ErrorCode::Unreachable => "unreachable",
            ErrorCode::Timeout => "timeout",
            ErrorCode::UpstreamStatus => "upstream_status",
            ErrorCode::BadFeed => "bad_feed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "bad_request" => ErrorCode::BadRequest,
            "not_found" => ErrorCode::NotFound,
            "unreachable" => ErrorCode::Unreachable,
            "timeout" => ErrorCode::Timeout,
            "upstream_status" => ErrorCode::UpstreamStatus,
            "bad_feed" => ErrorCode::BadFeed,
            other => return Err(ProtocolError::MalformedReply(format!("unknown code {other}"))),
        })
    }
}

impl From<&FeedError> for ErrorCode {
    fn from(e: &FeedError) -> Self {
        match e {
            FeedError::Unreachable(_) => ErrorCode::Unreachable,
            FeedError::Timeout(_) => ErrorCode::Timeout,
            FeedError::Status(_) => ErrorCode::UpstreamStatus,
            FeedError::Parse(_) => ErrorCode::BadFeed,
        }
    }
}

/// Ответ сервера.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Lookup(LookupReply),
    History(Vec<String>),
    Chart(ChartReply),
    Error { code: ErrorCode, message: String },
}

impl Reply {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Reply::Error {
            code,
            message: message.into(),
        }
    }
}

/// Парсит строку запроса вида:
/// "LOOKUP 3f9a bitcoin cash"
/// "HISTORY 3f9a"
/// "CHART 7 btc"
pub fn parse_request(line: &str) -> Result<Request, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::EmptyCommand);
    }

    let (cmd, rest) = split_word(line);

    match cmd {
        "LOOKUP" => {
            let (session, query) = split_word(rest);
            let session = parse_session(session)?;
            if query.is_empty() {
                return Err(ProtocolError::MissingQuery);
            }
            Ok(Request::Lookup {
                session,
                query: query.to_string(),
            })
        }
        "HISTORY" => {
            let (session, extra) = split_word(rest);
            let session = parse_session(session)?;
            if !extra.is_empty() {
                return Err(ProtocolError::ExtraArgs);
            }
            Ok(Request::History { session })
        }
        "CHART" => {
            let (days_raw, query) = split_word(rest);
            if days_raw.is_empty() {
                return Err(ProtocolError::MissingDays);
            }
            let days: u32 = days_raw
                .parse()
                .ok()
                .filter(|d| (1..=MAX_CHART_DAYS).contains(d))
                .ok_or_else(|| ProtocolError::InvalidDays(days_raw.to_string()))?;
            if query.is_empty() {
                return Err(ProtocolError::MissingQuery);
            }
            Ok(Request::Chart {
                days,
                query: query.to_string(),
            })
        }
        other => Err(ProtocolError::UnknownCommand(other.to_string())),
    }
}

/// Строка запроса с завершающим `\n`.
pub fn format_request(req: &Request) -> String {
    match req {
        Request::Lookup { session, query } => format!("LOOKUP {session} {}\n", one_line(query)),
        Request::History { session } => format!("HISTORY {session}\n"),
        Request::Chart { days, query } => format!("CHART {days} {}\n", one_line(query)),
    }
}

/// Строка ответа с завершающим `\n`. JSON пишется в одну строку.
pub fn format_reply(reply: &Reply) -> Result<String, serde_json::Error> {
    Ok(match reply {
        Reply::Lookup(r) => format!("OK LOOKUP {}\n", serde_json::to_string(r)?),
        Reply::History(terms) => format!("OK HISTORY {}\n", serde_json::to_string(terms)?),
        Reply::Chart(r) => format!("OK CHART {}\n", serde_json::to_string(r)?),
        Reply::Error { code, message } => format!("ERR {code} {}\n", one_line(message)),
    })
}

pub fn parse_reply(line: &str) -> Result<Reply, ProtocolError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let malformed = |why: &str| ProtocolError::MalformedReply(format!("{why}: {line:?}"));

    if let Some(rest) = line.strip_prefix("OK ") {
        let (kind, json) = split_word(rest);
        let bad_json = |e: serde_json::Error| malformed(&e.to_string());
        return match kind {
            "LOOKUP" => Ok(Reply::Lookup(serde_json::from_str(json).map_err(bad_json)?)),
            "HISTORY" => Ok(Reply::History(serde_json::from_str(json).map_err(bad_json)?)),
            "CHART" => Ok(Reply::Chart(serde_json::from_str(json).map_err(bad_json)?)),
            _ => Err(malformed("unknown reply kind")),
        };
    }

    if let Some(rest) = line.strip_prefix("ERR ") {
        let (code, message) = split_word(rest);
        return Ok(Reply::Error {
            code: code.parse()?,
            message: message.to_string(),
        });
    }

    Err(malformed("expected OK or ERR"))
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn parse_session(raw: &str) -> Result<String, ProtocolError> {
    if raw.is_empty() {
        return Err(ProtocolError::MissingSession);
    }
    let valid = raw.len() <= MAX_SESSION_ID_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ProtocolError::InvalidSession(raw.to_string()));
    }
    Ok(raw.to_string())
}

fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
