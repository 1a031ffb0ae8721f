use std::net::{SocketAddr, ToSocketAddrs};

use anyhow::{Result, bail};
use clap::Parser;
use coin_core::{DEFAULT_CHART_DAYS, MAX_CHART_DAYS, MAX_SESSION_ID_LEN};

use crate::i18n::Lang;

/// Coin Client - цена криптовалюты по имени или символу через coin-server.
///
/// С запросом в аргументах работает один раз; без него читает запросы
/// построчно из stdin.
#[derive(Parser, Debug, Clone)]
#[command(name = "coin-client", version, about)]
pub(crate) struct Args {
    /// TCP адрес coin-server, например 127.0.0.1:5555 или host.example.com:5555
    #[arg(long, default_value = "127.0.0.1:5555")]
    pub(crate) server: String,

    /// id сессии для истории поиска; по умолчанию случайный
    #[arg(long)]
    pub(crate) session: Option<String>,

    /// Язык интерфейса
    #[arg(long, value_enum, default_value_t = Lang::En)]
    pub(crate) lang: Lang,

    /// Показать график цены после найденной монеты
    #[arg(long)]
    pub(crate) chart: bool,

    /// Окно графика в днях
    #[arg(
        long,
        default_value_t = DEFAULT_CHART_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CHART_DAYS))
    )]
    pub(crate) days: u32,

    /// Название или символ монеты, например: bitcoin, ETH, "bitcoin cash"
    pub(crate) query: Vec<String>,
}

impl Args {
    /// Валидация аргументов (server выглядит как HOST:PORT, session из допустимых символов)
    pub(crate) fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            bail!("--server is empty");
        }
        if !self.server.contains(':') {
            bail!("--server must look like HOST:PORT (got: {})", self.server);
        }

        if let Some(session) = &self.session {
            let ok = !session.is_empty()
                && session.len() <= MAX_SESSION_ID_LEN
                && session
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !ok {
                bail!("--session must be 1..={MAX_SESSION_ID_LEN} chars of [A-Za-z0-9_-]");
            }
        }

        Ok(())
    }

    pub(crate) fn server_socket_addr(&self) -> std::io::Result<SocketAddr> {
        // Берём первый результат резолвинга
        self.server
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses resolved"))
    }

    /// Запрос из позиционных аргументов; `None` — интерактивный режим
    pub(crate) fn query_text(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["coin-client"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn positional_words_form_one_query() {
        let args = parse(&["bitcoin", "cash"]);
        assert_eq!(args.query_text().as_deref(), Some("bitcoin cash"));
        assert_eq!(args.days, DEFAULT_CHART_DAYS);
        assert_eq!(args.lang, Lang::En);
    }

    #[test]
    fn no_query_means_interactive() {
        assert!(parse(&[]).query_text().is_none());
    }

    #[test]
    fn validate_rejects_bad_server_and_session() {
        assert!(parse(&["--server", "localhost"]).validate().is_err());
        assert!(parse(&["--session", "a b"]).validate().is_err());
        assert!(parse(&["--session", "abc_1-2"]).validate().is_ok());
    }

    #[test]
    fn days_out_of_range_rejected_by_clap() {
        assert!(Args::try_parse_from(["coin-client", "--days", "0"]).is_err());
        assert!(Args::try_parse_from(["coin-client", "--days", "366"]).is_err());
    }

    #[test]
    fn lang_parses() {
        assert_eq!(parse(&["--lang", "ur"]).lang, Lang::Ur);
    }
}
