use std::io::{BufRead, Write};
use std::net::SocketAddr;

use anyhow::{Context, bail};
use coin_core::{ErrorCode, Reply, Request};
use log::{debug, warn};

use crate::i18n::Labels;
use crate::render;
use crate::tcp::send_request;

/// Клиентская "сессия": куда ходить, под каким id, на каком языке
pub(crate) struct App {
    pub(crate) server: SocketAddr,
    pub(crate) session: String,
    pub(crate) labels: &'static Labels,
    /// `Some(days)` — рисовать график после найденной монеты
    pub(crate) chart_days: Option<u32>,
}

/// Новый случайный id сессии
pub(crate) fn new_session_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

impl App {
    /// Один запрос целиком: цена, (график), история.
    /// `Ok(false)` — монета не найдена или сервер ответил ошибкой.
    pub(crate) fn run_query(&self, raw: &str, out: &mut impl Write) -> anyhow::Result<bool> {
        let query = raw.trim();
        if query.is_empty() {
            writeln!(out, "{}", self.labels.empty_query)?;
            return Ok(false);
        }

        let reply = send_request(
            self.server,
            &Request::Lookup {
                session: self.session.clone(),
                query: query.to_string(),
            },
        )
        .context("lookup request failed")?;

        let found = match reply {
            Reply::Lookup(lookup) => {
                write!(
                    out,
                    "{}",
                    render::render_lookup(self.labels, &lookup, render::random_quote())
                )?;
                if let Some(days) = self.chart_days {
                    self.show_chart(query, days, lookup.coin.price_usd, out)?;
                }
                true
            }
            Reply::Error { code, message } => {
                write!(out, "{}", render::render_error(self.labels, code, &message))?;
                false
            }
            other => bail!("unexpected reply to LOOKUP: {other:?}"),
        };

        self.show_history(out)?;
        Ok(found)
    }

    /// Интерактивный режим: запрос на строку до EOF или `quit`
    pub(crate) fn run_interactive(
        &self,
        input: impl BufRead,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        writeln!(out, "{}", self.labels.title)?;
        prompt(self.labels, out)?;

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
                break;
            }

            // сервер недоступен — сообщаем и ждём следующий запрос
            if let Err(e) = self.run_query(trimmed, out) {
                warn!("query {trimmed:?} failed: {e:#}");
                writeln!(out, "{} ({e:#})", self.labels.error)?;
            }
            prompt(self.labels, out)?;
        }

        Ok(())
    }

    fn show_chart(
        &self,
        query: &str,
        days: u32,
        now: Option<rust_decimal::Decimal>,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let req = Request::Chart {
            days,
            query: query.to_string(),
        };
        match send_request(self.server, &req).context("chart request failed")? {
            Reply::Chart(chart) => {
                debug!("chart {}: {} points", chart.coin_id, chart.points.len());
                write!(out, "{}", render::render_chart(self.labels, &chart, now))?;
            }
            Reply::Error {
                code: ErrorCode::NotFound,
                ..
            } => writeln!(out, "{}", self.labels.chart_missing)?,
            Reply::Error { code, message } => {
                write!(out, "{}", render::render_error(self.labels, code, &message))?
            }
            other => bail!("unexpected reply to CHART: {other:?}"),
        }
        Ok(())
    }

    fn show_history(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let req = Request::History {
            session: self.session.clone(),
        };
        match send_request(self.server, &req).context("history request failed")? {
            Reply::History(terms) => write!(out, "{}", render::render_history(self.labels, &terms))?,
            Reply::Error { code, message } => {
                write!(out, "{}", render::render_error(self.labels, code, &message))?
            }
            other => bail!("unexpected reply to HISTORY: {other:?}"),
        }
        Ok(())
    }
}

fn prompt(labels: &Labels, out: &mut impl Write) -> std::io::Result<()> {
    write!(out, "🔍 {} ({}): ", labels.search, labels.placeholder)?;
    out.flush()
}
