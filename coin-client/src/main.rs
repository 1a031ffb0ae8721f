//! Точка входа `coin-client`.
//!
//! Жизненный цикл:
//! - парсинг CLI, выбор языка и id сессии
//! - с запросом в аргументах: один LOOKUP (+ CHART) + HISTORY, код выхода 1 если монета не найдена
//! - без запроса: интерактивный цикл по строкам stdin
//! - каждый запрос к серверу — отдельное короткое TCP-соединение

mod app;
mod cli;
mod i18n;
mod render;
mod tcp;

use std::io::{self, Write};

use clap::Parser;
use log::info;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/trace
    env_logger::init();

    let args = cli::Args::parse();
    args.validate()?;

    let app = app::App {
        server: args.server_socket_addr()?,
        session: args.session.clone().unwrap_or_else(app::new_session_id),
        labels: i18n::labels(args.lang),
        chart_days: args.chart.then_some(args.days),
    };

    info!(
        "Starting coin-client: server={}, session={}, lang={:?}, chart_days={:?}",
        app.server, app.session, args.lang, app.chart_days
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.query_text() {
        Some(query) => {
            let found = app.run_query(&query, &mut out)?;
            out.flush()?;
            if !found {
                std::process::exit(1);
            }
        }
        None => app.run_interactive(io::stdin().lock(), &mut out)?,
    }

    Ok(())
}
