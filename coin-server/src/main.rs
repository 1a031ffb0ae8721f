//! Точка входа `coin-server`.
//!
//! Жизненный цикл:
//! - парсинг CLI и сборка конфигурации
//! - выбор тикер-фида (HTTP или JSON-снимок на диске) и фида графиков
//! - TCP accept loop: одна строка-запрос и одна строка-ответ на соединение
//! - корректная остановка по `Ctrl+C`

mod cache;
mod cli;
mod config;
mod feed;
mod service;
mod session;
mod tcp;

use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};

use clap::Parser;
use log::info;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let shutdown = Arc::new(AtomicBool::new(false));

    // Ctrl+C => ставим shutdown=true
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
            info!("shutting down...");
        })?;
    }

    let args = cli::Args::parse();
    let cfg = config::ServerConfig::from_args(&args)?;

    info!(
        "Starting coin-server: tcp={}, tickers={:?}, charts={}, timeouts connect={:?} request={:?}",
        cfg.tcp_bind,
        cfg.tickers,
        cfg.chart_api_url,
        cfg.http.connect_timeout,
        cfg.http.request_timeout
    );

    let service = Arc::new(service::PriceService::from_config(&cfg)?);

    tcp::run_tcp_listener(cfg.tcp_bind, service, shutdown)
}
