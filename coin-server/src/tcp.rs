use crate::service::PriceService;
use anyhow::Context;
use coin_core::protocol::{format_reply, parse_request};
use coin_core::{ErrorCode, ProtocolError, Reply, Request};
use log::{debug, info, warn};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};
use std::thread;
use std::time::Duration;

const TCP_READ_TIMEOUT_S: u64 = 5;
const TCP_WRITE_TIMEOUT_S: u64 = 5;

/// Строка запроса длиннее этого считается мусором
const MAX_REQUEST_BYTES: u64 = 4 * 1024;

// accept loop + по потоку на соединение
pub(crate) fn run_tcp_listener(
    tcp_addr: SocketAddr,
    service: Arc<PriceService>,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener =
        TcpListener::bind(tcp_addr).with_context(|| format!("bind TCP listener {}", tcp_addr))?;
    listener
        .set_nonblocking(true)
        .context("listener.set_nonblocking(true)")?;
    info!("listening on {}", listener.local_addr().unwrap_or(tcp_addr));

    let mut conn_handles = Vec::new();

    loop {
        reap_finished_conns(&mut conn_handles);

        if shutdown.load(Ordering::Relaxed) {
            info!("shutting down tcp listener");
            break;
        }

        match listener.accept() {
            Ok((stream, addr)) => {
                stream
                    .set_nonblocking(false)
                    .context("stream.set_nonblocking(false)")?;

                stream.set_nodelay(true).ok();
                stream
                    .set_read_timeout(Some(Duration::from_secs(TCP_READ_TIMEOUT_S)))
                    .ok();
                stream
                    .set_write_timeout(Some(Duration::from_secs(TCP_WRITE_TIMEOUT_S)))
                    .ok();

                let service = service.clone();
                let h = thread::spawn(move || {
                    if let Err(e) = handle_conn(stream, &service) {
                        warn!("handle_conn {addr} error: {e}");
                    }
                });
                conn_handles.push(h);
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                // нет новых соединений прямо сейчас
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                warn!("accept error: {e}");
                thread::sleep(Duration::from_millis(50));
            }
        }
    }

    // запросы к фидам ограничены таймаутами, так что join не зависнет навсегда
    for h in conn_handles {
        if let Err(panic) = h.join() {
            warn!("connection thread panicked: {:?}", panic);
        }
    }

    Ok(())
}

fn reap_finished_conns(handles: &mut Vec<thread::JoinHandle<()>>) {
    let mut i = 0;
    while i < handles.len() {
        if handles[i].is_finished() {
            let h = handles.swap_remove(i);
            if let Err(panic) = h.join() {
                warn!("connection thread panicked: {:?}", panic);
            }
        } else {
            i += 1;
        }
    }
}

fn extract_request(stream: &mut TcpStream) -> anyhow::Result<Request> {
    let mut line = String::new();

    {
        let mut reader = BufReader::new(stream.take(MAX_REQUEST_BYTES));
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            anyhow::bail!("client closed connection");
        }
        if !line.ends_with('\n') && n as u64 >= MAX_REQUEST_BYTES {
            anyhow::bail!("request line too long");
        }
    }

    parse_request(&line).map_err(|e: ProtocolError| anyhow::anyhow!(e))
}

fn handle_conn(mut stream: TcpStream, service: &PriceService) -> anyhow::Result<()> {
    let reply = match extract_request(&mut stream) {
        Ok(req) => {
            debug!("request: {req:?}");
            service.handle(req)
        }
        Err(e) => Reply::error(ErrorCode::BadRequest, e.to_string()),
    };

    let line = format_reply(&reply).context("encode reply")?;
    stream.write_all(line.as_bytes())?;
    stream.flush()?;
    stream.shutdown(std::net::Shutdown::Both).ok();

    Ok(())
}
