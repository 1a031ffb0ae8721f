use coin_core::protocol::{format_request, parse_reply};
use coin_core::{ProtocolError, Reply, Request};
use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;
use thiserror::Error;

const TCP_CONNECT_TIMEOUT_S: u64 = 5;
// сервер сам ходит во внешние API с таймаутом до 15 с, ждём дольше
const TCP_READ_TIMEOUT_S: u64 = 30;
const TCP_WRITE_TIMEOUT_S: u64 = 5;

#[derive(Debug, Error)]
pub(crate) enum RequestError {
    #[error("cannot connect to coin-server at {addr}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("i/o error talking to coin-server")]
    Io(#[from] io::Error),

    #[error("server closed connection without response")]
    NoResponse,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Одно соединение на запрос: пишем строку, читаем строку ответа
pub(crate) fn send_request(server: SocketAddr, req: &Request) -> Result<Reply, RequestError> {
    let mut stream =
        TcpStream::connect_timeout(&server, Duration::from_secs(TCP_CONNECT_TIMEOUT_S))
            .map_err(|source| RequestError::Connect {
                addr: server,
                source,
            })?;

    stream.set_nodelay(true).ok();
    stream
        .set_read_timeout(Some(Duration::from_secs(TCP_READ_TIMEOUT_S)))
        .ok();
    stream
        .set_write_timeout(Some(Duration::from_secs(TCP_WRITE_TIMEOUT_S)))
        .ok();

    // отправляем команду
    stream.write_all(format_request(req).as_bytes())?;
    stream.flush()?;

    // обрабатываем ответ
    let mut reader = BufReader::new(&mut stream);

    let mut line = String::new();
    let n = reader.read_line(&mut line)?;

    if n == 0 {
        return Err(RequestError::NoResponse);
    }

    Ok(parse_reply(&line)?)
}
