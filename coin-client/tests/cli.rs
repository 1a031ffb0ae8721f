use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread;

const LOOKUP_BTC: &str = concat!(
    r#"OK LOOKUP {"summary":"💰 Bitcoin (BTC)\n• Price: $65,000.12\n• Rank: #1\n• Market Cap: $1,280,000,000,000.00","#,
    r#""coin":{"name":"Bitcoin","symbol":"BTC","price_usd":"65000.1234","rank":1,"market_cap_usd":"1280000000000"},"#,
    r#""fetched_at":"2024-05-01T12:00:00Z"}"#,
    "\n"
);

/// Отвечает на `conns` соединений по первому слову запроса
fn fake_server(conns: usize, lookup_reply: &'static str) -> (SocketAddr, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let h = thread::spawn(move || {
        for _ in 0..conns {
            let (mut stream, _) = listener.accept().unwrap();
            let mut line = String::new();
            BufReader::new(&mut stream).read_line(&mut line).unwrap();
            let reply = if line.starts_with("LOOKUP ") {
                lookup_reply
            } else {
                "OK HISTORY [\"btc\"]\n"
            };
            stream.write_all(reply.as_bytes()).unwrap();
        }
    });

    (addr, h)
}

#[test]
fn help_mentions_binary() {
    Command::cargo_bin("coin-client")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("coin-client"));
}

#[test]
fn bad_server_address_fails_fast() {
    Command::cargo_bin("coin-client")
        .unwrap()
        .args(["--server", "localhost", "btc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--server must look like HOST:PORT"));
}

#[test]
fn one_shot_lookup_prints_summary() {
    let (addr, h) = fake_server(2, LOOKUP_BTC);

    Command::cargo_bin("coin-client")
        .unwrap()
        .args(["--server", &addr.to_string(), "--session", "t1", "btc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("💰 Bitcoin (BTC)"))
        .stdout(predicate::str::contains("• Price: $65,000.12"))
        .stdout(predicate::str::contains("Last Updated: 2024-05-01 12:00:00 UTC"));

    h.join().unwrap();
}

#[test]
fn one_shot_not_found_exits_with_1() {
    let (addr, h) = fake_server(
        2,
        "ERR not_found Cryptocurrency 'zzz' not found in top 100.\n",
    );

    Command::cargo_bin("coin-client")
        .unwrap()
        .args(["--server", &addr.to_string(), "zzz"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not found in top 100"));

    h.join().unwrap();
}

#[test]
fn urdu_labels() {
    let (addr, h) = fake_server(2, LOOKUP_BTC);

    Command::cargo_bin("coin-client")
        .unwrap()
        .args(["--server", &addr.to_string(), "--lang", "ur", "btc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("آخری تازہ کاری"));

    h.join().unwrap();
}

#[test]
fn unreachable_server_is_an_error() {
    let addr = {
        let l = TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap()
    };

    Command::cargo_bin("coin-client")
        .unwrap()
        .args(["--server", &addr.to_string(), "btc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lookup request failed"));
}
