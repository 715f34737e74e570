#![allow(dead_code)]

use std::time::Duration;

use brmdoor::SessionConfig;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines},
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpListener,
    },
    time::timeout,
};

/// How long the fake server waits for the client before failing the test.
pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Binds a local listener and returns a config that points at it.
pub async fn listen() -> (TcpListener, SessionConfig) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let config = SessionConfig {
        host: "127.0.0.1".to_owned(),
        port,
        ..Default::default()
    };
    (listener, config)
}

/// One accepted client, seen from the server side.
pub struct FakeIrcd {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl FakeIrcd {
    pub async fn accept(listener: &TcpListener) -> Self {
        let (stream, _) = timeout(TIMEOUT, listener.accept())
            .await
            .expect("client never connected")
            .unwrap();
        let (reader, writer) = stream.into_split();

        Self {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }

    /// Next line from the client, `None` once it has closed the socket.
    pub async fn next_line(&mut self) -> Option<String> {
        timeout(TIMEOUT, self.lines.next_line())
            .await
            .expect("client went quiet")
            .unwrap()
    }

    pub async fn expect(&mut self, want: &str) {
        assert_eq!(self.next_line().await.as_deref(), Some(want));
    }

    pub async fn expect_registration(&mut self, nick: &str) {
        self.expect(&format!("NICK {nick}")).await;
        self.expect("USER brmdoor 0 * :brmlab door").await;
    }

    pub async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{line}\r\n").as_bytes())
            .await
            .unwrap();
    }

    /// Everything the client sends until it closes the connection.
    pub async fn drain(&mut self) -> Vec<String> {
        let mut rest = vec![];
        while let Some(line) = self.next_line().await {
            rest.push(line);
        }
        rest
    }
}
