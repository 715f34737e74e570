use std::net::SocketAddr;

use log::{debug, info, trace, warn};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
};

use crate::{
    context::IrcContext, events::ChannelEvent, IrcMessage, SessionConfig, SessionError,
    MAX_MSG_LEN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Registering,
    AwaitingWelcome,
    Joined,
    Done,
}

/// One connection's worth of IRC: register, join, wait for a single
/// JOIN or TOPIC on the configured channel, then quit.
pub struct Session {
    pub(crate) config: SessionConfig,
    pub(crate) nick: String,
    pub(crate) nick_retries: u32,
    pub(crate) state: SessionState,
    pub(crate) context: IrcContext,
    lines: LineBuffer,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            nick: config.nick.clone(),
            config,
            nick_retries: 0,
            state: SessionState::Connecting,
            context: IrcContext::default(),
            lines: LineBuffer::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The nickname currently in use, including any collision suffix.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub async fn connect(&self) -> Result<TcpStream, SessionError> {
        let domain = self.config.address();

        info!("Connecting to {}", domain);

        let connect_err = |source| SessionError::Connect {
            addr: domain.clone(),
            source,
        };

        let addrs = tokio::net::lookup_host(domain.as_str())
            .await
            .map_err(connect_err)?;

        connect_any(addrs).await.map_err(connect_err)
    }

    pub async fn run(&mut self) -> Result<ChannelEvent, SessionError> {
        let stream = self.connect().await?;
        self.run_on(stream).await
    }

    /// Drives the session over an already established stream.
    pub async fn run_on<S: AsyncRead + AsyncWrite + Unpin>(
        &mut self,
        stream: S,
    ) -> Result<ChannelEvent, SessionError> {
        let Some(limit) = self.config.event_timeout() else {
            return self.drive(stream).await;
        };

        let outcome = tokio::time::timeout(limit, self.drive(stream)).await;

        outcome.unwrap_or_else(|_| {
            warn!("Nothing happened on {} in {:?}", self.config.channel, limit);
            Err(SessionError::Timeout(limit.as_secs()))
        })
    }

    fn register(&mut self) {
        info!(
            "Registering as {}!{} ({})",
            self.nick, self.config.user, self.config.real
        );
        self.state = SessionState::Registering;
        self.context.nick(&self.nick);
        self.context.user(&self.config.user, &self.config.real);
    }

    async fn drive<S: AsyncRead + AsyncWrite + Unpin>(
        &mut self,
        mut stream: S,
    ) -> Result<ChannelEvent, SessionError> {
        self.register();
        self.context.flush(&mut stream).await?;
        self.state = SessionState::AwaitingWelcome;

        loop {
            let lines = recv(&mut stream, &mut self.lines).await?;

            for line in lines {
                trace!("<< {:?}", line);

                let Some(message) = IrcMessage::parse(&line) else {
                    debug!("Skipping unparseable line {:?}", line);
                    continue;
                };

                if let Some(event) = self.handle_message(&message)? {
                    println!("{event}");
                    self.disconnect(&mut stream).await;
                    return Ok(event);
                }
            }

            self.context.flush(&mut stream).await?;
        }
    }

    /// Best effort: the event has already been observed, so a failing QUIT
    /// does not turn the run into an error.
    async fn disconnect<S: AsyncWrite + Unpin>(&mut self, stream: &mut S) {
        self.context.quit(&self.config.quit_message);
        if let Err(err) = self.context.flush(stream).await {
            debug!("Unable to send QUIT: {err}");
        }
        if let Err(err) = stream.shutdown().await {
            debug!("Unable to shut down connection: {err}");
        }
        self.state = SessionState::Done;
        info!("Disconnected");
    }
}

/// Tries each resolved address in turn, returning the last failure if none
/// of them accepts.
async fn connect_any(
    addrs: impl IntoIterator<Item = SocketAddr>,
) -> std::io::Result<TcpStream> {
    let mut last_err = None;

    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(err) => {
                debug!("Unable to connect to {addr}: {err}");
                last_err = Some(err);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "no address found")
    }))
}

/// Inbound bytes not yet terminated by a newline. Never holds more than one
/// line's worth: anything longer is thrown away up to its newline.
#[derive(Default)]
struct LineBuffer {
    partial: Vec<u8>,
    overflowed: bool,
}

impl LineBuffer {
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let scan_from = self.partial.len();
        self.partial.extend_from_slice(bytes);

        let mut lines = vec![];
        let mut start = 0;
        for end in scan_from..self.partial.len() {
            if self.partial[end] != b'\n' {
                continue;
            }

            let raw = &self.partial[start..end];
            start = end + 1;

            if self.overflowed {
                self.overflowed = false;
                continue;
            }

            let line = String::from_utf8_lossy(raw);
            let line = line.trim_end_matches(['\r', '\n']);
            if !line.is_empty() {
                lines.push(line.to_owned());
            }
        }
        self.partial.drain(..start);

        if self.partial.len() > MAX_MSG_LEN {
            debug!("Dropping line longer than {} bytes", MAX_MSG_LEN);
            self.partial.clear();
            self.overflowed = true;
        }

        lines
    }
}

async fn recv<R: AsyncRead + Unpin>(
    reader: &mut R,
    buffer: &mut LineBuffer,
) -> Result<Vec<String>, SessionError> {
    let mut buf = [0; MAX_MSG_LEN];
    let bytes_read = reader.read(&mut buf).await?;

    if bytes_read == 0 {
        return Err(SessionError::ConnectionClosed);
    }

    Ok(buffer.push(&buf[..bytes_read]))
}
