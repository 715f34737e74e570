use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("unable to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server closed the connection")]
    ConnectionClosed,
    #[error("giving up after nickname {0} was also taken")]
    NickRetriesExhausted(String),
    #[error("no join or topic event within {0} seconds")]
    Timeout(u64),
}
