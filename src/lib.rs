pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod irc_command;
pub mod session;

pub use cli::DoorState;
pub use config::SessionConfig;
pub use error::SessionError;
pub use events::ChannelEvent;
pub use session::{Session, SessionState};

use irc_command::IrcCommand;

pub(crate) const MAX_MSG_LEN: usize = 512;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IrcPrefix<'a> {
    pub raw: &'a str,
    pub nick: &'a str,
    pub user: Option<&'a str>,
    pub host: Option<&'a str>,
}

impl<'a> From<&'a str> for IrcPrefix<'a> {
    fn from(prefix_str: &'a str) -> Self {
        let raw = prefix_str.strip_prefix(':').unwrap_or(prefix_str);

        let Some((nick, rest)) = raw.split_once('!') else {
            // we only have a nick (or a server name)
            return Self {
                raw,
                nick: raw,
                ..Default::default()
            };
        };

        match rest.split_once('@') {
            Some((user, host)) => Self {
                raw,
                nick,
                user: Some(user),
                host: Some(host),
            },
            // we don't have an host
            None => Self {
                raw,
                nick,
                user: Some(rest),
                host: None,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IrcMessage<'a> {
    pub prefix: Option<IrcPrefix<'a>>,
    pub command: IrcCommand,
    pub parameters: Vec<&'a str>,
}

impl<'a> IrcMessage<'a> {
    /// Parses one line without its CRLF. Returns `None` for empty or
    /// command-less lines.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut rest = line.trim_start();

        // message tags are of no use to us
        if rest.starts_with('@') {
            rest = rest.split_once(' ')?.1.trim_start();
        }

        let mut prefix = None;
        if rest.starts_with(':') {
            let (p, tail) = rest.split_once(' ')?;
            prefix = Some(p.into());
            rest = tail.trim_start();
        }

        let (command, mut rest) = match rest.split_once(' ') {
            Some((command, tail)) => (command, tail),
            None => (rest, ""),
        };
        if command.is_empty() {
            return None;
        }

        let mut parameters = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                parameters.push(trailing);
                break;
            }
            match rest.split_once(' ') {
                Some((param, tail)) => {
                    parameters.push(param);
                    rest = tail;
                }
                None => {
                    parameters.push(rest);
                    break;
                }
            }
        }

        Some(Self {
            prefix,
            command: command.into(),
            parameters,
        })
    }

    pub fn source(&self) -> &'a str {
        self.prefix.as_ref().map(|p| p.raw).unwrap_or_default()
    }
}
