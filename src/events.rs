use std::fmt;

use log::{debug, info, warn};

use crate::{
    irc_command::IrcCommand,
    session::{Session, SessionState},
    IrcMessage, SessionError,
};

/// The JOIN or TOPIC that ends a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEvent {
    pub kind: String,
    pub source: String,
    pub target: String,
    pub arguments: Vec<String>,
}

impl fmt::Display for ChannelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        writeln!(f, "{}", self.source)?;
        writeln!(f, "{}", self.target)?;
        write!(f, "{:?}", self.arguments)
    }
}

impl Session {
    pub(crate) fn handle_message(
        &mut self,
        message: &IrcMessage,
    ) -> Result<Option<ChannelEvent>, SessionError> {
        match message.command {
            IrcCommand::PING => {
                self.event_ping(message.parameters.first().copied().unwrap_or_default())
            }
            IrcCommand::RPL_WELCOME => self.event_welcome(message),
            IrcCommand::ERR_NICKNAMEINUSE => self.event_nicknameinuse()?,
            IrcCommand::JOIN | IrcCommand::TOPIC => return Ok(self.event_channel(message)),
            IrcCommand::ERROR => {
                warn!("Server error: {}", message.parameters.join(" "))
            }
            _ => {}
        }
        Ok(None)
    }

    fn event_ping(&mut self, ping_token: &str) {
        debug!("PING {}", ping_token);
        self.context.pong(ping_token);
    }

    fn event_welcome(&mut self, message: &IrcMessage) {
        if self.state == SessionState::Joined {
            return;
        }
        debug!("{}", message.parameters.get(1..).unwrap_or_default().join(" "));

        // the server tells us which nick we ended up with
        if let Some(nick) = message.parameters.first() {
            self.nick = (*nick).to_owned();
        }

        let channel = self.config.channel.clone();
        self.context.join(&channel);
        self.state = SessionState::Joined;
    }

    fn event_nicknameinuse(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Joined {
            return Ok(());
        }

        let new_nick = format!("{}_", self.nick);
        if self.nick_retries >= self.config.max_nick_retries {
            return Err(SessionError::NickRetriesExhausted(self.nick.clone()));
        }
        self.nick_retries += 1;

        warn!("Nick already in use, switching to {}", new_nick);
        self.context.nick(&new_nick);
        self.nick = new_nick;
        Ok(())
    }

    fn event_channel(&mut self, message: &IrcMessage) -> Option<ChannelEvent> {
        let (target, arguments) = message.parameters.split_first()?;
        if !target.eq_ignore_ascii_case(&self.config.channel) {
            return None;
        }

        info!(
            "Got {} for {} from {}",
            message.command.event_type(),
            target,
            message.source()
        );

        Some(ChannelEvent {
            kind: message.command.event_type().to_owned(),
            source: message.source().to_owned(),
            target: (*target).to_owned(),
            arguments: arguments.iter().map(|a| (*a).to_owned()).collect(),
        })
    }
}
