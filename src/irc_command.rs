#[allow(non_camel_case_types)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IrcCommand {
    RPL_WELCOME,
    ERR_NICKNAMEINUSE,
    PING,
    JOIN,
    TOPIC,
    NICK,
    QUIT,
    ERROR,
    UNKNOWN(String),
}

impl From<&str> for IrcCommand {
    fn from(command_str: &str) -> Self {
        match command_str.to_ascii_uppercase().as_str() {
            "001" => Self::RPL_WELCOME,
            "433" => Self::ERR_NICKNAMEINUSE,
            "PING" => Self::PING,
            "JOIN" => Self::JOIN,
            "TOPIC" => Self::TOPIC,
            "NICK" => Self::NICK,
            "QUIT" => Self::QUIT,
            "ERROR" => Self::ERROR,
            _ => Self::UNKNOWN(command_str.to_owned()),
        }
    }
}

impl IrcCommand {
    /// Lowercase event name, as printed for channel events.
    pub fn event_type(&self) -> &str {
        match self {
            Self::RPL_WELCOME => "welcome",
            Self::ERR_NICKNAMEINUSE => "nicknameinuse",
            Self::PING => "ping",
            Self::JOIN => "join",
            Self::TOPIC => "topic",
            Self::NICK => "nick",
            Self::QUIT => "quit",
            Self::ERROR => "error",
            Self::UNKNOWN(raw) => raw,
        }
    }
}
