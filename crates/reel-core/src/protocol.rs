//! Line protocol spoken over the control socket.
//!
//! One command per line, a verb optionally followed by a single argument:
//! `show`, `hide`, `next`, `prev`, `select 3`, `focus Surveying & Testing`,
//! `spin -4`.

use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/reel.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Verb {
    Show,
    Hide,
    Next,
    #[strum(to_string = "prev", serialize = "previous")]
    Prev,
    Select,
    Focus,
    Spin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Show,
    Hide,
    Next,
    Prev,
    Select(i64),
    Focus(String),
    Spin(i32),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownVerb(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{verb}' takes no argument (got '{arg}')")]
    UnexpectedArgument { verb: &'static str, arg: String },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

fn number<T: FromStr>(arg: &str) -> Result<T, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_owned()))
}

impl FromStr for ControlCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        let (head, arg) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };
        let verb: Verb = head
            .parse()
            .map_err(|_| CommandError::UnknownVerb(head.to_owned()))?;

        match (verb, arg) {
            (Verb::Show, None) => Ok(Self::Show),
            (Verb::Hide, None) => Ok(Self::Hide),
            (Verb::Next, None) => Ok(Self::Next),
            (Verb::Prev, None) => Ok(Self::Prev),
            (Verb::Show | Verb::Hide | Verb::Next | Verb::Prev, Some(arg)) => {
                Err(CommandError::UnexpectedArgument {
                    verb: verb.into(),
                    arg: arg.to_owned(),
                })
            }
            (Verb::Select, Some(arg)) => number(arg).map(Self::Select),
            (Verb::Focus, Some(arg)) => Ok(Self::Focus(arg.to_owned())),
            (Verb::Spin, Some(arg)) => number(arg).map(Self::Spin),
            (Verb::Select | Verb::Focus | Verb::Spin, None) => {
                Err(CommandError::MissingArgument(verb.into()))
            }
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "{}", Verb::Show),
            Self::Hide => write!(f, "{}", Verb::Hide),
            Self::Next => write!(f, "{}", Verb::Next),
            Self::Prev => write!(f, "{}", Verb::Prev),
            Self::Select(index) => write!(f, "{} {index}", Verb::Select),
            Self::Focus(label) => write!(f, "{} {label}", Verb::Focus),
            Self::Spin(count) => write!(f, "{} {count}", Verb::Spin),
        }
    }
}
