//! Slash-command parsing for the chat input line.

/// Prefix marking a command.
pub const COMMAND_PREFIX: char = '/';

/// Parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/select <peer>`: open the conversation with a peer.
    Select {
        /// Peer username.
        peer: String,
    },
    /// `/logout`: end the session.
    Logout,
    /// `/quit`: log out if needed and exit.
    Quit,
    /// Anything not starting with `/`.
    Message {
        /// Text to send.
        content: String,
    },
    /// Unrecognized command.
    Unknown {
        /// Command word as typed.
        input: String,
    },
    /// Recognized command missing its argument.
    MissingArgument {
        /// Command word.
        command: &'static str,
        /// What is missing.
        expected: &'static str,
    },
}

/// Parse one submitted input line.
pub fn parse(text: &str) -> Command {
    let Some(rest) = text.strip_prefix(COMMAND_PREFIX) else {
        return Command::Message { content: text.to_owned() };
    };

    let mut parts = rest.trim().splitn(2, char::is_whitespace);
    let word = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).filter(|arg| !arg.is_empty());

    match word {
        "select" | "s" => match argument {
            Some(peer) => Command::Select { peer: peer.to_owned() },
            None => Command::MissingArgument { command: "select", expected: "<peer>" },
        },
        "logout" => Command::Logout,
        "quit" | "q" => Command::Quit,
        other => Command::Unknown { input: other.to_owned() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(parse("hello there"), Command::Message { content: "hello there".into() });
    }

    #[test]
    fn select_takes_peer() {
        assert_eq!(parse("/select bob"), Command::Select { peer: "bob".into() });
        assert_eq!(parse("/s   carol  "), Command::Select { peer: "carol".into() });
    }

    #[test]
    fn select_without_peer() {
        assert_eq!(parse("/select"), Command::MissingArgument {
            command: "select",
            expected: "<peer>"
        });
    }

    #[test]
    fn session_commands() {
        assert_eq!(parse("/logout"), Command::Logout);
        assert_eq!(parse("/quit"), Command::Quit);
        assert_eq!(parse("/q"), Command::Quit);
    }

    #[test]
    fn unknown_command() {
        assert_eq!(parse("/dance now"), Command::Unknown { input: "dance".into() });
    }
}
