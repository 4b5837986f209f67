//! IRC line protocol: `[:prefix] COMMAND params [:trailing]`.

/// One parsed server line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub prefix: Option<String>,
    pub command: String,
    pub params: Vec<String>,
}

impl Message {
    /// Parse a line without its trailing CR/LF. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut rest = line.trim_start();

        let prefix = if let Some(stripped) = rest.strip_prefix(':') {
            let (p, tail) = stripped.split_once(' ')?;
            rest = tail.trim_start();
            Some(p.to_string())
        } else {
            None
        };

        let (command, mut rest) = match rest.split_once(' ') {
            Some((c, tail)) => (c, tail),
            None => (rest, ""),
        };
        if command.is_empty() {
            return None;
        }

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing.to_string());
                break;
            }
            match rest.split_once(' ') {
                Some((p, tail)) => {
                    params.push(p.to_string());
                    rest = tail;
                }
                None => {
                    params.push(rest.to_string());
                    break;
                }
            }
        }

        Some(Self {
            prefix,
            command: command.to_ascii_uppercase(),
            params,
        })
    }

    /// Nickname part of the prefix (`nick!user@host`).
    pub fn nick(&self) -> Option<&str> {
        let prefix = self.prefix.as_deref()?;
        Some(prefix.split(['!', '@']).next().unwrap_or(prefix))
    }

    pub fn param(&self, i: usize) -> Option<&str> {
        self.params.get(i).map(String::as_str)
    }
}

/// Outgoing commands, rendered with CRLF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Nick(String),
    User { username: String, realname: String },
    Join(String),
    Pong(String),
}

impl Command {
    pub fn to_line(&self) -> String {
        match self {
            Command::Nick(nick) => format!("NICK {nick}\r\n"),
            Command::User { username, realname } => {
                format!("USER {username} 0 * :{realname}\r\n")
            }
            Command::Join(channel) => format!("JOIN {channel}\r\n"),
            Command::Pong(token) => format!("PONG :{token}\r\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_privmsg() {
        let msg = Message::parse(":alice!~a@host.example PRIVMSG #joinmarket-pit :hello there\r\n").unwrap();
        assert_eq!(msg.prefix.as_deref(), Some("alice!~a@host.example"));
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#joinmarket-pit", "hello there"]);
        assert_eq!(msg.nick(), Some("alice"));
    }

    #[test]
    fn test_parse_without_prefix() {
        let msg = Message::parse("PING :irc.example.org").unwrap();
        assert_eq!(msg.prefix, None);
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.param(0), Some("irc.example.org"));
        assert_eq!(msg.nick(), None);
    }

    #[test]
    fn test_parse_numeric_and_middle_params() {
        let msg = Message::parse(":srv 001 DHE :Welcome to the network").unwrap();
        assert_eq!(msg.command, "001");
        assert_eq!(msg.params, vec!["DHE", "Welcome to the network"]);
        assert_eq!(msg.nick(), Some("srv"));
    }

    #[test]
    fn test_trailing_keeps_colons_and_spaces() {
        let msg = Message::parse(":bob PRIVMSG #c ::) see  you").unwrap();
        assert_eq!(msg.param(1), Some(":) see  you"));
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(Message::parse(""), None);
        assert_eq!(Message::parse("\r\n"), None);
        assert_eq!(Message::parse(":onlyprefix"), None);
    }

    #[test]
    fn test_command_lines() {
        assert_eq!(Command::Nick("DHE".into()).to_line(), "NICK DHE\r\n");
        assert_eq!(
            Command::User { username: "DHE".into(), realname: "DHE".into() }.to_line(),
            "USER DHE 0 * :DHE\r\n"
        );
        assert_eq!(Command::Join("#c".into()).to_line(), "JOIN #c\r\n");
        assert_eq!(Command::Pong("x".into()).to_line(), "PONG :x\r\n");
    }
}
