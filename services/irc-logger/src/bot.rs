//! Channel logger bot
//!
//! `LoggerBot::handle` turns each server line into a list of [`Action`]s
//! without doing I/O; `LoggerBot::run` drives a connection, executing
//! those actions until the server closes the stream.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::chat_log::{format_entry, ChatLog};
use crate::config::IrcConfig;
use crate::error::IrcError;
use crate::message::{Command, Message};
use crate::tls;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Send(Command),
    /// Console line.
    Print(String),
    /// Chat log line.
    Log(String),
}

pub struct LoggerBot {
    config: IrcConfig,
    log: ChatLog,
    messages_logged: u64,
}

impl LoggerBot {
    pub fn new(config: IrcConfig) -> Self {
        let log = ChatLog::new(config.log_path.clone());
        Self {
            config,
            log,
            messages_logged: 0,
        }
    }

    pub fn messages_logged(&self) -> u64 {
        self.messages_logged
    }

    /// Registration sent right after connecting.
    pub fn greeting(&self) -> Vec<Command> {
        vec![
            Command::Nick(self.config.nickname.clone()),
            Command::User {
                username: self.config.nickname.clone(),
                realname: self.config.nickname.clone(),
            },
        ]
    }

    fn is_self(&self, msg: &Message) -> bool {
        msg.nick()
            .is_some_and(|n| n.eq_ignore_ascii_case(&self.config.nickname))
    }

    fn is_channel(&self, target: Option<&str>) -> bool {
        target.is_some_and(|t| t.eq_ignore_ascii_case(&self.config.channel))
    }

    pub fn handle(&self, msg: &Message) -> Vec<Action> {
        let channel = &self.config.channel;
        match msg.command.as_str() {
            "PING" => {
                let token = msg.param(0).unwrap_or_default().to_string();
                vec![Action::Send(Command::Pong(token))]
            }
            "001" => vec![
                Action::Print("Connected to the server.".to_string()),
                Action::Send(Command::Join(channel.clone())),
                Action::Print(format!("Joining channel {channel}")),
            ],
            "JOIN" if self.is_self(msg) && self.is_channel(msg.param(0)) => {
                vec![Action::Print(format!("Successfully joined channel {channel}"))]
            }
            "PRIVMSG" if self.is_channel(msg.param(0)) => {
                let (Some(nick), Some(text)) = (msg.nick(), msg.param(1)) else {
                    return Vec::new();
                };
                let entry = format_entry(nick, text);
                vec![Action::Print(entry.clone()), Action::Log(entry)]
            }
            _ => Vec::new(),
        }
    }

    async fn send<W: AsyncWrite + Unpin>(writer: &mut W, cmd: &Command) -> Result<(), IrcError> {
        let line = cmd.to_line();
        debug!(line = line.trim_end(), "Sending");
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Run the session over an established stream until EOF.
    pub async fn run<S>(&mut self, stream: S) -> Result<(), IrcError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (read_half, mut writer) = tokio::io::split(stream);
        let mut lines = BufReader::new(read_half).lines();

        for cmd in self.greeting() {
            Self::send(&mut writer, &cmd).await?;
        }

        while let Some(line) = lines.next_line().await? {
            let Some(msg) = Message::parse(&line) else {
                continue;
            };
            for action in self.handle(&msg) {
                match action {
                    Action::Send(cmd) => Self::send(&mut writer, &cmd).await?,
                    Action::Print(text) => println!("{text}"),
                    Action::Log(entry) => {
                        self.log.append(&entry).await?;
                        self.messages_logged += 1;
                    }
                }
            }
        }

        println!("Disconnected from the server.");
        info!(messages = self.messages_logged, "Session closed");
        Ok(())
    }

    /// Connect (TLS unless `--no-tls`) and run the session.
    pub async fn connect_and_run(&mut self) -> Result<(), IrcError> {
        let addr = self.config.address();
        let use_tls = self.config.use_tls();
        info!(%addr, tls = use_tls, channel = %self.config.channel, nick = %self.config.nickname, "Connecting");
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| IrcError::Connect { addr, source })?;
        if use_tls {
            let stream = tls::handshake(stream, &self.config.server).await?;
            self.run(stream).await
        } else {
            self.run(stream).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bot() -> LoggerBot {
        LoggerBot::new(IrcConfig::default())
    }

    fn handle(line: &str) -> Vec<Action> {
        bot().handle(&Message::parse(line).unwrap())
    }

    #[test]
    fn test_ping_pong() {
        assert_eq!(
            handle("PING :abc123"),
            vec![Action::Send(Command::Pong("abc123".into()))]
        );
    }

    #[test]
    fn test_welcome_joins_channel() {
        assert_eq!(
            handle(":srv 001 DHE :Welcome"),
            vec![
                Action::Print("Connected to the server.".into()),
                Action::Send(Command::Join("#joinmarket-pit".into())),
                Action::Print("Joining channel #joinmarket-pit".into()),
            ]
        );
    }

    #[test]
    fn test_own_join_only() {
        assert_eq!(
            handle(":DHE!~d@host JOIN #joinmarket-pit"),
            vec![Action::Print("Successfully joined channel #joinmarket-pit".into())]
        );
        assert!(handle(":other!~o@host JOIN :#joinmarket-pit").is_empty());
    }

    #[test]
    fn test_channel_message_is_logged() {
        let entry = "maker42: !orderbook".to_string();
        assert_eq!(
            handle(":maker42!~m@host PRIVMSG #JoinMarket-Pit :!orderbook"),
            vec![Action::Print(entry.clone()), Action::Log(entry)]
        );
    }

    #[test]
    fn test_private_message_is_ignored() {
        assert!(handle(":maker42!~m@host PRIVMSG DHE :psst").is_empty());
        assert!(handle(":srv NOTICE * :*** Looking up your hostname").is_empty());
    }
}
