use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

pub const DEFAULT_SERVER: &str = "irc.cyberguerrilla.org";
pub const DEFAULT_PORT: u16 = 6667;
pub const DEFAULT_CHANNEL: &str = "#joinmarket-pit";
pub const DEFAULT_NICKNAME: &str = "DHE";
pub const DEFAULT_LOG_PATH: &str = "chat.log";
pub const DEFAULT_RECONNECT_MIN_SECS: u64 = 60;
pub const DEFAULT_RECONNECT_MAX_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct IrcConfig {
    /// IRC server host
    #[arg(long, default_value = DEFAULT_SERVER)]
    pub server: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Channel to join and log
    #[arg(long, default_value = DEFAULT_CHANNEL)]
    pub channel: String,

    /// Nickname, also used as user and real name
    #[arg(long, default_value = DEFAULT_NICKNAME)]
    pub nickname: String,

    /// Chat log file (appended to)
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    pub log_path: PathBuf,

    /// Connect over plain TCP instead of TLS
    #[arg(long)]
    pub no_tls: bool,

    /// First reconnect delay in seconds, doubled after each failure
    #[arg(long, default_value_t = DEFAULT_RECONNECT_MIN_SECS)]
    pub reconnect_min_secs: u64,

    /// Upper bound on the reconnect delay in seconds
    #[arg(long, default_value_t = DEFAULT_RECONNECT_MAX_SECS)]
    pub reconnect_max_secs: u64,
}

impl Default for IrcConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            port: DEFAULT_PORT,
            channel: DEFAULT_CHANNEL.to_string(),
            nickname: DEFAULT_NICKNAME.to_string(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            no_tls: false,
            reconnect_min_secs: DEFAULT_RECONNECT_MIN_SECS,
            reconnect_max_secs: DEFAULT_RECONNECT_MAX_SECS,
        }
    }
}

impl IrcConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    pub fn use_tls(&self) -> bool {
        !self.no_tls
    }

    pub fn backoff(&self) -> Backoff {
        Backoff::new(
            Duration::from_secs(self.reconnect_min_secs),
            Duration::from_secs(self.reconnect_max_secs),
        )
    }
}

/// Exponential reconnect delay, capped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    min: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
            current: min,
        }
    }

    /// Delay before the next attempt; doubles the one after it.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self
            .current
            .checked_mul(2)
            .map_or(self.max, |d| d.min(self.max));
        delay
    }

    /// Back to the first delay after a session that got through.
    pub fn reset(&mut self) {
        self.current = self.min;
    }
}
