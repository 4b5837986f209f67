use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS handshake with {host} failed: {source}")]
    Handshake {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS setup: {0}")]
    Tls(String),

    #[error("chat log {path}: {source}")]
    ChatLog {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl IrcError {
    /// Local failures that another connection attempt cannot fix.
    pub fn is_fatal(&self) -> bool {
        matches!(self, IrcError::Tls(_) | IrcError::ChatLog { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_network_errors_are_retried() {
        let refused = IrcError::Connect {
            addr: "irc.example:6667".into(),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        };
        assert!(!refused.is_fatal());
        assert!(!IrcError::Io(io::Error::from(io::ErrorKind::UnexpectedEof)).is_fatal());
        assert!(IrcError::Tls("no roots".into()).is_fatal());
        assert!(IrcError::ChatLog {
            path: "chat.log".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        }
        .is_fatal());
    }
}
