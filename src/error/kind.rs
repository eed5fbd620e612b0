//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// This enum provides a stable interface for matching on failures, independent
/// of the transport that produced them.
///
/// ## Taxonomy
///
/// | ErrorKind         | Raised            | Transport failure | Retriable |
/// |-------------------|-------------------|-------------------|-----------|
/// | `Configuration`   | construction time | No                | No        |
/// | `InvalidArgument` | planning time     | No                | No        |
/// | `Timeout`         | execution time    | Yes               | Yes       |
/// | `Connection`      | execution time    | Yes               | Yes       |
/// | `InvalidResponse` | execution time    | Yes               | No        |
/// | `Transport`       | execution time    | Yes               | No        |
///
/// Non-2xx HTTP responses are not errors at this layer. They come back as
/// ordinary data and the caller decides what a 404 or a 409 means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Configuration error (missing token, invalid URL, non-positive timeout).
    ///
    /// Raised synchronously when the configuration is built.
    ///
    /// **Not retriable.** Fix the configuration.
    #[error("configuration error")]
    Configuration,

    /// A request could not be planned from the supplied arguments.
    ///
    /// **Not retriable.** Fix the input.
    #[error("invalid argument")]
    InvalidArgument,

    /// The per-endpoint timeout elapsed before the exchange completed.
    ///
    /// A distinguished subset of the transport failures, so that callers can
    /// apply timeout-specific handling.
    ///
    /// **Retriable.** Retry with backoff, or fall back.
    #[error("timeout")]
    Timeout,

    /// Connection error (refused, DNS, TLS handshake, network unreachable).
    ///
    /// **Retriable.** May indicate transient network issues.
    #[error("connection error")]
    Connection,

    /// The response could not be read or parsed.
    ///
    /// Covers malformed JSON bodies and connections closed mid-body.
    ///
    /// **Not retriable** without a server-side fix.
    #[error("invalid response")]
    InvalidResponse,

    /// Transport layer error that fits no more specific category.
    #[error("transport error")]
    Transport,
}

impl ErrorKind {
    /// Returns `true` if this kind was raised by the network exchange.
    ///
    /// `Timeout`, `Connection`, `InvalidResponse` and `Transport` all share a
    /// single propagation path out of the dispatch core.
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorKind::Timeout
                | ErrorKind::Connection
                | ErrorKind::InvalidResponse
                | ErrorKind::Transport
        )
    }

    /// Returns `true` if the per-endpoint timeout elapsed.
    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ErrorKind::Timeout)
    }

    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// The dispatch core never retries by itself; this is a hint for callers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use permit::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_retriable());
    /// assert!(!ErrorKind::Configuration.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(self, ErrorKind::Timeout | ErrorKind::Connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_kinds() {
        assert!(ErrorKind::Timeout.is_transport());
        assert!(ErrorKind::Connection.is_transport());
        assert!(ErrorKind::InvalidResponse.is_transport());
        assert!(ErrorKind::Transport.is_transport());
        assert!(!ErrorKind::Configuration.is_transport());
        assert!(!ErrorKind::InvalidArgument.is_transport());
    }

    #[test]
    fn test_timeout_is_distinguished() {
        assert!(ErrorKind::Timeout.is_timeout());
        assert!(!ErrorKind::Connection.is_timeout());
        assert!(!ErrorKind::Transport.is_timeout());
    }

    #[test]
    fn test_retriable() {
        assert!(ErrorKind::Timeout.is_retriable());
        assert!(ErrorKind::Connection.is_retriable());
        assert!(!ErrorKind::InvalidResponse.is_retriable());
        assert!(!ErrorKind::Configuration.is_retriable());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::Configuration.to_string(), "configuration error");
        assert_eq!(ErrorKind::Timeout.to_string(), "timeout");
    }
}
