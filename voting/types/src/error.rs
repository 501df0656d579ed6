use crate::InputField;

/// Everything that can go wrong while driving a voting session.
///
/// `InvalidInput` and `InvalidChoice` are produced by local validation and
/// never involve the network. Failures reported by the wallet or the contract
/// are wrapped into `TransactionRejected` (state-changing calls) or
/// `ReadFailure` (read-only calls), carrying the collaborator's raw message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("wallet unavailable: {0}")]
    WalletUnavailable(String),

    #[error("no account found or not allowed to connect")]
    NoAccounts,

    #[error("wallet not connected")]
    NotConnected,

    #[error("invalid `{field}`: {reason}")]
    InvalidInput { field: InputField, reason: String },

    #[error("invalid choice `{0}`: must be 1 or 2")]
    InvalidChoice(u8),

    #[error("voting is not possible while the session is {0}")]
    NotPermitted(&'static str),

    #[error("transaction rejected: {0}")]
    TransactionRejected(String),

    #[error("read failed: {0}")]
    ReadFailure(String),

    #[error("identity storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn invalid_input<R>(field: InputField, reason: R) -> Self
    where
        R: Into<String>,
    {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn transaction_rejected<E>(err: E) -> Self
    where
        E: ToString,
    {
        Self::TransactionRejected(err.to_string())
    }

    pub fn read_failure<E>(err: E) -> Self
    where
        E: ToString,
    {
        Self::ReadFailure(err.to_string())
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: ToString,
    {
        Self::Storage(err.to_string())
    }

    /// Whether the error was raised by local validation, before anything was
    /// sent to the wallet or the contract.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::InvalidChoice(_))
    }
}

pub type Result<T> = core::result::Result<T, Error>;
