use crate::model::Privilege;
use crate::validation::ValidationError;
use thiserror::Error;

/// Why a command was refused.
///
/// Every variant is reported to the user the same way; the distinction only
/// exists for logging and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("wrong number of arguments")]
    ArgumentCount,

    #[error("invalid field: {0}")]
    InvalidField(#[from] ValidationError),

    #[error("malformed option: {0}")]
    MalformedOption(String),

    #[error("option given twice: {0}")]
    RepeatedOption(String),

    #[error("requires privilege {required}, current is {current}")]
    InsufficientPrivilege {
        required: Privilege,
        current: Privilege,
    },

    #[error("no active session")]
    EmptySession,

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("user already exists: {0}")]
    DuplicateUser(String),

    #[error("password mismatch")]
    WrongPassword,

    #[error("cannot grant privilege {requested} from privilege {current}")]
    PrivilegeEscalation {
        requested: Privilege,
        current: Privilege,
    },

    #[error("user is logged in: {0}")]
    UserLoggedIn(String),

    #[error("unknown book: {0}")]
    UnknownBook(String),

    #[error("ISBN already exists: {0}")]
    DuplicateIsbn(String),

    #[error("ISBN unchanged: {0}")]
    SameIsbn(String),

    #[error("no book selected")]
    NoSelection,

    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u64, available: u64 },

    #[error("total cost must be positive")]
    NonPositiveTotal,

    #[error("ledger has {available} entries, {requested} requested")]
    LedgerTooShort { requested: usize, available: usize },

    #[error("arithmetic overflow")]
    Overflow,
}

#[derive(Error, Debug)]
pub enum BookstoreError {
    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record in {file}: {reason}")]
    CorruptRecord { file: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl BookstoreError {
    /// Rejections are recoverable; everything else ends the session.
    pub fn is_rejection(&self) -> bool {
        matches!(self, BookstoreError::Rejected(_))
    }
}

impl From<ValidationError> for BookstoreError {
    fn from(err: ValidationError) -> Self {
        BookstoreError::Rejected(Rejection::InvalidField(err))
    }
}

pub type Result<T> = std::result::Result<T, BookstoreError>;
