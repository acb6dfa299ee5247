use soroban_sdk::contracttype;

use crate::codec::CodecError;
use crate::gate::DenialReason;
use crate::ledger::LedgerError;

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: malformed input or missing required fields
    Validation = 1,
    /// Authorization errors: the access gate denied the operation
    Authorization = 2,
    /// Not found errors: record or identity lookup failures
    NotFound = 3,
    /// State conflict errors: duplicate keys, double initialization
    StateConflict = 4,
    /// Storage errors: the ledger could not be reached or holds bad data
    Storage = 5,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    IdentityNotFound = 4,
    RecordNotFound = 5,
    InvalidInput = 6,
    CorruptRecord = 7,
    LedgerUnavailable = 8,
    DuplicateRecord = 9,
    InvalidTimestamp = 10,
    InvalidRole = 11,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidInput
            | ContractError::InvalidTimestamp
            | ContractError::InvalidRole
            | ContractError::NotInitialized => ErrorCategory::Validation,
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::IdentityNotFound | ContractError::RecordNotFound => {
                ErrorCategory::NotFound
            }
            ContractError::AlreadyInitialized | ContractError::DuplicateRecord => {
                ErrorCategory::StateConflict
            }
            ContractError::CorruptRecord | ContractError::LedgerUnavailable => {
                ErrorCategory::Storage
            }
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::InvalidInput
            | ContractError::InvalidTimestamp
            | ContractError::InvalidRole
            | ContractError::IdentityNotFound
            | ContractError::RecordNotFound
            | ContractError::DuplicateRecord
            | ContractError::AlreadyInitialized => ErrorSeverity::Low,
            ContractError::Unauthorized | ContractError::NotInitialized => ErrorSeverity::Medium,
            ContractError::LedgerUnavailable => ErrorSeverity::High,
            ContractError::CorruptRecord => ErrorSeverity::Critical,
        }
    }

    /// Ledger outages are the only transient failure. The core never retries
    /// them itself; the calling gateway owns the retry policy.
    pub fn retryable(&self) -> bool {
        matches!(self, ContractError::LedgerUnavailable)
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::IdentityNotFound => "Caller identity is not registered",
            ContractError::RecordNotFound => "Record not found",
            ContractError::InvalidInput => "Invalid or incomplete record input",
            ContractError::CorruptRecord => "Stored record could not be decoded",
            ContractError::LedgerUnavailable => "Ledger operation failed",
            ContractError::DuplicateRecord => "Record with this ID already exists",
            ContractError::InvalidTimestamp => "Invalid timestamp value",
            ContractError::InvalidRole => "Invalid role for this operation",
        }
    }

    /// Transport status a gateway should answer with for this error.
    pub fn http_status(&self) -> u32 {
        match self {
            ContractError::InvalidInput
            | ContractError::InvalidTimestamp
            | ContractError::InvalidRole => 400,
            ContractError::Unauthorized => 403,
            ContractError::RecordNotFound | ContractError::IdentityNotFound => 404,
            ContractError::DuplicateRecord | ContractError::AlreadyInitialized => 409,
            ContractError::LedgerUnavailable => 503,
            ContractError::NotInitialized | ContractError::CorruptRecord => 500,
        }
    }
}

/// Failure of a single lifecycle operation, with the context the contract
/// boundary flattens into a [`ContractError`] code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LifecycleError {
    InvalidInput,
    Unauthorized(DenialReason),
    NotFound,
    CorruptRecord,
    DuplicateRecord,
    InvalidTimestamp,
    LedgerUnavailable,
}

impl From<LifecycleError> for ContractError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::InvalidInput => ContractError::InvalidInput,
            LifecycleError::Unauthorized(_) => ContractError::Unauthorized,
            LifecycleError::NotFound => ContractError::RecordNotFound,
            LifecycleError::CorruptRecord => ContractError::CorruptRecord,
            LifecycleError::DuplicateRecord => ContractError::DuplicateRecord,
            LifecycleError::InvalidTimestamp => ContractError::InvalidTimestamp,
            LifecycleError::LedgerUnavailable => ContractError::LedgerUnavailable,
        }
    }
}

impl From<LedgerError> for LifecycleError {
    fn from(_: LedgerError) -> Self {
        LifecycleError::LedgerUnavailable
    }
}

impl From<CodecError> for LifecycleError {
    fn from(_: CodecError) -> Self {
        LifecycleError::InvalidInput
    }
}
