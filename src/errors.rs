//! Error types for Tron transaction decoding and wallet operations
//!
//! This module defines a layered error handling system that covers:
//! - Address encoding/decoding errors
//! - Contract payload decode errors
//! - RPC client transport errors
//! - Error classification (retryable vs. terminal) and propagation

use thiserror::Error;

/// Top-level error type for the wallet adaptor
///
/// Encompasses all possible errors that can occur while resolving balances,
/// assembling transactions, or broadcasting, providing a unified error
/// handling interface for users.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Errors from the underlying Tron node RPC client
    #[error("rpc client error: {0}")]
    Client(#[from] ClientError),

    /// Errors decoding a contract payload or transaction envelope
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A TRC20 contract declared a symbol other than the one requested
    ///
    /// Defends against resolving a balance for the wrong token contract.
    #[error("contract symbol {actual} does not match requested symbol {expected}")]
    SymbolMismatch { expected: String, actual: String },
}

impl WalletError {
    /// Whether the caller may reasonably retry the failed operation
    ///
    /// Transport failures and symbol mismatches are classified retryable
    /// (the node set may heal, or another endpoint may answer); decode
    /// failures are terminal because the bytes will not change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WalletError::Client(_) | WalletError::SymbolMismatch { .. })
    }
}

impl From<AddressError> for WalletError {
    fn from(err: AddressError) -> Self {
        WalletError::Decode(DecodeError::Address(err))
    }
}

/// Address codec errors
///
/// Tron addresses are 21 raw bytes (a fixed network prefix byte followed by
/// a 20-byte account identifier) rendered as base58check text.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Raw address bytes are not exactly the fixed address size
    #[error("invalid address length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A 32-byte event-log operand had an unexpected length
    #[error("invalid log operand length: expected 32 bytes, got {0}")]
    OperandLength(usize),

    /// Text form is not valid base58
    #[error("invalid base58 address: {0}")]
    Base58(String),

    /// Base58check checksum did not verify
    #[error("address checksum mismatch")]
    Checksum,
}

/// Contract payload and transaction envelope decode errors
///
/// These are terminal: a payload that does not unwrap to the expected typed
/// structure will never do so on retry.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Transaction envelope carried no raw_data section
    #[error("transaction has no raw_data")]
    MissingRawData,

    /// Contract instruction carried no parameter payload
    #[error("contract has no parameter payload")]
    MissingParameter,

    /// Parameter payload was typed as something other than expected
    #[error("unexpected parameter type: expected {expected}, got {actual}")]
    ParameterType { expected: String, actual: String },

    /// Parameter payload bytes failed protobuf decoding
    #[error("failed to decode {type_name} payload: {reason}")]
    Payload { type_name: String, reason: String },

    /// Raw transaction bytes failed protobuf decoding
    #[error("failed to decode transaction envelope: {0}")]
    Envelope(String),

    /// Contract kind is not one of the supported transfer kinds
    #[error("unsupported contract type {0}")]
    UnsupportedContractType(i32),

    /// Transaction carried zero or multiple contract instructions
    #[error("expected exactly one contract instruction, found {0}")]
    ContractCount(usize),

    /// Decoding yielded more transfers than the single-transfer output
    /// contract of the assembler allows
    #[error("transaction resolved to {0} transfers, expected at most one")]
    TooManyTransfers(usize),

    /// TRC20 transfer call data is shorter than the fixed argument layout
    #[error("transfer call data truncated: {0} bytes")]
    CallDataTooShort(usize),

    /// Address bytes inside a payload failed conversion
    #[error("address error: {0}")]
    Address(#[from] AddressError),
}

/// Tron node RPC client errors
///
/// The adaptor treats the client as an opaque capability; any failure it
/// reports is classified uniformly as a retryable transport/chain failure.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure reaching the node
    #[error("transport failure: {0}")]
    Transport(String),

    /// The node answered but rejected the request
    #[error("node rejected request: {0}")]
    Rejected(String),
}
