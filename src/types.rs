//! Core types for transfer extraction and the wallet-facing surface
//!
//! This module defines the data structures used throughout the adaptor:
//! - Normalized transfer records produced by the contract decoders
//! - Request and response shapes of the wallet-facing operations
//! - Return codes and the structured error envelope

use serde::Serialize;

use crate::errors::WalletError;

/// Chain identifier used in cache keys and request routing
pub const CHAIN_NAME: &str = "trx";

/// Symbol of the native coin
pub const TRON_SYMBOL: &str = "trx";

/// Fixed-point scale of native TRX amounts (1 TRX = 10^6 sun)
///
/// Amounts in this crate are unscaled base-10 strings; applying the scale is
/// a presentation concern of the caller.
pub const TRX_DECIMALS: u8 = 6;

/// Coarse error classification reported to callers
pub const UNSUPPORTED_OPERATION: &str = "unsupported operation";
/// Coarse error detail paired with [`UNSUPPORTED_OPERATION`]
pub const UNSUPPORTED_CHAIN: &str = "unsupported chain";

/// A normalized transfer extracted from one contract instruction
///
/// Only ever constructed with `from`/`to`/`amount` all populated; a decoder
/// that cannot fill every field returns no record at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    /// Native symbol for TRX transfers, empty otherwise
    pub token_id: String,
    /// Sender, base58check encoded
    pub from: String,
    /// Recipient, base58check encoded
    pub to: String,
    /// Non-negative base-10 amount, unscaled
    pub amount: String,
    /// Position within the transaction's event log; meaningful only for
    /// records recovered from a receipt log scan
    pub log_index: usize,
    /// TRC10 asset name, set only for legacy asset transfers
    pub asset_name: Option<String>,
    /// Token contract address, set only for TRC20 transfers
    pub contract_address: Option<String>,
}

/// Whether an operation succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReturnCode {
    Success,
    Error,
}

/// Structured error envelope carried by every response
///
/// Callers never infer failure from absence of a value; the code is always
/// explicit and failures state whether a retry is worthwhile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub code: ReturnCode,
    pub brief: String,
    pub detail: String,
    pub can_retry: bool,
}

impl ErrorInfo {
    /// Success marker
    pub fn ok() -> Self {
        ErrorInfo {
            code: ReturnCode::Success,
            brief: String::new(),
            detail: String::new(),
            can_retry: false,
        }
    }

    /// Maps an adaptor error onto the caller-facing envelope
    ///
    /// Transport failures and symbol mismatches surface as the coarse
    /// retryable "unsupported operation / unsupported chain" pair; decode
    /// failures are terminal and carry their own message as detail.
    pub fn from_error(err: &WalletError) -> Self {
        if err.is_retryable() {
            ErrorInfo {
                code: ReturnCode::Error,
                brief: UNSUPPORTED_OPERATION.to_string(),
                detail: UNSUPPORTED_CHAIN.to_string(),
                can_retry: true,
            }
        } else {
            ErrorInfo {
                code: ReturnCode::Error,
                brief: UNSUPPORTED_OPERATION.to_string(),
                detail: err.to_string(),
                can_retry: false,
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ReturnCode::Success
    }
}

/// Balance query parameters
#[derive(Debug, Clone)]
pub struct BalanceRequest {
    /// Chain symbol; for TRC20 queries this must match the contract's
    /// declared symbol
    pub chain: String,
    /// Coin symbol: the native symbol or a TRC10 asset name
    pub coin: String,
    /// Account address, base58check encoded
    pub address: String,
    /// TRC20 token contract; `None` selects the native/TRC10 path
    pub contract_address: Option<String>,
}

/// Balance query result
#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub error: ErrorInfo,
    /// Base-10 balance, empty on failure
    pub balance: String,
}

/// Transaction lookup parameters
#[derive(Debug, Clone)]
pub struct TxHashRequest {
    /// Transaction id, hex encoded
    pub hash: String,
}

/// Contract kind a normalized transaction was decoded from
///
/// A closed tag: adding a contract kind extends this enum and every match
/// over it, checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferKind {
    /// Native TRX transfer
    Native,
    /// Legacy TRC10 asset transfer
    Asset,
    /// TRC20 trigger-smart-contract transfer
    Trc20,
}

/// Normalized view of one confirmed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxMessage {
    pub hash: String,
    /// Empty when the transaction carried no recognized transfer
    pub from: String,
    /// Empty when the transaction carried no recognized transfer
    pub to: String,
    /// Fee charged, base-10 sun
    pub fee: String,
    /// Receipt outcome; the receipt is final, there is no pending state
    pub status: bool,
    /// Transferred amount, base-10, unscaled
    pub value: String,
    /// Which contract kind the transaction carried
    pub kind: TransferKind,
    /// Block height the transaction landed in
    pub height: String,
    /// TRC20 token contract, when the transfer was contract mediated
    pub contract_address: Option<String>,
    /// TRC10 asset name, when the transfer was a legacy asset transfer
    pub asset_name: Option<String>,
}

/// Transaction lookup result
#[derive(Debug, Clone, Serialize)]
pub struct TxHashResponse {
    pub error: ErrorInfo,
    pub tx: Option<TxMessage>,
}

/// Broadcast parameters: a fully signed, serialized transaction envelope
#[derive(Debug, Clone)]
pub struct SendTxRequest {
    pub raw_tx: Vec<u8>,
}

/// Broadcast result
#[derive(Debug, Clone, Serialize)]
pub struct SendTxResponse {
    pub error: ErrorInfo,
    /// Canonical transaction id, hex encoded; computed locally from the
    /// re-serialized header, never taken from the caller
    pub tx_hash: String,
}

/// Nonce query result; Tron is account based with no nonce concept, the
/// value is always `"0"`
#[derive(Debug, Clone, Serialize)]
pub struct NonceResponse {
    pub error: ErrorInfo,
    pub nonce: String,
}
