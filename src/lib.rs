//! # Tron Transaction Decoder and Wallet Adaptor
//!
//! A library for normalizing raw Tron transactions into chain-agnostic
//! transfer records for multi-chain wallet backends.
//!
//! ## Core Features
//!
//! - **Transfer Extraction**
//!   - Native TRX transfer decoding
//!   - Legacy TRC10 asset transfer decoding
//!   - TRC20 transfers recovered from receipt event logs
//!   - Receipt-free TRC20 fallback from raw call data
//!
//! - **Wallet Surface**
//!   - Native, TRC10 and TRC20 balance resolution with write-through caching
//!   - Transaction lookup normalized to a single-transfer response
//!   - Raw transaction broadcast with locally recomputed transaction id
//!
//! - **Safety**
//!   - Exhaustive contract-kind dispatch; unknown kinds fail loudly
//!   - Malformed payloads error instead of returning wrong funds-moved data
//!   - Structured responses with explicit retryability classification
//!
//! ## Example Usage
//!
//! ```rust
//! use tron_adaptor::{
//!     decode::decode_transfer_contract,
//!     proto::{pack_any, transaction::{contract::ContractType, Contract}, TransferContract},
//! };
//!
//! # fn example() -> Result<(), tron_adaptor::WalletError> {
//! // A native transfer payload as it arrives off the wire
//! let contract = Contract {
//!     r#type: ContractType::TransferContract as i32,
//!     parameter: Some(pack_any(
//!         &TransferContract {
//!             owner_address: vec![0x41; 21],
//!             to_address: vec![0x41; 21],
//!             amount: 1_000_000, // 1 TRX in sun
//!         },
//!         "TransferContract",
//!     )),
//! };
//!
//! let records = decode_transfer_contract(&contract, "txid")?;
//! assert_eq!(records[0].token_id, "trx");
//! assert_eq!(records[0].amount, "1000000");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Module Structure
//!
//! - `address`: Tron base58check address codec
//! - `proto`: Tron protocol wire types (protobuf)
//! - `decode`: per-contract-kind transfer decoders
//! - `balance`: balance resolution over the RPC client
//! - `adaptor`: caller-facing assembly, balance and broadcast surface
//! - `client`: RPC client and balance cache collaborator contracts
//! - `types`: transfer records, requests, responses
//! - `errors`: error types and retryability classification

pub mod adaptor;
pub mod address;
mod balance;
pub mod client;
pub mod decode;
pub mod errors;
pub mod proto;
pub mod types;

// Re-export only the essential types and functions
pub use adaptor::WalletAdaptor;
pub use address::TronAddress;
pub use client::{BalanceCache, TronClient};
pub use errors::{ClientError, DecodeError, WalletError};
pub use types::{
    BalanceRequest, BalanceResponse, SendTxRequest, SendTxResponse, TransferKind, TransferRecord,
    TxHashRequest, TxHashResponse, TxMessage,
};
