//! Tron protocol wire types
//!
//! Hand-maintained `prost` messages for the subset of the canonical
//! `Tron.proto` / `core/contract` schema the decoders touch. Field tags match
//! the chain's schema exactly; messages deliberately omit fields this crate
//! never reads (permissions, resource receipts, votes). Protobuf skips
//! unknown fields, so full on-chain payloads still decode.
//!
//! Contract parameters travel as `google.protobuf.Any`: a type URL plus the
//! encoded payload of the kind-specific message. [`unpack_any`] checks the
//! URL before decoding so a mistagged payload fails loudly instead of
//! decoding to garbage.

use prost::Message;
use prost_types::Any;

use crate::errors::DecodeError;

/// A signed transaction envelope
#[derive(Clone, PartialEq, Message)]
pub struct Transaction {
    /// Payload header: everything the transaction id is computed over
    #[prost(message, optional, tag = "1")]
    pub raw_data: ::core::option::Option<transaction::Raw>,
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub signature: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

pub mod transaction {
    use prost::Message;

    /// The header-data section of a transaction
    ///
    /// The canonical transaction id is `sha256(encode(Raw))`.
    #[derive(Clone, PartialEq, Message)]
    pub struct Raw {
        #[prost(bytes = "vec", tag = "1")]
        pub ref_block_bytes: ::prost::alloc::vec::Vec<u8>,
        #[prost(int64, tag = "3")]
        pub ref_block_num: i64,
        #[prost(bytes = "vec", tag = "4")]
        pub ref_block_hash: ::prost::alloc::vec::Vec<u8>,
        #[prost(int64, tag = "8")]
        pub expiration: i64,
        #[prost(bytes = "vec", tag = "10")]
        pub data: ::prost::alloc::vec::Vec<u8>,
        /// Contract instructions; this crate supports exactly one per
        /// transaction at the assembly layer
        #[prost(message, repeated, tag = "11")]
        pub contract: ::prost::alloc::vec::Vec<Contract>,
        #[prost(int64, tag = "14")]
        pub timestamp: i64,
        #[prost(int64, tag = "18")]
        pub fee_limit: i64,
    }

    /// One contract instruction: a kind tag plus a kind-specific payload
    #[derive(Clone, PartialEq, Message)]
    pub struct Contract {
        #[prost(enumeration = "contract::ContractType", tag = "1")]
        pub r#type: i32,
        #[prost(message, optional, tag = "2")]
        pub parameter: ::core::option::Option<::prost_types::Any>,
    }

    pub mod contract {
        /// Contract kind discriminants from the canonical schema
        ///
        /// Only `TransferContract`, `TransferAssetContract` and
        /// `TriggerSmartContract` are decoded; the rest are listed so known
        /// kinds are distinguishable from wire garbage.
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
        )]
        #[repr(i32)]
        pub enum ContractType {
            AccountCreateContract = 0,
            TransferContract = 1,
            TransferAssetContract = 2,
            VoteAssetContract = 3,
            VoteWitnessContract = 4,
            WitnessCreateContract = 5,
            AssetIssueContract = 6,
            WitnessUpdateContract = 8,
            ParticipateAssetIssueContract = 9,
            AccountUpdateContract = 10,
            FreezeBalanceContract = 11,
            UnfreezeBalanceContract = 12,
            WithdrawBalanceContract = 13,
            UnfreezeAssetContract = 14,
            UpdateAssetContract = 15,
            CreateSmartContract = 30,
            TriggerSmartContract = 31,
        }
    }
}

/// Native TRX transfer payload
#[derive(Clone, PartialEq, Message)]
pub struct TransferContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub to_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "3")]
    pub amount: i64,
}

/// Legacy TRC10 asset transfer payload
#[derive(Clone, PartialEq, Message)]
pub struct TransferAssetContract {
    /// Asset name bytes; doubles as the token identifier
    #[prost(bytes = "vec", tag = "1")]
    pub asset_name: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub owner_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub to_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "4")]
    pub amount: i64,
}

/// Smart-contract invocation payload
#[derive(Clone, PartialEq, Message)]
pub struct TriggerSmartContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub contract_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "3")]
    pub call_value: i64,
    /// ABI-encoded invocation data; first 4 bytes are the method selector
    #[prost(bytes = "vec", tag = "4")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "5")]
    pub call_token_value: i64,
    #[prost(int64, tag = "6")]
    pub token_id: i64,
}

/// Execution receipt of a confirmed transaction
#[derive(Clone, PartialEq, Message)]
pub struct TransactionInfo {
    #[prost(bytes = "vec", tag = "1")]
    pub id: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "2")]
    pub fee: i64,
    #[prost(int64, tag = "3")]
    pub block_number: i64,
    #[prost(int64, tag = "4")]
    pub block_time_stamp: i64,
    /// Ordered event logs emitted during execution
    #[prost(message, repeated, tag = "8")]
    pub log: ::prost::alloc::vec::Vec<transaction_info::Log>,
    #[prost(enumeration = "transaction_info::Code", tag = "9")]
    pub result: i32,
}

pub mod transaction_info {
    use prost::Message;

    /// One emitted event-log entry
    #[derive(Clone, PartialEq, Message)]
    pub struct Log {
        /// Emitting contract, as a bare 20-byte account identifier
        #[prost(bytes = "vec", tag = "1")]
        pub address: ::prost::alloc::vec::Vec<u8>,
        /// Topic sequence; topic 0 identifies the event type
        #[prost(bytes = "vec", repeated, tag = "2")]
        pub topics: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
        /// Opaque non-indexed event data
        #[prost(bytes = "vec", tag = "3")]
        pub data: ::prost::alloc::vec::Vec<u8>,
    }

    /// Final execution result; the receipt carries no pending state
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Code {
        Success = 0,
        Failed = 1,
    }
}

/// On-chain account record
#[derive(Clone, PartialEq, Message)]
pub struct Account {
    #[prost(bytes = "vec", tag = "3")]
    pub address: ::prost::alloc::vec::Vec<u8>,
    /// Native TRX balance in sun
    #[prost(int64, tag = "4")]
    pub balance: i64,
    /// Legacy TRC10 balances keyed by asset name
    #[prost(map = "string, int64", tag = "56")]
    pub asset_v2: ::std::collections::HashMap<::prost::alloc::string::String, i64>,
}

const TYPE_URL_PREFIX: &str = "type.googleapis.com/protocol.";

/// Packs a contract payload into an `Any` with the canonical type URL
pub fn pack_any<M: Message>(msg: &M, type_name: &str) -> Any {
    Any {
        type_url: format!("{TYPE_URL_PREFIX}{type_name}"),
        value: msg.encode_to_vec(),
    }
}

/// Unwraps an `Any` into the expected typed payload
///
/// Fails if the type URL does not name `type_name` or the payload bytes do
/// not decode; a mismatched or malformed payload must never silently produce
/// wrong funds-moved data.
pub fn unpack_any<M: Message + Default>(any: &Any, type_name: &str) -> Result<M, DecodeError> {
    let expected = format!("{TYPE_URL_PREFIX}{type_name}");
    if any.type_url != expected && !any.type_url.ends_with(type_name) {
        return Err(DecodeError::ParameterType {
            expected,
            actual: any.type_url.clone(),
        });
    }
    M::decode(any.value.as_slice()).map_err(|e| DecodeError::Payload {
        type_name: type_name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_round_trips() {
        let tx = Transaction {
            raw_data: Some(transaction::Raw {
                ref_block_bytes: vec![0xab, 0xcd],
                contract: vec![transaction::Contract {
                    r#type: transaction::contract::ContractType::TransferContract as i32,
                    parameter: Some(pack_any(
                        &TransferContract {
                            owner_address: vec![0x41; 21],
                            to_address: vec![0x41; 21],
                            amount: 7,
                        },
                        "TransferContract",
                    )),
                }],
                timestamp: 1_700_000_000_000,
                ..Default::default()
            }),
            signature: vec![vec![1, 2, 3]],
        };
        let decoded = Transaction::decode(tx.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn unpack_rejects_wrong_type_url() {
        let any = pack_any(&TransferContract::default(), "TransferContract");
        let err = unpack_any::<TriggerSmartContract>(&any, "TriggerSmartContract").unwrap_err();
        assert!(matches!(err, DecodeError::ParameterType { .. }));
    }

    #[test]
    fn unpack_rejects_garbage_payload() {
        let any = Any {
            type_url: format!("{TYPE_URL_PREFIX}TransferContract"),
            value: vec![0xff, 0xff, 0xff],
        };
        let err = unpack_any::<TransferContract>(&any, "TransferContract").unwrap_err();
        assert!(matches!(err, DecodeError::Payload { .. }));
    }
}
