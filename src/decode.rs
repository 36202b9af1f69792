//! Contract payload decoders
//!
//! One decoder per supported contract kind, each producing zero or more
//! [`TransferRecord`]s from a contract payload:
//!
//! - [`decode_transfer_contract`]: native TRX transfer
//! - [`decode_transfer_asset_contract`]: legacy TRC10 asset transfer
//! - [`decode_trigger_smart_contract`]: TRC20 transfer, recovered from the
//!   receipt's event logs
//! - [`decode_trigger_smart_contract_local`]: TRC20 transfer, reconstructed
//!   from the invocation call data when no receipt is available
//!
//! The decoders stay general: a smart-contract invocation may emit several
//! Transfer events and all matches are returned. Single-transfer policy is
//! the assembler's business rule, not a decode concern.

use num_bigint::BigUint;
use tracing::{debug, error};

use crate::address::{TronAddress, LOG_OPERAND_LENGTH};
use crate::errors::DecodeError;
use crate::proto::{
    transaction::Contract, unpack_any, TransactionInfo, TransferAssetContract, TransferContract,
    TriggerSmartContract,
};
use crate::types::{TransferRecord, TRON_SYMBOL};

/// Method selector of `transfer(address,uint256)`
pub const TRC20_TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Event signature of `Transfer(address,address,uint256)`
pub const TRC20_TRANSFER_TOPIC: [u8; 32] = [
    0xdd, 0xf2, 0x52, 0xad, 0x1b, 0xe2, 0xc8, 0x9b, 0x69, 0xc2, 0xb0, 0x68, 0xfc, 0x37, 0x8d,
    0xaa, 0x95, 0x2b, 0xa7, 0xf1, 0x63, 0xc4, 0xa1, 0x16, 0x28, 0xf5, 0x5a, 0x4d, 0xf5, 0x23,
    0xb3, 0xef,
];

/// A Transfer event log carries exactly this many topics
pub const TRC20_TRANSFER_TOPIC_LEN: usize = 3;

fn parameter(contract: &Contract) -> Result<&prost_types::Any, DecodeError> {
    contract.parameter.as_ref().ok_or(DecodeError::MissingParameter)
}

/// Decodes a native TRX transfer payload
///
/// Always yields exactly one record on success: token id fixed to the native
/// symbol, no asset name, no contract address.
pub fn decode_transfer_contract(
    contract: &Contract,
    _tx_hash: &str,
) -> Result<Vec<TransferRecord>, DecodeError> {
    let tc: TransferContract = unpack_any(parameter(contract)?, "TransferContract")?;
    let from = TronAddress::from_bytes(&tc.owner_address)?.to_base58();
    let to = TronAddress::from_bytes(&tc.to_address)?.to_base58();
    Ok(vec![TransferRecord {
        token_id: TRON_SYMBOL.to_string(),
        from,
        to,
        amount: tc.amount.to_string(),
        log_index: 0,
        asset_name: None,
        contract_address: None,
    }])
}

/// Decodes a legacy TRC10 asset transfer payload
///
/// The embedded asset name is carried verbatim as the record's token
/// identifier.
pub fn decode_transfer_asset_contract(
    contract: &Contract,
    tx_hash: &str,
) -> Result<Vec<TransferRecord>, DecodeError> {
    let tc: TransferAssetContract = unpack_any(parameter(contract)?, "TransferAssetContract")
        .map_err(|e| {
            error!(tx_hash, %e, "failed to unwrap TransferAssetContract");
            e
        })?;
    let from = TronAddress::from_bytes(&tc.owner_address)?.to_base58();
    let to = TronAddress::from_bytes(&tc.to_address)?.to_base58();
    let asset_name = String::from_utf8_lossy(&tc.asset_name).into_owned();
    Ok(vec![TransferRecord {
        token_id: asset_name.clone(),
        from,
        to,
        amount: tc.amount.to_string(),
        log_index: 0,
        asset_name: Some(asset_name),
        contract_address: None,
    }])
}

/// Decodes a TRC20 transfer by scanning the receipt's event logs
///
/// Only invocations whose call data starts with the `transfer` selector are
/// considered; anything else is simply not a recognized token transfer and
/// yields an empty list, not an error.
///
/// Each log entry must carry exactly [`TRC20_TRANSFER_TOPIC_LEN`] topics,
/// topic 0 must equal the Transfer event signature, and topics 1 and 2 must
/// be 32-byte address operands. Entries failing a shape check are skipped
/// and scanning continues; a transaction may emit unrelated events alongside
/// a transfer.
pub fn decode_trigger_smart_contract(
    contract: &Contract,
    info: &TransactionInfo,
    tx_hash: &str,
) -> Result<Vec<TransferRecord>, DecodeError> {
    let tsc: TriggerSmartContract = unpack_any(parameter(contract)?, "TriggerSmartContract")
        .map_err(|e| {
            error!(tx_hash, %e, "failed to unwrap TriggerSmartContract");
            e
        })?;

    if !tsc.data.starts_with(&TRC20_TRANSFER_SELECTOR) {
        return Ok(Vec::new());
    }

    let contract_addr = TronAddress::from_bytes(&tsc.contract_address)?.to_base58();

    let mut records = Vec::new();
    for (log_index, log) in info.log.iter().enumerate() {
        if log.topics.len() != TRC20_TRANSFER_TOPIC_LEN {
            debug!(tx_hash, log_index, topics = log.topics.len(), "skipping log: topic count");
            continue;
        }
        if log.topics[0].as_slice() != TRC20_TRANSFER_TOPIC {
            continue;
        }
        let (from, to) = match (
            TronAddress::from_log_operand(&log.topics[1]),
            TronAddress::from_log_operand(&log.topics[2]),
        ) {
            (Ok(from), Ok(to)) => (from, to),
            _ => {
                debug!(tx_hash, log_index, "skipping log: operand length");
                continue;
            }
        };
        let amount = BigUint::from_bytes_be(&log.data);
        records.push(TransferRecord {
            token_id: String::new(),
            from: from.to_base58(),
            to: to.to_base58(),
            amount: amount.to_string(),
            log_index,
            asset_name: None,
            contract_address: Some(contract_addr.clone()),
        });
    }

    Ok(records)
}

/// Decodes a TRC20 transfer from the invocation call data alone
///
/// Fallback for when no execution receipt is available: the sender comes
/// from the invocation envelope and the recipient and amount are sliced out
/// of the fixed-layout `transfer(address,uint256)` arguments. Supports
/// exactly one transfer per invocation; use the receipt-scanning variant
/// whenever multiple transfers must be detected.
pub fn decode_trigger_smart_contract_local(
    contract: &Contract,
    tx_hash: &str,
) -> Result<Vec<TransferRecord>, DecodeError> {
    let tsc: TriggerSmartContract = unpack_any(parameter(contract)?, "TriggerSmartContract")
        .map_err(|e| {
            error!(tx_hash, %e, "failed to unwrap TriggerSmartContract");
            e
        })?;

    if !tsc.data.starts_with(&TRC20_TRANSFER_SELECTOR) {
        return Ok(Vec::new());
    }

    let operand_end = TRC20_TRANSFER_SELECTOR.len() + LOG_OPERAND_LENGTH;
    if tsc.data.len() < operand_end {
        return Err(DecodeError::CallDataTooShort(tsc.data.len()));
    }

    let from = TronAddress::from_bytes(&tsc.owner_address)?.to_base58();
    let contract_addr = TronAddress::from_bytes(&tsc.contract_address)?.to_base58();
    let to = TronAddress::from_log_operand(&tsc.data[TRC20_TRANSFER_SELECTOR.len()..operand_end])?
        .to_base58();
    let amount = BigUint::from_bytes_be(&tsc.data[operand_end..]);

    Ok(vec![TransferRecord {
        token_id: String::new(),
        from,
        to,
        amount: amount.to_string(),
        log_index: 0,
        asset_name: None,
        contract_address: Some(contract_addr),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{
        pack_any,
        transaction::{contract::ContractType, Contract},
        transaction_info::Log,
    };

    const TX_HASH: &str = "00deadbeef";

    fn raw_addr(fill: u8) -> Vec<u8> {
        let mut raw = vec![0x41];
        raw.extend_from_slice(&[fill; 20]);
        raw
    }

    fn b58(fill: u8) -> String {
        TronAddress::from_bytes(&raw_addr(fill)).unwrap().to_base58()
    }

    fn operand(fill: u8) -> Vec<u8> {
        let mut op = vec![0u8; 12];
        op.extend_from_slice(&[fill; 20]);
        op
    }

    fn transfer_contract(amount: i64) -> Contract {
        Contract {
            r#type: ContractType::TransferContract as i32,
            parameter: Some(pack_any(
                &TransferContract {
                    owner_address: raw_addr(0x11),
                    to_address: raw_addr(0x22),
                    amount,
                },
                "TransferContract",
            )),
        }
    }

    fn trigger_contract(data: Vec<u8>) -> Contract {
        Contract {
            r#type: ContractType::TriggerSmartContract as i32,
            parameter: Some(pack_any(
                &TriggerSmartContract {
                    owner_address: raw_addr(0x11),
                    contract_address: raw_addr(0x33),
                    data,
                    ..Default::default()
                },
                "TriggerSmartContract",
            )),
        }
    }

    fn transfer_log(from_fill: u8, to_fill: u8, amount: &[u8]) -> Log {
        Log {
            address: vec![0x33; 20],
            topics: vec![
                TRC20_TRANSFER_TOPIC.to_vec(),
                operand(from_fill),
                operand(to_fill),
            ],
            data: amount.to_vec(),
        }
    }

    fn transfer_call_data(to_fill: u8, amount: &[u8]) -> Vec<u8> {
        let mut data = TRC20_TRANSFER_SELECTOR.to_vec();
        data.extend_from_slice(&operand(to_fill));
        data.extend_from_slice(amount);
        data
    }

    #[test]
    fn native_transfer_yields_single_record() {
        let records = decode_transfer_contract(&transfer_contract(42), TX_HASH).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.token_id, TRON_SYMBOL);
        assert_eq!(record.from, b58(0x11));
        assert_eq!(record.to, b58(0x22));
        assert_eq!(record.amount, "42");
        assert_eq!(record.asset_name, None);
        assert_eq!(record.contract_address, None);
    }

    #[test]
    fn native_transfer_rejects_malformed_payload() {
        let contract = Contract {
            r#type: ContractType::TransferContract as i32,
            parameter: Some(prost_types::Any {
                type_url: "type.googleapis.com/protocol.TransferContract".into(),
                value: vec![0xff, 0xff],
            }),
        };
        assert!(decode_transfer_contract(&contract, TX_HASH).is_err());
    }

    #[test]
    fn asset_transfer_carries_asset_name_verbatim() {
        let contract = Contract {
            r#type: ContractType::TransferAssetContract as i32,
            parameter: Some(pack_any(
                &TransferAssetContract {
                    asset_name: b"1002000".to_vec(),
                    owner_address: raw_addr(0x11),
                    to_address: raw_addr(0x22),
                    amount: 9,
                },
                "TransferAssetContract",
            )),
        };
        let records = decode_transfer_asset_contract(&contract, TX_HASH).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].asset_name.as_deref(), Some("1002000"));
        assert_eq!(records[0].token_id, "1002000");
        assert_eq!(records[0].amount, "9");
        assert_eq!(records[0].contract_address, None);
    }

    #[test]
    fn unrecognized_selector_is_empty_not_error() {
        let contract = trigger_contract(vec![0x09, 0x5e, 0xa7, 0xb3, 0x00]);
        let info = TransactionInfo {
            log: vec![transfer_log(0x44, 0x55, &[1])],
            ..Default::default()
        };
        let records = decode_trigger_smart_contract(&contract, &info, TX_HASH).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn matching_log_yields_record_from_topics() {
        let contract = trigger_contract(transfer_call_data(0x55, &[0x01, 0x00]));
        let info = TransactionInfo {
            log: vec![transfer_log(0x44, 0x55, &[0x01, 0x00])],
            ..Default::default()
        };
        let records = decode_trigger_smart_contract(&contract, &info, TX_HASH).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.from, b58(0x44));
        assert_eq!(record.to, b58(0x55));
        assert_eq!(record.amount, "256");
        assert_eq!(record.log_index, 0);
        assert_eq!(record.contract_address, Some(b58(0x33)));
        assert_eq!(record.token_id, "");
    }

    #[test]
    fn wrong_topic_count_is_skipped() {
        let contract = trigger_contract(transfer_call_data(0x55, &[1]));
        let two = Log {
            topics: vec![TRC20_TRANSFER_TOPIC.to_vec(), operand(0x44)],
            ..Default::default()
        };
        let mut four = transfer_log(0x44, 0x55, &[1]);
        four.topics.push(operand(0x66));
        let info = TransactionInfo {
            log: vec![two, four],
            ..Default::default()
        };
        let records = decode_trigger_smart_contract(&contract, &info, TX_HASH).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn only_matching_log_is_kept_with_its_index() {
        let contract = trigger_contract(transfer_call_data(0x55, &[7]));
        let mut wrong_topic = transfer_log(0x44, 0x55, &[7]);
        wrong_topic.topics[0] = vec![0u8; 32];
        let mut short_operand = transfer_log(0x44, 0x55, &[7]);
        short_operand.topics[1] = vec![0x44; 20];
        let info = TransactionInfo {
            log: vec![wrong_topic, transfer_log(0x44, 0x55, &[7]), short_operand],
            ..Default::default()
        };
        let records = decode_trigger_smart_contract(&contract, &info, TX_HASH).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].log_index, 1);
        assert_eq!(records[0].amount, "7");
    }

    #[test]
    fn multiple_matching_logs_are_all_returned() {
        let contract = trigger_contract(transfer_call_data(0x55, &[1]));
        let info = TransactionInfo {
            log: vec![transfer_log(0x44, 0x55, &[1]), transfer_log(0x55, 0x66, &[2])],
            ..Default::default()
        };
        let records = decode_trigger_smart_contract(&contract, &info, TX_HASH).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].log_index, 0);
        assert_eq!(records[1].log_index, 1);
    }

    #[test]
    fn local_variant_slices_recipient_and_amount_from_call_data() {
        let contract = trigger_contract(transfer_call_data(0x55, &[0x03, 0xe8]));
        let records = decode_trigger_smart_contract_local(&contract, TX_HASH).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.from, b58(0x11));
        assert_eq!(record.to, b58(0x55));
        assert_eq!(record.amount, "1000");
        assert_eq!(record.contract_address, Some(b58(0x33)));
    }

    #[test]
    fn local_variant_rejects_truncated_call_data() {
        let contract = trigger_contract(TRC20_TRANSFER_SELECTOR.to_vec());
        let err = decode_trigger_smart_contract_local(&contract, TX_HASH).unwrap_err();
        assert!(matches!(err, DecodeError::CallDataTooShort(4)));
    }

    #[test]
    fn local_variant_ignores_foreign_selector() {
        let contract = trigger_contract(vec![0x09, 0x5e, 0xa7, 0xb3]);
        let records = decode_trigger_smart_contract_local(&contract, TX_HASH).unwrap();
        assert!(records.is_empty());
    }
}
