//! Tron address codec
//!
//! A raw Tron address is 21 bytes: the fixed `0x41` network prefix followed
//! by a 20-byte account identifier. The human-readable form is base58check:
//! `base58(raw || sha256(sha256(raw))[..4])`.
//!
//! Event logs carry addresses as 32-byte topic operands whose upper 12 bytes
//! are padding; [`TronAddress::from_log_operand`] strips the padding and
//! prefixes the remaining 20 bytes.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::errors::AddressError;

/// Network prefix byte of every mainnet Tron address
pub const TRON_BYTE_PREFIX: u8 = 0x41;

/// Raw address size: prefix byte plus 20-byte account identifier
pub const ADDRESS_LENGTH: usize = 21;

/// Length of a 32-byte event-log topic operand
pub const LOG_OPERAND_LENGTH: usize = 32;

const CHECKSUM_LENGTH: usize = 4;

/// A raw 21-byte Tron address
///
/// Always holds exactly [`ADDRESS_LENGTH`] bytes; construction fails rather
/// than produce a partially valid address. `Display` renders base58check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TronAddress([u8; ADDRESS_LENGTH]);

impl TronAddress {
    /// Builds an address from raw prefixed bytes
    ///
    /// Fails if the slice is not exactly [`ADDRESS_LENGTH`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let raw: [u8; ADDRESS_LENGTH] =
            bytes.try_into().map_err(|_| AddressError::InvalidLength {
                expected: ADDRESS_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(TronAddress(raw))
    }

    /// Builds an address from a bare 20-byte account identifier
    pub fn from_account_id(body: &[u8; 20]) -> Self {
        let mut raw = [0u8; ADDRESS_LENGTH];
        raw[0] = TRON_BYTE_PREFIX;
        raw[1..].copy_from_slice(body);
        TronAddress(raw)
    }

    /// Derives an address from a 32-byte event-log topic operand
    ///
    /// The upper 12 bytes of the operand are padding; the low 20 bytes are
    /// the account identifier, which gets the network prefix prepended.
    pub fn from_log_operand(operand: &[u8]) -> Result<Self, AddressError> {
        if operand.len() != LOG_OPERAND_LENGTH {
            return Err(AddressError::OperandLength(operand.len()));
        }
        let mut body = [0u8; 20];
        body.copy_from_slice(&operand[12..]);
        Ok(Self::from_account_id(&body))
    }

    /// Raw prefixed bytes of the address
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Renders the base58check text form
    pub fn to_base58(&self) -> String {
        let check = double_sha256(&self.0);
        let mut payload = Vec::with_capacity(ADDRESS_LENGTH + CHECKSUM_LENGTH);
        payload.extend_from_slice(&self.0);
        payload.extend_from_slice(&check[..CHECKSUM_LENGTH]);
        bs58::encode(payload).into_string()
    }
}

impl fmt::Display for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for TronAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressError::Base58(e.to_string()))?;
        if decoded.len() != ADDRESS_LENGTH + CHECKSUM_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LENGTH,
                actual: decoded.len().saturating_sub(CHECKSUM_LENGTH),
            });
        }
        let (raw, check) = decoded.split_at(ADDRESS_LENGTH);
        if double_sha256(raw)[..CHECKSUM_LENGTH] != *check {
            return Err(AddressError::Checksum);
        }
        TronAddress::from_bytes(raw)
    }
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}
