//! JSON wire format for [`MedicalRecord`].
//!
//! The same encoding is used for caller input and for the value stored under
//! the record key, so a ledger value can be handed back to callers verbatim.

use alloc::string::ToString;
use alloc::vec::Vec;
use soroban_sdk::{Bytes, Env, String};

use crate::record::MedicalRecord;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CodecError {
    /// Input is not a JSON object of the expected shape.
    Malformed,
    /// `id` or `patientId` is absent.
    MissingField,
    /// Serialization failed.
    Encode,
}

pub fn encode(record: &MedicalRecord) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(record).map_err(|_| CodecError::Encode)
}

pub fn decode(bytes: &[u8]) -> Result<MedicalRecord, CodecError> {
    serde_json::from_slice(bytes).map_err(|err| {
        // serde reports absent required fields as data errors
        if err.is_data() && err.to_string().starts_with("missing field") {
            CodecError::MissingField
        } else {
            CodecError::Malformed
        }
    })
}

/// Copies a host string into guest memory.
pub fn string_to_vec(value: &String) -> Vec<u8> {
    let mut buf = alloc::vec![0u8; value.len() as usize];
    value.copy_into_slice(&mut buf);
    buf
}

/// Copies host bytes into guest memory.
pub fn bytes_to_vec(value: &Bytes) -> Vec<u8> {
    let mut buf = alloc::vec![0u8; value.len() as usize];
    value.copy_into_slice(&mut buf);
    buf
}

/// Renders an encoded record as a host string for the contract surface.
pub fn to_host_string(env: &Env, encoded: &[u8]) -> String {
    String::from_bytes(env, encoded)
}
