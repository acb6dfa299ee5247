use alloc::vec::Vec;
use soroban_sdk::{symbol_short, Bytes, Env, String, Symbol};

use crate::codec;

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

const RECORD: Symbol = symbol_short!("MED_REC");

/// The port could not complete the call. Surfaced to callers verbatim,
/// never retried here.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LedgerError {
    Unavailable,
}

/// Single-key access to the shared ledger. Each call is atomic on its own;
/// nothing spans more than one key.
pub trait LedgerPort {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;
    fn put(&self, key: &str, value: &[u8]) -> Result<(), LedgerError>;
}

/// Storage key a record id maps to.
pub fn record_key(env: &Env, id: &str) -> (Symbol, String) {
    (RECORD, String::from_str(env, id))
}

/// Ledger port backed by the contract's persistent storage.
pub struct PersistentLedger<'a> {
    env: &'a Env,
}

impl<'a> PersistentLedger<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl LedgerPort for PersistentLedger<'_> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let value: Option<Bytes> = self
            .env
            .storage()
            .persistent()
            .get(&record_key(self.env, key));
        Ok(value.map(|bytes| codec::bytes_to_vec(&bytes)))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        let key = record_key(self.env, key);
        let storage = self.env.storage().persistent();
        storage.set(&key, &Bytes::from_slice(self.env, value));
        storage.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        Ok(())
    }
}
