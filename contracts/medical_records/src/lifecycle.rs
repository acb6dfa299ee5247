//! Create, read and update of medical records against the ledger port.
//!
//! Every operation is a straight sequence of decode, gate check, ledger read
//! and ledger write. No write happens before the gate has permitted the
//! action, and the manager holds no state between calls.

use soroban_sdk::{log, Address, Env, String};

use crate::clock;
use crate::codec;
use crate::config::{DuplicatePolicy, LifecycleConfig};
use crate::errors::LifecycleError;
use crate::gate::{AccessGate, AccessPolicy, Action, Decision, DenialReason};
use crate::ledger::LedgerPort;
use crate::record::MedicalRecord;

pub struct RecordLifecycle<'a, L, P> {
    env: &'a Env,
    ledger: L,
    gate: AccessGate<'a, P>,
    config: LifecycleConfig,
}

impl<'a, L: LedgerPort, P: AccessPolicy> RecordLifecycle<'a, L, P> {
    pub fn new(env: &'a Env, ledger: L, policy: P, config: LifecycleConfig) -> Self {
        Self {
            env,
            ledger,
            gate: AccessGate::new(env, policy),
            config,
        }
    }

    /// Stores a new record under its own id with both timestamps set to now.
    pub fn create(&self, caller: &Address, input: &[u8]) -> Result<MedicalRecord, LifecycleError> {
        let mut record = Self::decode_input(input)?;

        self.authorize(caller, Action::Create, &record.patient_id)?;

        if let Some(stored) = self.ledger.get(&record.id)? {
            if self.config.duplicate_policy == DuplicatePolicy::Reject {
                return Err(LifecycleError::DuplicateRecord);
            }
            // Overwriting another patient's record moves it, same as an update.
            let existing = codec::decode(&stored).map_err(|_| LifecycleError::CorruptRecord)?;
            if existing.patient_id != record.patient_id {
                self.authorize(caller, Action::Update, &existing.patient_id)?;
            }
        }

        let now = self.now()?;
        record.stamp_created(&now);
        self.ledger.put(&record.id, &codec::encode(&record)?)?;

        log!(self.env, "record created", self.host(&record.id));
        Ok(record)
    }

    pub fn read(&self, caller: &Address, id: &str) -> Result<MedicalRecord, LifecycleError> {
        if id.is_empty() {
            return Err(LifecycleError::InvalidInput);
        }

        let stored = self.ledger.get(id)?.ok_or_else(|| self.missing())?;
        let record = codec::decode(&stored).map_err(|_| LifecycleError::CorruptRecord)?;

        // The subject is only known once the record is loaded. On denial the
        // caller gets the reason and nothing of the record itself.
        self.authorize(caller, Action::Read, &record.patient_id)?;
        Ok(record)
    }

    /// Replaces an existing record, keeping its original creation time.
    pub fn update(&self, caller: &Address, input: &[u8]) -> Result<MedicalRecord, LifecycleError> {
        let mut record = Self::decode_input(input)?;

        let stored = self.ledger.get(&record.id)?.ok_or_else(|| self.missing())?;

        self.authorize(caller, Action::Update, &record.patient_id)?;

        let existing = codec::decode(&stored).map_err(|_| LifecycleError::CorruptRecord)?;
        if existing.patient_id != record.patient_id {
            // Moving a record to another patient needs rights over both.
            self.authorize(caller, Action::Update, &existing.patient_id)?;
        }

        let now = self.now()?;
        record.stamp_updated(&existing.created_at, &now);
        self.ledger.put(&record.id, &codec::encode(&record)?)?;

        log!(self.env, "record updated", self.host(&record.id));
        Ok(record)
    }

    fn decode_input(input: &[u8]) -> Result<MedicalRecord, LifecycleError> {
        let record = codec::decode(input)?;
        if !record.has_required_keys() {
            return Err(LifecycleError::InvalidInput);
        }
        Ok(record)
    }

    fn authorize(
        &self,
        caller: &Address,
        action: Action,
        patient_id: &str,
    ) -> Result<(), LifecycleError> {
        match self.gate.authorize(caller, action, &self.host(patient_id)) {
            Decision::Permitted => Ok(()),
            Decision::Denied(reason) => Err(LifecycleError::Unauthorized(reason)),
        }
    }

    fn missing(&self) -> LifecycleError {
        if self.config.conceal_existence {
            LifecycleError::Unauthorized(DenialReason::NoMatchingRule)
        } else {
            LifecycleError::NotFound
        }
    }

    fn now(&self) -> Result<alloc::string::String, LifecycleError> {
        clock::now(self.env).ok_or(LifecycleError::InvalidTimestamp)
    }

    fn host(&self, value: &str) -> String {
        String::from_str(self.env, value)
    }
}
