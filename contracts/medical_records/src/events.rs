use crate::config::LifecycleConfig;
use crate::gate::{Action, Decision};
use crate::rbac::Role;
use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Audit event for every access gate decision, permitted or denied.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessDecisionEvent {
    pub caller: Address,
    pub action: Action,
    pub patient_id: String,
    pub decision: Decision,
    pub timestamp: u64,
}

/// Event published when a record is written by a create or an update.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordWrittenEvent {
    pub record_id: String,
    pub patient_id: String,
    pub caller: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityRegisteredEvent {
    pub identity: Address,
    pub role: Role,
    pub subject: String,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityDeactivatedEvent {
    pub identity: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CareGrantedEvent {
    pub provider: Address,
    pub patient_id: String,
    pub expires_at: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CareRevokedEvent {
    pub provider: Address,
    pub patient_id: String,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RulesUpdatedEvent {
    pub count: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub config: LifecycleConfig,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes the outcome of an access check.
/// The patient id is the subject of the check; record contents never appear here.
pub fn publish_access_decision(
    env: &Env,
    caller: Address,
    action: Action,
    patient_id: String,
    decision: Decision,
) {
    let topics = (symbol_short!("ACCESS"), caller.clone());
    let data = AccessDecisionEvent {
        caller,
        action,
        patient_id,
        decision,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_record_created(env: &Env, record_id: String, patient_id: String, caller: Address) {
    let topics = (symbol_short!("REC_NEW"), record_id.clone());
    let data = RecordWrittenEvent {
        record_id,
        patient_id,
        caller,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_record_updated(env: &Env, record_id: String, patient_id: String, caller: Address) {
    let topics = (symbol_short!("REC_UPD"), record_id.clone());
    let data = RecordWrittenEvent {
        record_id,
        patient_id,
        caller,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_identity_registered(env: &Env, identity: Address, role: Role, subject: String) {
    let topics = (symbol_short!("ID_REG"), identity.clone());
    let data = IdentityRegisteredEvent {
        identity,
        role,
        subject,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_identity_deactivated(env: &Env, identity: Address) {
    let topics = (symbol_short!("ID_OFF"), identity.clone());
    let data = IdentityDeactivatedEvent {
        identity,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_care_granted(env: &Env, provider: Address, patient_id: String, expires_at: u64) {
    let topics = (symbol_short!("CARE_ADD"), provider.clone());
    let data = CareGrantedEvent {
        provider,
        patient_id,
        expires_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_care_revoked(env: &Env, provider: Address, patient_id: String) {
    let topics = (symbol_short!("CARE_DEL"), provider.clone());
    let data = CareRevokedEvent {
        provider,
        patient_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_rules_updated(env: &Env, count: u32) {
    let topics = (symbol_short!("RULES"),);
    let data = RulesUpdatedEvent {
        count,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_config_updated(env: &Env, config: LifecycleConfig) {
    let topics = (symbol_short!("CFG"),);
    let data = ConfigUpdatedEvent {
        config,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
