use soroban_sdk::{contracttype, symbol_short, vec, Address, Env, String, Symbol, Vec};

use crate::gate::{AccessRule, Action, Scope};

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

const RULES: Symbol = symbol_short!("RULES");

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Patient = 1,
    Doctor = 2,
    Hospital = 3,
    Admin = 4,
}

/// What the gate knows about a caller identity.
///
/// For a patient, `subject` is the patient id the identity owns. For doctors
/// and hospitals it is their external doctor or hospital id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityProfile {
    pub role: Role,
    pub subject: String,
    pub active: bool,
    pub registered_at: u64,
}

/// A provider treating a patient.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CareLink {
    pub provider: Address,
    pub patient_id: String,
    pub granted_at: u64,
    pub expires_at: u64, // 0 means never expires
}

pub fn identity_key(who: &Address) -> (Symbol, Address) {
    (symbol_short!("IDENT"), who.clone())
}

pub fn care_key(provider: &Address, patient_id: &String) -> (Symbol, Address, String) {
    (symbol_short!("CARE"), provider.clone(), patient_id.clone())
}

fn extend_ttl_identity_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_care_key(env: &Env, key: &(Symbol, Address, String)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ======================== Identities ========================

pub fn set_identity(env: &Env, who: &Address, profile: &IdentityProfile) {
    let key = identity_key(who);
    env.storage().persistent().set(&key, profile);
    extend_ttl_identity_key(env, &key);
}

pub fn get_identity(env: &Env, who: &Address) -> Option<IdentityProfile> {
    env.storage().persistent().get(&identity_key(who))
}

pub fn is_admin(env: &Env, who: &Address) -> bool {
    matches!(
        get_identity(env, who),
        Some(IdentityProfile { role: Role::Admin, active: true, .. })
    )
}

// ======================== Care links ========================

pub fn set_care_link(env: &Env, link: &CareLink) {
    let key = care_key(&link.provider, &link.patient_id);
    env.storage().persistent().set(&key, link);
    extend_ttl_care_key(env, &key);
}

pub fn remove_care_link(env: &Env, provider: &Address, patient_id: &String) {
    env.storage()
        .persistent()
        .remove(&care_key(provider, patient_id));
}

/// True when `provider` holds an unexpired care link for `patient_id`.
pub fn is_under_care(env: &Env, provider: &Address, patient_id: &String) -> bool {
    match env
        .storage()
        .persistent()
        .get::<_, CareLink>(&care_key(provider, patient_id))
    {
        Some(link) => link.expires_at == 0 || link.expires_at > env.ledger().timestamp(),
        None => false,
    }
}

// ======================== Rule table ========================

/// Rule table installed at initialization.
///
/// Patients may read and update their own records. Doctors and hospitals may
/// create, read and update records of patients under their care. Nothing
/// else is granted.
pub fn default_rules(env: &Env) -> Vec<AccessRule> {
    let mut rules = vec![
        env,
        AccessRule {
            role: Role::Patient,
            action: Action::Read,
            scope: Scope::Own,
        },
        AccessRule {
            role: Role::Patient,
            action: Action::Update,
            scope: Scope::Own,
        },
    ];
    for role in [Role::Doctor, Role::Hospital] {
        for action in [Action::Create, Action::Read, Action::Update] {
            rules.push_back(AccessRule {
                role,
                action,
                scope: Scope::UnderCare,
            });
        }
    }
    rules
}

pub fn set_rules(env: &Env, rules: &Vec<AccessRule>) {
    env.storage().instance().set(&RULES, rules);
}

pub fn get_rules(env: &Env) -> Vec<AccessRule> {
    env.storage()
        .instance()
        .get(&RULES)
        .unwrap_or(Vec::new(env))
}
