#![no_std]

extern crate alloc;

pub mod clock;
pub mod codec;
pub mod config;
pub mod errors;
pub mod events;
pub mod gate;
pub mod ledger;
pub mod lifecycle;
pub mod rbac;
pub mod record;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec};

pub use config::{DuplicatePolicy, LifecycleConfig};
pub use errors::{ContractError, ErrorCategory, ErrorSeverity, LifecycleError};
pub use gate::{AccessRule, Action, Decision, DenialReason, Scope};
pub use rbac::{CareLink, IdentityProfile, Role};
pub use record::MedicalRecord;

use gate::{AccessPolicy, RuleTablePolicy};
use ledger::PersistentLedger;
use lifecycle::RecordLifecycle;

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

#[contract]
pub struct MedicalRecordsContract;

impl MedicalRecordsContract {
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            Ok(())
        } else {
            Err(ContractError::NotInitialized)
        }
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        if rbac::is_admin(env, caller) {
            Ok(())
        } else {
            Err(ContractError::Unauthorized)
        }
    }

    /// Care links may be managed by the admin or by the patient they concern.
    fn require_care_authority(
        env: &Env,
        caller: &Address,
        patient_id: &String,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        match rbac::get_identity(env, caller) {
            Some(p) if p.active && p.role == Role::Admin => Ok(()),
            Some(p) if p.active && p.role == Role::Patient && p.subject == *patient_id => Ok(()),
            _ => Err(ContractError::Unauthorized),
        }
    }

    /// The stored admin identity can never be replaced or switched off.
    fn require_not_admin(env: &Env, who: &Address) -> Result<(), ContractError> {
        let admin: Option<Address> = env.storage().instance().get(&ADMIN);
        if admin.as_ref() == Some(who) {
            return Err(ContractError::InvalidInput);
        }
        Ok(())
    }

    fn lifecycle(env: &Env) -> RecordLifecycle<'_, PersistentLedger<'_>, RuleTablePolicy<'_>> {
        RecordLifecycle::new(
            env,
            PersistentLedger::new(env),
            RuleTablePolicy::new(env),
            config::load(env),
        )
    }
}

#[contractimpl]
impl MedicalRecordsContract {
    /// Initialize the contract with an admin address
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);

        let profile = IdentityProfile {
            role: Role::Admin,
            subject: String::from_str(&env, "admin"),
            active: true,
            registered_at: env.ledger().timestamp(),
        };
        rbac::set_identity(&env, &admin, &profile);
        rbac::set_rules(&env, &rbac::default_rules(&env));
        config::store(&env, &LifecycleConfig::default());

        events::publish_initialized(&env, admin);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    // ======================== Records ========================

    /// Create a medical record from its JSON representation.
    ///
    /// Timestamps in the input are ignored; both are set to the ledger time.
    pub fn create_medical_record(
        env: Env,
        caller: Address,
        record_json: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_initialized(&env)?;

        let input = codec::string_to_vec(&record_json);
        let record = Self::lifecycle(&env).create(&caller, &input)?;

        events::publish_record_created(
            &env,
            String::from_str(&env, &record.id),
            String::from_str(&env, &record.patient_id),
            caller,
        );
        Ok(())
    }

    /// Read a medical record by id, returned as JSON.
    pub fn read_medical_record(
        env: Env,
        caller: Address,
        id: String,
    ) -> Result<String, ContractError> {
        caller.require_auth();
        Self::require_initialized(&env)?;

        let id = codec::string_to_vec(&id);
        let id = core::str::from_utf8(&id).map_err(|_| ContractError::InvalidInput)?;
        let record = Self::lifecycle(&env).read(&caller, id)?;

        let encoded = codec::encode(&record).map_err(|_| ContractError::CorruptRecord)?;
        Ok(codec::to_host_string(&env, &encoded))
    }

    /// Replace an existing medical record. The original creation time is kept.
    pub fn update_medical_record(
        env: Env,
        caller: Address,
        record_json: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_initialized(&env)?;

        let input = codec::string_to_vec(&record_json);
        let record = Self::lifecycle(&env).update(&caller, &input)?;

        events::publish_record_updated(
            &env,
            String::from_str(&env, &record.id),
            String::from_str(&env, &record.patient_id),
            caller,
        );
        Ok(())
    }

    // ======================== Access administration ========================

    /// Explains what the access gate would decide, without recording anything.
    pub fn check_access(env: Env, caller: Address, action: Action, patient_id: String) -> Decision {
        RuleTablePolicy::new(&env).authorize(&caller, action, &patient_id)
    }

    /// Registers or replaces the profile of an identity. Admin only. The
    /// admin's own profile cannot be replaced.
    pub fn register_identity(
        env: Env,
        caller: Address,
        who: Address,
        role: Role,
        subject: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if subject.len() == 0 {
            return Err(ContractError::InvalidInput);
        }
        Self::require_not_admin(&env, &who)?;

        let profile = IdentityProfile {
            role,
            subject: subject.clone(),
            active: true,
            registered_at: env.ledger().timestamp(),
        };
        rbac::set_identity(&env, &who, &profile);

        events::publish_identity_registered(&env, who, role, subject);
        Ok(())
    }

    /// Marks an identity inactive. Admin only; the admin itself cannot be deactivated.
    pub fn deactivate_identity(env: Env, caller: Address, who: Address) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        Self::require_not_admin(&env, &who)?;

        let mut profile =
            rbac::get_identity(&env, &who).ok_or(ContractError::IdentityNotFound)?;
        profile.active = false;
        rbac::set_identity(&env, &who, &profile);

        events::publish_identity_deactivated(&env, who);
        Ok(())
    }

    /// Get the profile registered for an identity
    pub fn get_identity(env: Env, who: Address) -> Result<IdentityProfile, ContractError> {
        rbac::get_identity(&env, &who).ok_or(ContractError::IdentityNotFound)
    }

    /// Puts `patient_id` under the care of `provider` until `expires_at`
    /// (0 for no expiry). Callable by the admin or by the patient.
    pub fn grant_care(
        env: Env,
        caller: Address,
        provider: Address,
        patient_id: String,
        expires_at: u64,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_care_authority(&env, &caller, &patient_id)?;

        if patient_id.len() == 0 {
            return Err(ContractError::InvalidInput);
        }
        match rbac::get_identity(&env, &provider) {
            Some(p) if p.role == Role::Doctor || p.role == Role::Hospital => {}
            Some(_) => return Err(ContractError::InvalidRole),
            None => return Err(ContractError::IdentityNotFound),
        }
        let now = env.ledger().timestamp();
        if expires_at != 0 && expires_at <= now {
            return Err(ContractError::InvalidTimestamp);
        }

        let link = CareLink {
            provider: provider.clone(),
            patient_id: patient_id.clone(),
            granted_at: now,
            expires_at,
        };
        rbac::set_care_link(&env, &link);

        events::publish_care_granted(&env, provider, patient_id, expires_at);
        Ok(())
    }

    /// Removes a care link. Same authority as `grant_care`.
    pub fn revoke_care(
        env: Env,
        caller: Address,
        provider: Address,
        patient_id: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_care_authority(&env, &caller, &patient_id)?;

        rbac::remove_care_link(&env, &provider, &patient_id);

        events::publish_care_revoked(&env, provider, patient_id);
        Ok(())
    }

    /// Whether `provider` currently holds an unexpired care link for `patient_id`
    pub fn is_under_care(env: Env, provider: Address, patient_id: String) -> bool {
        rbac::is_under_care(&env, &provider, &patient_id)
    }

    /// Replaces the whole access rule table. Admin only.
    pub fn set_access_rules(
        env: Env,
        caller: Address,
        rules: Vec<AccessRule>,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        rbac::set_rules(&env, &rules);

        events::publish_rules_updated(&env, rules.len());
        Ok(())
    }

    /// Get the access rule table
    pub fn get_access_rules(env: Env) -> Vec<AccessRule> {
        rbac::get_rules(&env)
    }

    // ======================== Configuration ========================

    /// Replaces the lifecycle configuration. Admin only.
    pub fn set_config(env: Env, caller: Address, config: LifecycleConfig) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        config::store(&env, &config);

        events::publish_config_updated(&env, config);
        Ok(())
    }

    /// Get the lifecycle configuration
    pub fn get_config(env: Env) -> LifecycleConfig {
        config::load(&env)
    }
}
