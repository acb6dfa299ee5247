//! Authorization decision point for record operations.
//!
//! [`AccessPolicy`] is the seam: the lifecycle manager only ever sees a
//! policy, so rules can be swapped or tested without any ledger wiring.
//! [`RuleTablePolicy`] is the production policy, evaluated against the
//! identity profiles, care links and rule table kept in contract storage.
//! [`AccessGate`] wraps any policy and records every decision.

use soroban_sdk::{contracttype, log, Address, Env, String, Vec};

use crate::events;
use crate::rbac::{self, IdentityProfile, Role};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Action {
    Create = 1,
    Read = 2,
    Update = 3,
}

/// Which patients a rule reaches.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Scope {
    /// Only the patient the caller identity itself represents.
    Own = 1,
    /// Patients linked to the caller through an unexpired care link.
    UnderCare = 2,
    /// Every patient.
    Any = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRule {
    pub role: Role,
    pub action: Action,
    pub scope: Scope,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DenialReason {
    EmptySubject = 1,
    UnknownIdentity = 2,
    InactiveIdentity = 3,
    NoMatchingRule = 4,
    NotOwnRecord = 5,
    NotUnderCare = 6,
}

impl DenialReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenialReason::EmptySubject => "No patient id was given for the operation",
            DenialReason::UnknownIdentity => "Caller identity is not registered",
            DenialReason::InactiveIdentity => "Caller identity has been deactivated",
            DenialReason::NoMatchingRule => "No access rule grants this action to the caller's role",
            DenialReason::NotOwnRecord => "Patients may only access their own records",
            DenialReason::NotUnderCare => "Patient is not under the caller's care",
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    Permitted,
    Denied(DenialReason),
}

impl Decision {
    pub fn is_permitted(&self) -> bool {
        matches!(self, Decision::Permitted)
    }
}

pub trait AccessPolicy {
    fn authorize(&self, caller: &Address, action: Action, patient_id: &String) -> Decision;
}

/// Evaluates `rules` for a caller whose profile is already known.
///
/// `under_care` is only consulted when a `UnderCare` rule matches, so the
/// storage lookup behind it is skipped for every other path.
pub fn evaluate<F>(
    rules: &Vec<AccessRule>,
    profile: Option<&IdentityProfile>,
    action: Action,
    patient_id: &String,
    under_care: F,
) -> Decision
where
    F: Fn() -> bool,
{
    if patient_id.len() == 0 {
        return Decision::Denied(DenialReason::EmptySubject);
    }
    let profile = match profile {
        Some(p) if p.active => p,
        Some(_) => return Decision::Denied(DenialReason::InactiveIdentity),
        None => return Decision::Denied(DenialReason::UnknownIdentity),
    };

    let mut reason = DenialReason::NoMatchingRule;
    for rule in rules.iter() {
        if rule.role != profile.role || rule.action != action {
            continue;
        }
        match rule.scope {
            Scope::Any => return Decision::Permitted,
            Scope::Own => {
                if profile.subject == *patient_id {
                    return Decision::Permitted;
                }
                reason = DenialReason::NotOwnRecord;
            }
            Scope::UnderCare => {
                if under_care() {
                    return Decision::Permitted;
                }
                reason = DenialReason::NotUnderCare;
            }
        }
    }
    Decision::Denied(reason)
}

/// Policy driven by the identity, care and rule data in contract storage.
pub struct RuleTablePolicy<'a> {
    env: &'a Env,
}

impl<'a> RuleTablePolicy<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl AccessPolicy for RuleTablePolicy<'_> {
    fn authorize(&self, caller: &Address, action: Action, patient_id: &String) -> Decision {
        let profile = rbac::get_identity(self.env, caller);
        evaluate(
            &rbac::get_rules(self.env),
            profile.as_ref(),
            action,
            patient_id,
            || rbac::is_under_care(self.env, caller, patient_id),
        )
    }
}

/// Audited front of a policy. Every decision is logged and published before
/// it is returned; the audit trail never changes the outcome.
pub struct AccessGate<'a, P> {
    env: &'a Env,
    policy: P,
}

impl<'a, P: AccessPolicy> AccessGate<'a, P> {
    pub fn new(env: &'a Env, policy: P) -> Self {
        Self { env, policy }
    }

    pub fn authorize(&self, caller: &Address, action: Action, patient_id: &String) -> Decision {
        let decision = self.policy.authorize(caller, action, patient_id);
        log!(
            self.env,
            "access decision",
            caller.clone(),
            action,
            patient_id.clone(),
            decision.clone()
        );
        events::publish_access_decision(
            self.env,
            caller.clone(),
            action,
            patient_id.clone(),
            decision.clone(),
        );
        decision
    }
}
