use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

const CONFIG: Symbol = symbol_short!("LC_CFG");

/// What a create does when the record id is already taken.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DuplicatePolicy {
    /// No existence check; the new value replaces the stored one.
    Overwrite = 1,
    /// Fail with `DuplicateRecord` and leave the stored value untouched.
    Reject = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LifecycleConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Report a missing record on read and update as an authorization
    /// failure, so unauthorized callers cannot probe which ids exist.
    pub conceal_existence: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Overwrite,
            conceal_existence: false,
        }
    }
}

pub fn load(env: &Env) -> LifecycleConfig {
    env.storage()
        .instance()
        .get(&CONFIG)
        .unwrap_or_default()
}

pub fn store(env: &Env, config: &LifecycleConfig) {
    env.storage().instance().set(&CONFIG, config);
}
