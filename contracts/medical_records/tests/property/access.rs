//! Property-based tests for the access gate.
//!
//! Invariants tested:
//! - A denied create, read or update never changes the stored bytes
//! - `check_access` and the lifecycle entry points always agree

use medical_records::{
    ledger, Action, ContractError, Decision, MedicalRecordsContract, MedicalRecordsContractClient,
    Role,
};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Bytes, Env, String};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Who is knocking on the record of patient `p1`.
#[derive(Clone, Copy, Debug, Arbitrary)]
enum Caller {
    Unregistered,
    OwningPatient,
    OtherPatient,
    CaringDoctor,
    UnrelatedDoctor,
    DeactivatedDoctor,
    Admin,
}

#[derive(Clone, Copy, Debug, Arbitrary)]
enum Attempt {
    Create,
    Read,
    Update,
}

impl Attempt {
    fn action(self) -> Action {
        match self {
            Attempt::Create => Action::Create,
            Attempt::Read => Action::Read,
            Attempt::Update => Action::Update,
        }
    }
}

const R1: &str = r#"{"id":"r1","patientId":"p1","diagnosis":"Flu","medications":["A"]}"#;
const R1_TAMPERED: &str = r#"{"id":"r1","patientId":"p1","diagnosis":"Tampered"}"#;

struct World {
    env: Env,
    contract_id: Address,
    client: MedicalRecordsContractClient<'static>,
    admin: Address,
    doctor: Address,
}

fn setup() -> World {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    let doctor = Address::generate(&env);
    client.register_identity(&admin, &doctor, &Role::Doctor, &String::from_str(&env, "d1"));
    client.grant_care(&admin, &doctor, &String::from_str(&env, "p1"), &0);
    client.create_medical_record(&doctor, &String::from_str(&env, R1));

    World {
        env,
        contract_id,
        client,
        admin,
        doctor,
    }
}

fn register(world: &World, role: Role, subject: &str) -> Address {
    let who = Address::generate(&world.env);
    world
        .client
        .register_identity(&world.admin, &who, &role, &String::from_str(&world.env, subject));
    who
}

fn caller_for(world: &World, kind: Caller) -> Address {
    match kind {
        Caller::Unregistered => Address::generate(&world.env),
        Caller::OwningPatient => register(world, Role::Patient, "p1"),
        Caller::OtherPatient => register(world, Role::Patient, "p2"),
        Caller::CaringDoctor => world.doctor.clone(),
        Caller::UnrelatedDoctor => register(world, Role::Doctor, "d2"),
        Caller::DeactivatedDoctor => {
            let who = register(world, Role::Doctor, "d3");
            world
                .client
                .grant_care(&world.admin, &who, &String::from_str(&world.env, "p1"), &0);
            world.client.deactivate_identity(&world.admin, &who);
            who
        }
        Caller::Admin => world.admin.clone(),
    }
}

fn stored(world: &World) -> Option<Bytes> {
    world.env.as_contract(&world.contract_id, || {
        world
            .env
            .storage()
            .persistent()
            .get(&ledger::record_key(&world.env, "r1"))
    })
}

/// Runs the attempt and returns the contract error, if any.
fn attempt(world: &World, caller: &Address, what: Attempt) -> Option<ContractError> {
    let env = &world.env;
    let outcome = match what {
        Attempt::Create => world
            .client
            .try_create_medical_record(caller, &String::from_str(env, R1_TAMPERED))
            .map(|_| ()),
        Attempt::Read => world
            .client
            .try_read_medical_record(caller, &String::from_str(env, "r1"))
            .map(|_| ()),
        Attempt::Update => world
            .client
            .try_update_medical_record(caller, &String::from_str(env, R1_TAMPERED))
            .map(|_| ()),
    };
    match outcome {
        Ok(()) => None,
        Err(Ok(err)) => Some(err),
        Err(Err(err)) => panic!("host failure: {err:?}"),
    }
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A denied operation leaves the stored value byte-for-byte unchanged.
    #[test]
    fn prop_denial_never_writes(kind in any::<Caller>(), what in any::<Attempt>()) {
        let world = setup();
        let caller = caller_for(&world, kind);
        let before = stored(&world).unwrap();

        if let Some(err) = attempt(&world, &caller, what) {
            prop_assert_eq!(err, ContractError::Unauthorized);
            prop_assert_eq!(stored(&world).unwrap(), before);
        }
    }

    /// The explain endpoint predicts exactly what the lifecycle will do.
    #[test]
    fn prop_check_access_agrees_with_lifecycle(kind in any::<Caller>(), what in any::<Attempt>()) {
        let world = setup();
        let caller = caller_for(&world, kind);

        let decision = world.client.check_access(
            &caller,
            &what.action(),
            &String::from_str(&world.env, "p1"),
        );
        let outcome = attempt(&world, &caller, what);

        match decision {
            Decision::Permitted => prop_assert_eq!(outcome, None),
            Decision::Denied(_) => prop_assert_eq!(outcome, Some(ContractError::Unauthorized)),
        }
    }
}
