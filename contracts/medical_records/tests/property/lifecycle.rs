//! Property-based tests for the record lifecycle, driven through the contract.
//!
//! Invariants tested:
//! - A successful create stamps `createdAt == updatedAt`, whatever the input claimed
//! - Any sequence of updates leaves `createdAt` at its creation value
//! - Reading an id that was never written is always `RecordNotFound`

use medical_records::{
    codec, ContractError, MedicalRecord, MedicalRecordsContract, MedicalRecordsContractClient,
    Role,
};
use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env, String};

// ── Helpers ───────────────────────────────────────────────────────────────────

const GENESIS: u64 = 1_792_229_400;

fn setup() -> (Env, MedicalRecordsContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(GENESIS);

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    let doctor = Address::generate(&env);
    client.register_identity(&admin, &doctor, &Role::Doctor, &String::from_str(&env, "d1"));
    client.grant_care(&admin, &doctor, &String::from_str(&env, "p1"), &0);

    (env, client, doctor)
}

fn to_host(env: &Env, record: &MedicalRecord) -> String {
    codec::to_host_string(env, &codec::encode(record).unwrap())
}

fn read_back(env: &Env, client: &MedicalRecordsContractClient, caller: &Address, id: &str) -> MedicalRecord {
    let json = client.read_medical_record(caller, &String::from_str(env, id));
    codec::decode(&codec::string_to_vec(&json)).unwrap()
}

fn record(id: &str, diagnosis: &str, claimed_time: &str) -> MedicalRecord {
    MedicalRecord {
        id: id.into(),
        patient_id: "p1".into(),
        diagnosis: diagnosis.into(),
        created_at: claimed_time.into(),
        updated_at: claimed_time.into(),
        ..MedicalRecord::default()
    }
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Client supplied timestamps never reach the ledger on create.
    #[test]
    fn prop_create_stamps_equal_timestamps(
        id in "[a-z0-9]{1,12}",
        diagnosis in "\\PC{0,24}",
        claimed in "\\PC{0,24}",
        offset in 0u64..1_000_000,
    ) {
        let (env, client, doctor) = setup();
        env.ledger().set_timestamp(GENESIS + offset);

        client.create_medical_record(&doctor, &to_host(&env, &record(&id, &diagnosis, &claimed)));

        let stored = read_back(&env, &client, &doctor, &id);
        prop_assert!(!stored.created_at.is_empty());
        prop_assert_eq!(&stored.created_at, &stored.updated_at);
        prop_assert_eq!(stored.diagnosis, diagnosis);
    }

    /// However many updates follow, the creation time never moves and the
    /// update time tracks the ledger clock.
    #[test]
    fn prop_updates_preserve_creation_time(
        gaps in prop::collection::vec(1u64..86_400, 1..6),
    ) {
        let (env, client, doctor) = setup();
        client.create_medical_record(&doctor, &to_host(&env, &record("r1", "Flu", "")));
        let created_at = read_back(&env, &client, &doctor, "r1").created_at;

        let mut now = GENESIS;
        let mut previous = created_at.clone();
        for (i, gap) in gaps.iter().enumerate() {
            now += gap;
            env.ledger().set_timestamp(now);
            let diagnosis = format!("visit {i}");
            client.update_medical_record(
                &doctor,
                &to_host(&env, &record("r1", &diagnosis, "1970-01-01T00:00:00Z")),
            );

            let stored = read_back(&env, &client, &doctor, "r1");
            prop_assert_eq!(&stored.created_at, &created_at);
            prop_assert!(stored.updated_at > previous);
            prop_assert_eq!(stored.diagnosis, diagnosis);
            previous = stored.updated_at;
        }
    }

    /// Ids that were never created always read as a miss, never as empty data.
    #[test]
    fn prop_unwritten_ids_miss(
        written in "[a-z]{1,8}",
        probe in "[a-z]{1,8}",
    ) {
        prop_assume!(written != probe);
        let (env, client, doctor) = setup();
        client.create_medical_record(&doctor, &to_host(&env, &record(&written, "Flu", "")));

        let result = client.try_read_medical_record(&doctor, &String::from_str(&env, &probe));
        prop_assert_eq!(result, Err(Ok(ContractError::RecordNotFound)));
    }
}
