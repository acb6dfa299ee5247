#![allow(dead_code)]

use medical_records::{codec, MedicalRecord, MedicalRecordsContract, MedicalRecordsContractClient, Role};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Bytes, Env, String};

pub const GENESIS: u64 = 1_792_229_400;

pub struct TestContext {
    pub env: Env,
    pub contract_id: Address,
    pub client: MedicalRecordsContractClient<'static>,
    pub admin: Address,
}

/// Creates a mocked Soroban environment, deploys the contract, and initializes admin.
pub fn setup_test_env() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(GENESIS);

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    TestContext {
        env,
        contract_id,
        client,
        admin,
    }
}

/// Registers a fresh identity with the given role and subject.
pub fn create_identity(ctx: &TestContext, role: Role, subject: &str) -> Address {
    let who = Address::generate(&ctx.env);
    ctx.client
        .register_identity(&ctx.admin, &who, &role, &String::from_str(&ctx.env, subject));
    who
}

/// Registers a doctor already caring for `patient_id`.
pub fn create_doctor_for(ctx: &TestContext, doctor_id: &str, patient_id: &str) -> Address {
    let doctor = create_identity(ctx, Role::Doctor, doctor_id);
    ctx.client.grant_care(
        &ctx.admin,
        &doctor,
        &String::from_str(&ctx.env, patient_id),
        &0,
    );
    doctor
}

pub fn record_json(id: &str, patient_id: &str, diagnosis: &str, medications: &[&str]) -> std::string::String {
    let meds = medications
        .iter()
        .map(|m| format!("\"{m}\""))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"{{"id":"{id}","patientId":"{patient_id}","doctorId":"d1","hospitalId":"h1","diagnosis":"{diagnosis}","treatment":"Rest","medications":[{meds}]}}"#
    )
}

pub fn host(ctx: &TestContext, text: &str) -> String {
    String::from_str(&ctx.env, text)
}

pub fn read(ctx: &TestContext, caller: &Address, id: &str) -> MedicalRecord {
    let json = ctx.client.read_medical_record(caller, &host(ctx, id));
    codec::decode(&codec::string_to_vec(&json)).expect("stored record decodes")
}

/// Raw ledger bytes under a record id, straight from contract storage.
pub fn raw_value(ctx: &TestContext, id: &str) -> Option<Bytes> {
    ctx.env.as_contract(&ctx.contract_id, || {
        ctx.env
            .storage()
            .persistent()
            .get(&medical_records::ledger::record_key(&ctx.env, id))
    })
}

pub fn advance(ctx: &TestContext, secs: u64) {
    let now = ctx.env.ledger().timestamp();
    ctx.env.ledger().set_timestamp(now + secs);
}
