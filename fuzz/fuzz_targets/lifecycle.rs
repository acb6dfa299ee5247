#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use medical_records::{
    codec, ContractError, MedicalRecordsContract, MedicalRecordsContractClient, Role,
};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env, String};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Register { role: u8, subject: u8 },
    GrantCare { provider: u8, patient: u8 },
    Create { caller: u8, id: u8, patient: u8, body: std::string::String },
    Read { caller: u8, id: u8 },
    Update { caller: u8, id: u8, patient: u8, diagnosis: std::string::String },
    Tick { secs: u16 },
}

fn subject(n: u8) -> std::string::String {
    format!("p{}", n % 4)
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_792_229_400);

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    let mut users = vec![admin.clone()];

    for action in actions {
        match action {
            FuzzAction::Register { role, subject: s } => {
                let who = Address::generate(&env);
                let role = match role % 3 {
                    0 => Role::Patient,
                    1 => Role::Doctor,
                    _ => Role::Hospital,
                };
                client.register_identity(&admin, &who, &role, &String::from_str(&env, &subject(s)));
                users.push(who);
            }
            FuzzAction::GrantCare { provider, patient } => {
                let provider = &users[provider as usize % users.len()];
                let _ = client.try_grant_care(
                    &admin,
                    provider,
                    &String::from_str(&env, &subject(patient)),
                    &0,
                );
            }
            FuzzAction::Create { caller, id, patient, body } => {
                // Half the time send a well-formed record, otherwise raw fuzz text.
                let json = if id % 2 == 0 {
                    format!(
                        r#"{{"id":"r{}","patientId":"{}","diagnosis":{:?}}}"#,
                        id % 8,
                        subject(patient),
                        body
                    )
                } else {
                    body
                };
                let caller = &users[caller as usize % users.len()];
                let _ = client.try_create_medical_record(caller, &String::from_str(&env, &json));
            }
            FuzzAction::Read { caller, id } => {
                let caller = &users[caller as usize % users.len()];
                let id = String::from_str(&env, &format!("r{}", id % 8));
                if let Ok(Ok(json)) = client.try_read_medical_record(caller, &id) {
                    let record = codec::decode(&codec::string_to_vec(&json))
                        .expect("stored records always decode");
                    assert!(!record.created_at.is_empty());
                    assert!(record.created_at <= record.updated_at);
                }
            }
            FuzzAction::Update { caller, id, patient, diagnosis } => {
                let json = format!(
                    r#"{{"id":"r{}","patientId":"{}","diagnosis":{:?}}}"#,
                    id % 8,
                    subject(patient),
                    diagnosis
                );
                let caller = &users[caller as usize % users.len()];
                let result = client.try_update_medical_record(caller, &String::from_str(&env, &json));
                if let Err(Ok(err)) = result {
                    assert_ne!(err, ContractError::CorruptRecord);
                }
            }
            FuzzAction::Tick { secs } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(secs));
            }
        }
    }
});
