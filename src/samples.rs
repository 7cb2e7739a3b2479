//! Fixtures from the Mesh Core v1.0 sample data.
use crate::access::VendorOpcode;
use crate::address::{Address, UnicastAddress};
use crate::crypto::key::{AppKey, DevKey};
use crate::crypto::{AID, SZMIC};
use crate::mesh::CompanyID;
use crate::messages;
use crate::messages::MeshCommand;

fn sample_app_key() -> AppKey {
    AppKey::from_hex("63964771734fbd76e3b40519d1d94a48").expect("from sample data")
}
fn sample_dev_key() -> DevKey {
    DevKey::from_hex("9d6dd0e96eb25dc19a40ed9914f8f03f").expect("from sample data")
}

#[test]
fn test_sample_app_key_aid() {
    assert_eq!(sample_app_key().aid(), AID::new(0x26));
}

#[test]
fn test_sample_dev_key_round_trips_hex() {
    assert_eq!(
        alloc::format!("{:x}", sample_dev_key().key()),
        "9d6dd0e96eb25dc19a40ed9914f8f03f"
    );
}

/// Sample data message #22: vendor model message "Hello" from company 0x000A.
#[test]
fn test_message22_access_payload() {
    let command = MeshCommand::Vendor {
        opcode: VendorOpcode::new(0x15),
        company_id: CompanyID(0x000A),
        payload: b"Hello".to_vec(),
        response: None,
    };
    let pdu = messages::encode(
        &command,
        Some(&sample_app_key()),
        SZMIC::big(),
        UnicastAddress::new(0x1234),
        Address::from(0xb529_u16),
        None,
    )
    .expect("from sample data");
    assert_eq!(
        pdu.payload().expect("from sample data"),
        alloc::vec![0xd5, 0x0a, 0x00, 0x48, 0x65, 0x6c, 0x6c, 0x6f]
    );
    assert_eq!(pdu.security.aid, Some(AID::new(0x26)));
}
