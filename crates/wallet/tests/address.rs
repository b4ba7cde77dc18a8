#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use wallet::{
    ethereum_encode, evm_to_address, normalize_address, AddressError, AddressLength,
    AddressResolution, FileNotes, Keyring, MemoryNotes, NoteStore, ETH_STORAGE_KEY,
};

const ALICE_HEX: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
const ALICE_SUBSTRATE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
const ALICE_POLKADOT: &str = "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5";

fn resolve(input: &str, allow_indices: bool, expected: Option<AddressLength>) -> AddressResolution {
    let mut notes = MemoryNotes::new();
    normalize_address(input, allow_indices, expected, &Keyring::default(), &mut notes)
}

#[test]
fn hex_and_ss58_inputs_share_canonical_form() {
    assert_eq!(resolve(ALICE_HEX, false, None).address(), Some(ALICE_SUBSTRATE));
    assert_eq!(resolve(ALICE_SUBSTRATE, false, None).address(), Some(ALICE_SUBSTRATE));
    assert_eq!(resolve(ALICE_POLKADOT, false, None).address(), Some(ALICE_SUBSTRATE));
}

#[test]
fn keyring_format_controls_output_prefix() {
    let mut notes = MemoryNotes::new();
    let res = normalize_address(ALICE_SUBSTRATE, false, None, &Keyring::new(0), &mut notes);
    assert_eq!(res.address(), Some(ALICE_POLKADOT));
}

#[test]
fn evm_input_records_checksummed_side_note() {
    let evm_hex = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
    let evm = hex::decode(&evm_hex[2..]).unwrap();
    let mut notes = MemoryNotes::new();
    let res = normalize_address(evm_hex, false, None, &Keyring::new(0), &mut notes);

    // EVM accounts always map with the generic prefix.
    assert_eq!(res.address(), Some(evm_to_address(&evm, 42).unwrap().as_str()));
    assert_eq!(
        notes.note(ETH_STORAGE_KEY).as_deref(),
        Some("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
    );
    assert_eq!(
        notes.note(ETH_STORAGE_KEY),
        Some(ethereum_encode(&evm).unwrap())
    );
}

#[test]
fn substrate_input_leaves_side_note_untouched() {
    let mut notes = MemoryNotes::new();
    let res = normalize_address(ALICE_HEX, false, None, &Keyring::default(), &mut notes);
    assert!(res.is_resolved());
    assert!(notes.note(ETH_STORAGE_KEY).is_none());
}

#[test]
fn account_indices_need_opt_in() {
    let index = wallet::ss58::encode(&[7, 0, 0, 0], 42).unwrap();
    assert!(matches!(
        resolve(&index, false, None),
        AddressResolution::Unresolved(AddressError::IndicesNotAllowed(4))
    ));
    assert_eq!(resolve(&index, true, None).address(), Some(index.as_str()));
}

#[test]
fn expected_length_is_enforced() {
    assert!(matches!(
        resolve(ALICE_HEX, false, Some(AddressLength::Evm)),
        AddressResolution::Unresolved(AddressError::LengthMismatch {
            expected: 20,
            actual: 32
        })
    ));
    assert!(resolve(ALICE_HEX, false, Some(AddressLength::Substrate)).is_resolved());
}

#[test]
fn malformed_inputs_are_unresolved() {
    for input in ["not an address", "0x123", "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQZ"] {
        let res = resolve(input, false, None);
        assert!(!res.is_resolved(), "{input} resolved to {:?}", res.address());
    }
    assert!(matches!(
        resolve("0x12345", false, None),
        AddressResolution::Unresolved(_)
    ));
}

#[test]
fn side_note_failure_collapses_to_unresolved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sub").join("notes.json");
    let mut notes = FileNotes::open(&path).unwrap();
    // A plain file where the parent directory should be.
    std::fs::write(dir.path().join("sub"), b"blocker").unwrap();

    let res = normalize_address(
        "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        false,
        None,
        &Keyring::default(),
        &mut notes,
    );
    assert!(matches!(
        res,
        AddressResolution::Unresolved(AddressError::Notes(_))
    ));
    assert!(notes.note(ETH_STORAGE_KEY).is_none());
}

#[test]
fn file_notes_persist_eth_address() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    {
        let mut notes = FileNotes::open(&path).unwrap();
        let res = normalize_address(
            "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359",
            false,
            None,
            &Keyring::default(),
            &mut notes,
        );
        assert!(res.is_resolved());
    }
    let notes = FileNotes::open(&path).unwrap();
    assert_eq!(
        notes.note(ETH_STORAGE_KEY).as_deref(),
        Some("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359")
    );
}

proptest! {
    #[test]
    fn non_account_lengths_rejected_without_indices(
        bytes in proptest::collection::vec(any::<u8>(), 1..64)
            .prop_filter("account length", |b| b.len() != 20 && b.len() != 32)
    ) {
        let mut notes = MemoryNotes::new();
        let keyring = Keyring::default();
        let len = bytes.len();
        let raw = normalize_address(bytes.as_slice(), false, None, &keyring, &mut notes);
        prop_assert!(
            matches!(raw, AddressResolution::Unresolved(AddressError::IndicesNotAllowed(l)) if l == len),
            "unexpected resolution {:?}", raw
        );
        let hex_input = format!("0x{}", hex::encode(&bytes));
        let via_hex = normalize_address(hex_input.as_str(), false, None, &keyring, &mut notes);
        prop_assert!(!via_hex.is_resolved());
        prop_assert!(notes.note(ETH_STORAGE_KEY).is_none());
    }

    #[test]
    fn substrate_keys_always_resolve(bytes in proptest::array::uniform32(any::<u8>())) {
        let mut notes = MemoryNotes::new();
        let res = normalize_address(&bytes[..], false, None, &Keyring::default(), &mut notes);
        let address = res.into_result().unwrap();
        prop_assert_eq!(wallet::ss58::decode(&address).unwrap(), (42u16, bytes.to_vec()));
    }
}
