#![expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use solana_error_registry::{
    ErrorSource, ProtocolCategory, ProtocolRegistry, RegistryBuilder, RegistryState,
};

const JUPITER: &str = "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4";
const ORCA: &str = "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc";
const SPL_TOKEN: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
const UNREGISTERED: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FailedTransaction {
    label: String,
    err: Value,
    program_ids: Vec<String>,
    logs: Vec<String>,
    expected: Option<Expected>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Expected {
    code: u32,
    name: String,
    source_type: String,
}

fn load_transactions(filename: &str) -> Vec<FailedTransaction> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = format!("{manifest_dir}/tests/fixtures/{filename}");
    let data =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("failed to parse {path}: {e}"))
}

fn bundled_registry() -> ProtocolRegistry {
    RegistryBuilder::new()
        .verified_at(Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap())
        .build()
        .unwrap()
}

#[test]
fn token_program_errors_are_tagged_as_token_program() {
    let registry = bundled_registry();
    let resolved = registry.resolve(SPL_TOKEN, 1).unwrap();
    assert_eq!(resolved.error.name, "insufficientFunds");
    assert_eq!(resolved.error.description, "Insufficient funds");
    assert_eq!(
        resolved.source,
        ErrorSource::TokenProgram {
            program_id: SPL_TOKEN.to_string(),
            program_name: "SPL Token Program".to_string(),
        }
    );
}

#[test]
fn program_specific_errors_resolve_from_their_own_idl() {
    let registry = bundled_registry();

    let jupiter = registry.resolve(JUPITER, 6001).unwrap();
    assert_eq!(jupiter.error.name, "SlippageToleranceExceeded");
    assert_eq!(jupiter.source.as_str(), "program-specific");
    let name = jupiter.source.program_name();
    assert_eq!(name, Some("Jupiter Aggregator v6"));

    let orca = registry.resolve(ORCA, 6017).unwrap();
    assert_eq!(orca.error.name, "TokenMaxExceeded");
    assert_eq!(orca.source.program_id(), ORCA);
}

#[test]
fn framework_codes_fall_back_for_known_and_unknown_programs() {
    let registry = bundled_registry();

    for program_id in [ORCA, UNREGISTERED] {
        let resolved = registry.resolve(program_id, 2000).unwrap();
        assert_eq!(resolved.error.name, "ConstraintMut");
        let expected = ErrorSource::AnchorFramework {
            program_id: program_id.to_string(),
        };
        assert_eq!(resolved.source, expected);
        assert_eq!(resolved.source.program_name(), None);
    }
}

#[test]
fn unknown_codes_resolve_to_nothing() {
    let registry = bundled_registry();
    assert!(registry.resolve(JUPITER, 9999).is_none());
    assert!(registry.resolve(UNREGISTERED, 6042).is_none());
}

#[test]
fn framework_is_listed_but_not_indexed() {
    let registry = bundled_registry();
    assert_eq!(registry.state(), RegistryState::Populated);
    assert!(registry.get_by_program_id("*").is_none());

    let framework = registry.get_by_name("Anchor Framework").unwrap();
    assert_eq!(framework.category(), ProtocolCategory::Framework);
    assert!(
        registry
            .list_all()
            .iter()
            .any(|p| p.name() == framework.name())
    );

    let listed: usize = registry.list_all().iter().map(|p| p.error_count()).sum();
    assert_eq!(listed, registry.total_error_count());
}

#[test]
fn search_spans_protocols() {
    let registry = bundled_registry();
    let hits = registry.search("OVERFLOW");

    let mut protocols: Vec<&str> = hits.iter().map(|hit| hit.protocol.name()).collect();
    protocols.dedup();
    assert!(protocols.contains(&"Orca Whirlpools"));
    assert!(protocols.contains(&"SPL Token Program"));
    assert!(protocols.contains(&"Token-2022 Program"));

    for hit in &hits {
        let haystack = format!("{} {}", hit.error.name, hit.error.description);
        let haystack = haystack.to_lowercase();
        assert!(haystack.contains("overflow"), "{}", hit.error.name);
    }
    assert!(registry.search("no such error anywhere").is_empty());
}

#[test]
fn failed_transaction_logs_resolve() {
    let registry = bundled_registry();

    for tx in load_transactions("failed_transactions.json") {
        let resolved = registry.resolve_log_failure(tx.logs.as_slice());
        match (&tx.expected, resolved) {
            (Some(expected), Some(resolved)) => {
                assert_eq!(resolved.error.code, expected.code, "{}", tx.label);
                assert_eq!(resolved.error.name, expected.name, "{}", tx.label);
                assert_eq!(
                    resolved.source.as_str(),
                    expected.source_type,
                    "{}",
                    tx.label
                );
            }
            (None, None) => {}
            (expected, resolved) => {
                panic!("{}: expected {expected:?}, got {resolved:?}", tx.label);
            }
        }
    }
}

#[test]
fn failed_transaction_errors_resolve_through_instruction_index() {
    let registry = bundled_registry();

    for tx in load_transactions("failed_transactions.json") {
        let program_ids = tx.program_ids.as_slice();
        let from_err = registry.resolve_instruction_failure(&tx.err, program_ids);
        let from_logs = registry.resolve_log_failure(tx.logs.as_slice());
        assert_eq!(from_err, from_logs, "{}", tx.label);
    }
}

#[test]
fn resolved_errors_serialize_flat() {
    let registry = bundled_registry();
    let resolved = registry.resolve(JUPITER, 6001).unwrap();
    let value = serde_json::to_value(resolved).unwrap();
    assert_eq!(value["code"], 6001);
    assert_eq!(value["name"], "SlippageToleranceExceeded");
    assert_eq!(value["source"]["type"], "program-specific");
    assert_eq!(value["source"]["programId"], JUPITER);
}

#[cfg(feature = "native")]
#[test]
fn pubkeys_resolve_like_their_base58_form() {
    use std::str::FromStr;

    let registry = bundled_registry();
    let pubkey = solana_pubkey::Pubkey::from_str(JUPITER).unwrap();
    assert_eq!(
        registry.resolve_pubkey(&pubkey, 6001),
        registry.resolve(JUPITER, 6001)
    );
}
