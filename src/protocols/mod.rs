pub mod anchor;

use crate::types::ProtocolCategory;

pub const JUPITER_AGGREGATOR_V6_PROGRAM_ID: &str = "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4";
pub const ORCA_WHIRLPOOLS_PROGRAM_ID: &str = "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc";
pub const SPL_TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const TOKEN_2022_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";
pub const SPL_TOKEN_SWAP_PROGRAM_ID: &str = "SwaPpA9LAaLfeLi3a68M4DjnLqgtticKg6CnyNwgAC8";

/// Program id of the framework entry: applies to any program.
pub const WILDCARD_PROGRAM_ID: &str = "*";

/// `idl_file_name` of the hand-maintained framework table.
pub const ANCHOR_FRAMEWORK_IDL: &str = "anchor";

/// How the IDL behind an entry was obtained.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum FetchSource {
    /// Raw file from a GitHub URL; `github_url` is required.
    Github,
    /// Fetched on-chain with the Anchor CLI.
    Anchor,
    /// Pre-copied into `idl/` from a reference repository.
    Local,
    /// No IDL: errors maintained by hand.
    Manual,
}

/// One configured program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolEntry {
    /// Bundled document name, without the `.json` extension.
    pub idl_file_name: &'static str,
    pub program_id: &'static str,
    pub fetch_source: FetchSource,
    pub display_name: &'static str,
    pub version: &'static str,
    /// `None` means a plain program.
    pub category: Option<ProtocolCategory>,
    pub github_url: Option<&'static str>,
    pub notes: Option<&'static str>,
}

/// Every program known to the bundled registry. Order is irrelevant.
pub const PROTOCOLS: &[ProtocolEntry] = &[
    ProtocolEntry {
        idl_file_name: "jupiter",
        program_id: JUPITER_AGGREGATOR_V6_PROGRAM_ID,
        fetch_source: FetchSource::Github,
        display_name: "Jupiter Aggregator v6",
        version: "0.1.0",
        category: None,
        github_url: Some(
            "https://raw.githubusercontent.com/jup-ag/jupiter-cpi-swap-example/b0c59b7ac537c47e9502391d83f8926ffffa412e/cpi-swap-program/idls/jupiter_aggregator.json",
        ),
        notes: None,
    },
    ProtocolEntry {
        idl_file_name: "orca-whirlpools",
        program_id: ORCA_WHIRLPOOLS_PROGRAM_ID,
        fetch_source: FetchSource::Anchor,
        display_name: "Orca Whirlpools",
        version: "1.0.0",
        category: None,
        github_url: None,
        notes: None,
    },
    ProtocolEntry {
        idl_file_name: ANCHOR_FRAMEWORK_IDL,
        program_id: WILDCARD_PROGRAM_ID,
        fetch_source: FetchSource::Manual,
        display_name: "Anchor Framework",
        version: "0.30.1",
        category: Some(ProtocolCategory::Framework),
        github_url: None,
        notes: Some("Framework errors that apply to any Anchor program"),
    },
    ProtocolEntry {
        idl_file_name: "spl-token",
        program_id: SPL_TOKEN_PROGRAM_ID,
        fetch_source: FetchSource::Github,
        display_name: "SPL Token Program",
        version: "1.0.0",
        category: Some(ProtocolCategory::TokenProgram),
        github_url: Some(
            "https://raw.githubusercontent.com/solana-program/token/refs/heads/main/program/idl.json",
        ),
        notes: Some("Native Solana token standard"),
    },
    ProtocolEntry {
        idl_file_name: "token-2022",
        program_id: TOKEN_2022_PROGRAM_ID,
        fetch_source: FetchSource::Github,
        display_name: "Token-2022 Program",
        version: "1.0.0",
        category: Some(ProtocolCategory::TokenProgram),
        github_url: Some(
            "https://raw.githubusercontent.com/solana-program/token-2022/refs/heads/main/interface/idl.json",
        ),
        notes: Some("Extended token program with additional features"),
    },
    ProtocolEntry {
        idl_file_name: "spl-token-swap",
        program_id: SPL_TOKEN_SWAP_PROGRAM_ID,
        fetch_source: FetchSource::Local,
        display_name: "SPL Token Swap",
        version: "3.0.0",
        category: None,
        github_url: None,
        notes: Some("Official SPL token swap program"),
    },
];

/// Raw JSON of a bundled IDL, by `idl_file_name`.
pub fn bundled_document(idl_file_name: &str) -> Option<&'static str> {
    match idl_file_name {
        "jupiter" => Some(include_str!("../../idl/jupiter.json")),
        "orca-whirlpools" => Some(include_str!("../../idl/orca-whirlpools.json")),
        "spl-token" => Some(include_str!("../../idl/spl-token.json")),
        "token-2022" => Some(include_str!("../../idl/token-2022.json")),
        "spl-token-swap" => Some(include_str!("../../idl/spl-token-swap.json")),
        _ => None,
    }
}

/// Entries that need an IDL document (everything except `manual`).
pub fn idl_based_protocols() -> impl Iterator<Item = &'static ProtocolEntry> {
    PROTOCOLS
        .iter()
        .filter(|p| p.fetch_source != FetchSource::Manual)
}

/// Whether `program_id` is a 32-byte base58 address.
pub fn is_valid_program_id(program_id: &str) -> bool {
    bs58::decode(program_id)
        .into_vec()
        .is_ok_and(|bytes| bytes.len() == 32)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn fetch_source_roundtrip() {
        for source in [
            FetchSource::Github,
            FetchSource::Anchor,
            FetchSource::Local,
            FetchSource::Manual,
        ] {
            let spelled = source.to_string();
            assert_eq!(spelled.parse::<FetchSource>().ok(), Some(source));
        }
        assert_eq!("npm".parse::<FetchSource>().ok(), None);
        assert_eq!(FetchSource::Github.to_string(), "github");
    }

    #[test]
    fn every_idl_entry_has_a_bundled_document() {
        for entry in idl_based_protocols() {
            assert!(
                bundled_document(entry.idl_file_name).is_some(),
                "missing bundled IDL for {}",
                entry.idl_file_name
            );
        }
    }

    #[test]
    fn github_entries_carry_a_url() {
        for entry in PROTOCOLS
            .iter()
            .filter(|p| p.fetch_source == FetchSource::Github)
        {
            assert!(entry.github_url.is_some(), "{}", entry.display_name);
        }
    }

    #[test]
    fn names_and_program_ids_are_unique() {
        let names: HashSet<&str> = PROTOCOLS.iter().map(|p| p.display_name).collect();
        let ids: HashSet<&str> = PROTOCOLS.iter().map(|p| p.program_id).collect();
        assert_eq!(names.len(), PROTOCOLS.len());
        assert_eq!(ids.len(), PROTOCOLS.len());
    }

    #[test]
    fn only_the_framework_uses_the_wildcard() {
        for entry in PROTOCOLS {
            if entry.program_id == WILDCARD_PROGRAM_ID {
                assert_eq!(entry.category, Some(ProtocolCategory::Framework));
            } else {
                assert!(
                    is_valid_program_id(entry.program_id),
                    "{} is not a valid address",
                    entry.program_id
                );
            }
        }
    }

    #[test]
    fn program_id_validation() {
        assert!(is_valid_program_id(SPL_TOKEN_PROGRAM_ID));
        assert!(!is_valid_program_id("*"));
        assert!(!is_valid_program_id("ProgABC"));
        assert!(!is_valid_program_id("0OIl"));
    }
}
