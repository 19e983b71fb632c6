pub mod builder;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::Error;
use crate::failure;
use crate::protocol::Protocol;
use crate::types::{ErrorInfo, ErrorSource, ProtocolCategory, ProtocolMetadata, ResolvedError};

pub use builder::RegistryBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RegistryState {
    Empty,
    Populated,
}

/// One match from [`ProtocolRegistry::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub protocol: &'a Protocol,
    pub error: &'a ErrorInfo,
}

/// Directory of known protocols with two-tier error resolution.
///
/// Program-specific tables are consulted first, keyed by program id. A single
/// framework protocol (Anchor) backs them up for codes the program itself does
/// not declare. The framework is listed by name but never indexed by program id.
#[derive(Debug, Default, Clone)]
pub struct ProtocolRegistry {
    protocols: BTreeMap<String, Arc<Protocol>>,
    program_id_index: HashMap<String, Arc<Protocol>>,
    framework: Option<Arc<Protocol>>,
}

impl ProtocolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from the bundled configuration and IDLs.
    pub fn build() -> Result<Self, Error> {
        RegistryBuilder::new().build()
    }

    /// Replaces any protocol already registered under the same name or program id.
    pub fn register(&mut self, protocol: Protocol) {
        let protocol = Arc::new(protocol);
        tracing::debug!(
            name = protocol.name(),
            program_id = protocol.program_id(),
            errors = protocol.error_count(),
            "registered protocol"
        );
        self.protocols
            .insert(protocol.name().to_string(), Arc::clone(&protocol));
        self.program_id_index
            .insert(protocol.program_id().to_string(), protocol);
    }

    /// Designates `protocol` as the fallback tier, replacing any previous one.
    pub fn register_framework(&mut self, protocol: Protocol) {
        let protocol = Arc::new(protocol);
        tracing::debug!(
            name = protocol.name(),
            errors = protocol.error_count(),
            "registered framework protocol"
        );
        self.protocols
            .insert(protocol.name().to_string(), Arc::clone(&protocol));
        self.framework = Some(protocol);
    }

    /// Resolves `code` raised by `program_id`.
    ///
    /// A program-specific hit always wins, even when the framework defines the
    /// same code. A miss there (or an unknown program) falls through to the
    /// framework table. `None` means no description is available.
    pub fn resolve(&self, program_id: &str, code: u32) -> Option<ResolvedError> {
        if let Some(protocol) = self.program_id_index.get(program_id)
            && let Some(error) = protocol.get_error(code)
        {
            let program_id = program_id.to_string();
            let program_name = protocol.name().to_string();
            let source = match protocol.category() {
                ProtocolCategory::TokenProgram => ErrorSource::TokenProgram {
                    program_id,
                    program_name,
                },
                ProtocolCategory::ProgramSpecific | ProtocolCategory::Framework => {
                    ErrorSource::ProgramSpecific {
                        program_id,
                        program_name,
                    }
                }
            };
            return Some(ResolvedError {
                error: error.clone(),
                source,
            });
        }

        let error = self.framework.as_ref()?.get_error(code)?;
        Some(ResolvedError {
            error: error.clone(),
            source: ErrorSource::AnchorFramework {
                program_id: program_id.to_string(),
            },
        })
    }

    /// Resolves the first `custom program error` found in a transaction's logs.
    pub fn resolve_log_failure<S: AsRef<str>>(&self, logs: &[S]) -> Option<ResolvedError> {
        let failure = failure::log_failure(logs)?;
        self.resolve(&failure.program_id, failure.code)
    }

    /// Resolves an RPC `InstructionError` value, looking up the failing
    /// instruction's program in `program_ids` (one per top-level instruction).
    pub fn resolve_instruction_failure<S: AsRef<str>>(
        &self,
        err: &serde_json::Value,
        program_ids: &[S],
    ) -> Option<ResolvedError> {
        let failure = failure::instruction_failure(err)?;
        let program_id = program_ids.get(failure.instruction_index)?;
        self.resolve(program_id.as_ref(), failure.code)
    }

    #[cfg(feature = "native")]
    pub fn resolve_pubkey(
        &self,
        program_id: &solana_pubkey::Pubkey,
        code: u32,
    ) -> Option<ResolvedError> {
        let program_id = bs58::encode(program_id.to_bytes()).into_string();
        self.resolve(&program_id, code)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Protocol> {
        self.protocols.get(name).map(AsRef::as_ref)
    }

    /// Never returns the framework protocol.
    pub fn get_by_program_id(&self, program_id: &str) -> Option<&Protocol> {
        self.program_id_index.get(program_id).map(AsRef::as_ref)
    }

    pub fn framework(&self) -> Option<&Protocol> {
        self.framework.as_deref()
    }

    /// All protocols, framework included, ordered by name.
    pub fn list_all(&self) -> Vec<&Protocol> {
        self.protocols.values().map(AsRef::as_ref).collect()
    }

    pub fn list_metadata(&self) -> Vec<&ProtocolMetadata> {
        self.protocols.values().map(|p| p.metadata()).collect()
    }

    /// Runs [`Protocol::search_errors`] against every registered protocol.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        self.protocols
            .values()
            .flat_map(|protocol| {
                protocol
                    .search_errors(query)
                    .into_iter()
                    .map(move |error| SearchHit {
                        protocol: protocol.as_ref(),
                        error,
                    })
            })
            .collect()
    }

    pub fn total_error_count(&self) -> usize {
        self.protocols.values().map(|p| p.error_count()).sum()
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }

    pub fn state(&self) -> RegistryState {
        if self.is_empty() {
            RegistryState::Empty
        } else {
            RegistryState::Populated
        }
    }

    /// Drops every protocol and the framework designation.
    pub fn clear(&mut self) {
        self.protocols.clear();
        self.program_id_index.clear();
        self.framework = None;
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]
mod tests {
    use super::*;
    use crate::protocol::ProtocolConfig;
    use crate::types::ErrorTable;

    fn table(entries: &[(u32, &str, &str)]) -> ErrorTable {
        entries
            .iter()
            .map(|&(code, name, description)| {
                (
                    code,
                    ErrorInfo {
                        code,
                        name: name.to_string(),
                        description: description.to_string(),
                        docs: None,
                    },
                )
            })
            .collect()
    }

    fn protocol(
        name: &str,
        program_id: &str,
        category: ProtocolCategory,
        errors: &[(u32, &str, &str)],
    ) -> Protocol {
        Protocol::new(ProtocolConfig {
            name: name.to_string(),
            program_id: program_id.to_string(),
            version: "1.0.0".to_string(),
            category,
            errors: table(errors),
            idl_source: None,
            last_verified: "2025-01-01".to_string(),
        })
    }

    fn framework() -> Protocol {
        protocol(
            "Anchor Framework",
            "*",
            ProtocolCategory::Framework,
            &[
                (2000, "ConstraintMut", "A mut constraint was violated"),
                (6000, "FrameworkShadow", "Framework definition of 6000"),
                (9999, "FrameworkOnly", "Only the framework knows this"),
            ],
        )
    }

    fn populated() -> ProtocolRegistry {
        let mut registry = ProtocolRegistry::new();
        registry.register(protocol(
            "Prog",
            "ProgABC",
            ProtocolCategory::ProgramSpecific,
            &[(6000, "Foo", "Foo happened")],
        ));
        registry.register(protocol(
            "SPL Token Program",
            "TokenProg",
            ProtocolCategory::TokenProgram,
            &[(1, "InsufficientFunds", "Insufficient funds")],
        ));
        registry.register_framework(framework());
        registry
    }

    fn lcg_next(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        *state
    }

    fn pick(state: &mut u64, len: usize) -> usize {
        (lcg_next(state) % len as u64) as usize
    }

    #[test]
    fn program_specific_hit() {
        let registry = populated();
        assert_eq!(
            registry.resolve("ProgABC", 6000),
            Some(ResolvedError {
                error: ErrorInfo {
                    code: 6000,
                    name: "Foo".to_string(),
                    description: "Foo happened".to_string(),
                    docs: None,
                },
                source: ErrorSource::ProgramSpecific {
                    program_id: "ProgABC".to_string(),
                    program_name: "Prog".to_string(),
                },
            })
        );
    }

    #[test]
    fn token_program_category_tags_token_source() {
        let registry = populated();
        let resolved = registry.resolve("TokenProg", 1).unwrap();
        assert_eq!(
            resolved.source,
            ErrorSource::TokenProgram {
                program_id: "TokenProg".to_string(),
                program_name: "SPL Token Program".to_string(),
            }
        );
    }

    #[test]
    fn tagging_follows_category_not_display_name() {
        let mut registry = ProtocolRegistry::new();
        registry.register(protocol(
            "SPL Token Program",
            "Impostor",
            ProtocolCategory::ProgramSpecific,
            &[(1, "Thing", "thing")],
        ));
        registry.register(protocol(
            "Renamed Token",
            "Token",
            ProtocolCategory::TokenProgram,
            &[(1, "Thing", "thing")],
        ));
        assert_eq!(
            registry.resolve("Impostor", 1).unwrap().source.as_str(),
            "program-specific"
        );
        assert_eq!(
            registry.resolve("Token", 1).unwrap().source.as_str(),
            "token-program"
        );
    }

    #[test]
    fn program_miss_falls_back_to_framework() {
        let registry = populated();
        let resolved = registry.resolve("ProgABC", 9999).unwrap();
        assert_eq!(resolved.error.name, "FrameworkOnly");
        let expected = ErrorSource::AnchorFramework {
            program_id: "ProgABC".to_string(),
        };
        assert_eq!(resolved.source, expected);
    }

    #[test]
    fn unknown_program_still_gets_framework_errors() {
        let registry = populated();
        let resolved = registry.resolve("UnknownProg", 2000).unwrap();
        assert_eq!(resolved.error.name, "ConstraintMut");
        assert_eq!(resolved.source.program_id(), "UnknownProg");
        assert_eq!(resolved.source.program_name(), None);
    }

    #[test]
    fn program_specific_wins_over_framework_for_shared_code() {
        let registry = populated();
        let resolved = registry.resolve("ProgABC", 6000).unwrap();
        assert_eq!(resolved.error.name, "Foo");
        assert_eq!(resolved.source.as_str(), "program-specific");
    }

    #[test]
    fn unresolvable_returns_none() {
        let registry = populated();
        assert_eq!(registry.resolve("UnknownProg", 6001), None);
        assert_eq!(registry.resolve("ProgABC", 1234), None);

        let mut no_framework = ProtocolRegistry::new();
        no_framework.register(protocol(
            "Prog",
            "ProgABC",
            ProtocolCategory::ProgramSpecific,
            &[(6000, "Foo", "Foo happened")],
        ));
        assert_eq!(no_framework.resolve("ProgABC", 2000), None);
    }

    #[test]
    fn framework_is_not_indexed_by_program_id() {
        let registry = populated();
        assert!(registry.get_by_program_id("*").is_none());
        assert_eq!(
            registry.get_by_name("Anchor Framework").map(Protocol::program_id),
            Some("*")
        );
        let resolved = registry.resolve("*", 6000).unwrap();
        assert_eq!(resolved.source.as_str(), "anchor-framework");
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut registry = populated();
        registry.register(protocol(
            "Prog",
            "ProgABC",
            ProtocolCategory::ProgramSpecific,
            &[(6000, "Bar", "Bar happened")],
        ));
        let resolved = registry.resolve("ProgABC", 6000).unwrap();
        assert_eq!(resolved.error.name, "Bar");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn second_framework_replaces_first() {
        let mut registry = populated();
        registry.register_framework(protocol(
            "Other Framework",
            "*",
            ProtocolCategory::Framework,
            &[(42, "Answer", "the answer")],
        ));
        assert_eq!(
            registry.framework().map(Protocol::name),
            Some("Other Framework")
        );
        assert!(registry.resolve("UnknownProg", 9999).is_none());
        let resolved = registry.resolve("UnknownProg", 42).unwrap();
        assert_eq!(resolved.error.name, "Answer");
    }

    #[test]
    fn listing_and_counting_include_framework() {
        let registry = populated();
        let names: Vec<&str> = registry
            .list_all()
            .into_iter()
            .map(Protocol::name)
            .collect();
        assert_eq!(names, vec!["Anchor Framework", "Prog", "SPL Token Program"]);
        let metadata_names: Vec<&str> = registry
            .list_metadata()
            .into_iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(metadata_names, names);
        assert_eq!(registry.total_error_count(), 5);
    }

    #[test]
    fn search_spans_every_protocol() {
        let registry = populated();
        let hits = registry.search("FOO");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].protocol.name(), "Prog");
        assert_eq!(hits[0].error.code, 6000);

        let framework_hits = registry.search("constraint");
        assert_eq!(framework_hits.len(), 1);
        assert_eq!(framework_hits[0].protocol.name(), "Anchor Framework");

        assert_eq!(registry.search("").len(), registry.total_error_count());
    }

    #[test]
    fn clear_returns_to_empty() {
        let mut registry = populated();
        assert_eq!(registry.state(), RegistryState::Populated);
        registry.clear();
        assert_eq!(registry.state(), RegistryState::Empty);
        assert!(registry.list_all().is_empty());
        assert!(registry.framework().is_none());
        assert!(registry.get_by_program_id("ProgABC").is_none());
        assert_eq!(registry.resolve("ProgABC", 9999), None);
        assert_eq!(registry.total_error_count(), 0);
    }

    #[test]
    fn resolution_properties_hold_for_randomized_queries() {
        let registry = populated();
        let program_ids = ["ProgABC", "TokenProg", "UnknownProg", "*", ""];
        let codes = [0, 1, 2000, 6000, 6001, 9999, u32::MAX];
        let mut seed = 0x5EED_u64;

        for _ in 0..5_000 {
            let program_id = program_ids[pick(&mut seed, program_ids.len())];
            let code = codes[pick(&mut seed, codes.len())];

            let first = registry.resolve(program_id, code);
            assert_eq!(first, registry.resolve(program_id, code));

            let program_hit = registry
                .get_by_program_id(program_id)
                .and_then(|p| p.get_error(code));
            let framework_hit = registry.framework().and_then(|f| f.get_error(code));

            match (program_hit, framework_hit, first) {
                (Some(expected), _, Some(resolved)) => {
                    assert_eq!(&resolved.error, expected);
                    assert_ne!(resolved.source.as_str(), "anchor-framework");
                }
                (None, Some(expected), Some(resolved)) => {
                    assert_eq!(&resolved.error, expected);
                    assert_eq!(resolved.source.as_str(), "anchor-framework");
                    assert_eq!(resolved.source.program_id(), program_id);
                }
                (None, None, None) => {}
                (p, f, r) => panic!("inconsistent resolution: {p:?} {f:?} {r:?}"),
            }
        }
    }
}
