use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::Error;
use crate::normalize::build_error_table;
use crate::protocol::{Protocol, ProtocolConfig};
use crate::protocols::{self, ANCHOR_FRAMEWORK_IDL, FetchSource, PROTOCOLS, ProtocolEntry};
use crate::registry::ProtocolRegistry;
use crate::types::{IdlSource, ProtocolCategory};

const LOCAL_IDL_URL: &str = "pre-copied from reference repository";

enum SuppliedDocument {
    Parsed(Value),
    Text(String),
}

/// Runs the one-time population loop over a protocol configuration.
///
/// Any configuration defect (missing document, `github` entry without a URL,
/// malformed program id) aborts the build: a partially populated registry is
/// never returned.
pub struct RegistryBuilder {
    entries: Vec<ProtocolEntry>,
    documents: HashMap<String, SuppliedDocument>,
    verified_at: Option<DateTime<Utc>>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Starts from the bundled [`PROTOCOLS`] list.
    pub fn new() -> Self {
        Self::with_entries(PROTOCOLS.to_vec())
    }

    pub fn with_entries(entries: Vec<ProtocolEntry>) -> Self {
        Self {
            entries,
            documents: HashMap::new(),
            verified_at: None,
        }
    }

    /// Supplies an IDL document, taking precedence over the bundled one of the same name.
    pub fn document(mut self, idl_file_name: impl Into<String>, doc: Value) -> Self {
        self.documents
            .insert(idl_file_name.into(), SuppliedDocument::Parsed(doc));
        self
    }

    /// Like [`Self::document`], but parsed at build time. Invalid JSON fails the build.
    pub fn document_text(
        mut self,
        idl_file_name: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        self.documents
            .insert(idl_file_name.into(), SuppliedDocument::Text(raw.into()));
        self
    }

    /// Pins the timestamp used for `lastVerified` and on-chain `fetchedAt`.
    pub fn verified_at(mut self, at: DateTime<Utc>) -> Self {
        self.verified_at = Some(at);
        self
    }

    pub fn build(self) -> Result<ProtocolRegistry, Error> {
        let verified_at = self.verified_at.unwrap_or_else(Utc::now);
        let last_verified = verified_at.format("%Y-%m-%d").to_string();
        let mut registry = ProtocolRegistry::new();

        for entry in &self.entries {
            self.register_entry(&mut registry, entry, verified_at, &last_verified)?;
        }

        tracing::info!(
            protocols = registry.len(),
            errors = registry.total_error_count(),
            framework = registry.framework().is_some(),
            "protocol registry populated"
        );
        Ok(registry)
    }

    fn register_entry(
        &self,
        registry: &mut ProtocolRegistry,
        entry: &ProtocolEntry,
        verified_at: DateTime<Utc>,
        last_verified: &str,
    ) -> Result<(), Error> {
        let idl_source = match entry.fetch_source {
            FetchSource::Manual => {
                register_manual(registry, entry, last_verified);
                return Ok(());
            }
            FetchSource::Github => {
                let url = entry.github_url.ok_or_else(|| Error::Config {
                    reason: format!("GitHub URL required for {}", entry.idl_file_name),
                })?;
                IdlSource::Github {
                    url: url.to_string(),
                    commit: "latest".to_string(),
                }
            }
            FetchSource::Anchor => IdlSource::OnChain {
                fetched_at: verified_at.to_rfc3339(),
            },
            FetchSource::Local => IdlSource::Github {
                url: LOCAL_IDL_URL.to_string(),
                commit: "N/A".to_string(),
            },
        };

        // The wildcard fails this too: only the framework entry may use it.
        if !protocols::is_valid_program_id(entry.program_id) {
            return Err(Error::Config {
                reason: format!(
                    "invalid program id {:?} for {}",
                    entry.program_id, entry.idl_file_name
                ),
            });
        }

        let errors = build_error_table(&self.load_document(entry.idl_file_name)?);

        registry.register(Protocol::new(ProtocolConfig {
            name: entry.display_name.to_string(),
            program_id: entry.program_id.to_string(),
            version: entry.version.to_string(),
            category: entry.category.unwrap_or_default(),
            errors,
            idl_source: Some(idl_source),
            last_verified: last_verified.to_string(),
        }));
        Ok(())
    }

    fn load_document(&self, idl_file_name: &str) -> Result<Value, Error> {
        let raw = match self.documents.get(idl_file_name) {
            Some(SuppliedDocument::Parsed(doc)) => return Ok(doc.clone()),
            Some(SuppliedDocument::Text(raw)) => raw.as_str(),
            None => bundled_text(idl_file_name)?,
        };
        Ok(serde_json::from_str(raw)?)
    }
}

/// Manual entries carry no IDL and therefore no provenance.
fn register_manual(registry: &mut ProtocolRegistry, entry: &ProtocolEntry, last_verified: &str) {
    if entry.idl_file_name != ANCHOR_FRAMEWORK_IDL {
        tracing::warn!(
            idl = entry.idl_file_name,
            "no hand-maintained table for manual entry, skipping"
        );
        return;
    }

    registry.register_framework(Protocol::new(ProtocolConfig {
        name: entry.display_name.to_string(),
        program_id: entry.program_id.to_string(),
        version: entry.version.to_string(),
        category: ProtocolCategory::Framework,
        errors: protocols::anchor::framework_error_table(),
        idl_source: None,
        last_verified: last_verified.to_string(),
    }));
}

fn bundled_text(idl_file_name: &str) -> Result<&'static str, Error> {
    protocols::bundled_document(idl_file_name).ok_or_else(|| Error::Config {
        reason: format!("no IDL found for {idl_file_name}"),
    })
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::protocols::{SPL_TOKEN_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, WILDCARD_PROGRAM_ID};

    const CUSTOM_PROGRAM_ID: &str = "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc";

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    fn entry(idl_file_name: &'static str, fetch_source: FetchSource) -> ProtocolEntry {
        ProtocolEntry {
            idl_file_name,
            program_id: CUSTOM_PROGRAM_ID,
            fetch_source,
            display_name: "Custom",
            version: "0.1.0",
            category: None,
            github_url: None,
            notes: None,
        }
    }

    fn anchor_entry() -> ProtocolEntry {
        ProtocolEntry {
            idl_file_name: ANCHOR_FRAMEWORK_IDL,
            program_id: WILDCARD_PROGRAM_ID,
            fetch_source: FetchSource::Manual,
            display_name: "Anchor Framework",
            version: "0.30.1",
            category: Some(ProtocolCategory::Framework),
            github_url: None,
            notes: None,
        }
    }

    fn builder(entries: Vec<ProtocolEntry>) -> RegistryBuilder {
        RegistryBuilder::with_entries(entries)
            .verified_at(fixed_clock())
    }

    fn config_reason(result: &Result<ProtocolRegistry, Error>) -> &str {
        match result {
            Err(Error::Config { reason }) => reason,
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn bundled_configuration_builds() {
        let bundled = RegistryBuilder::new().verified_at(fixed_clock());
        let registry = bundled.build().unwrap();
        assert_eq!(registry.len(), PROTOCOLS.len());
        assert!(registry.framework().is_some());
        assert!(registry.get_by_program_id(WILDCARD_PROGRAM_ID).is_none());

        let token = registry.get_by_program_id(SPL_TOKEN_PROGRAM_ID).unwrap();
        assert_eq!(token.category(), ProtocolCategory::TokenProgram);
        assert_eq!(token.metadata().last_verified, "2025-03-14");
        assert!(matches!(
            token.metadata().idl_source,
            Some(IdlSource::Github { ref commit, .. }) if commit == "latest"
        ));
        assert!(registry.get_by_program_id(TOKEN_2022_PROGRAM_ID).is_some());
    }

    #[test]
    fn on_chain_entries_record_fetch_time() {
        let entries = vec![entry("orca-whirlpools", FetchSource::Anchor)];
        let registry = builder(entries).build().unwrap();
        let protocol = registry.get_by_program_id(CUSTOM_PROGRAM_ID).unwrap();
        let expected = IdlSource::OnChain {
            fetched_at: "2025-03-14T09:26:53+00:00".to_string(),
        };
        assert_eq!(protocol.metadata().idl_source, Some(expected));
    }

    #[test]
    fn local_entries_are_marked_pre_copied() {
        let entries = vec![entry("spl-token-swap", FetchSource::Local)];
        let registry = builder(entries).build().unwrap();
        let protocol = registry.get_by_program_id(CUSTOM_PROGRAM_ID).unwrap();
        let expected = IdlSource::Github {
            url: LOCAL_IDL_URL.to_string(),
            commit: "N/A".to_string(),
        };
        assert_eq!(protocol.metadata().idl_source, Some(expected));
    }

    #[test]
    fn framework_entry_has_no_provenance() {
        let registry = builder(vec![anchor_entry()]).build().unwrap();
        let framework = registry.framework().unwrap();
        assert_eq!(framework.category(), ProtocolCategory::Framework);
        assert_eq!(framework.metadata().idl_source, None);
        assert_eq!(framework.metadata().last_verified, "2025-03-14");
    }

    #[test]
    fn missing_document_is_a_configuration_error() {
        let entries = vec![entry("does-not-exist", FetchSource::Local)];
        let result = builder(entries).build();
        assert!(config_reason(&result).contains("does-not-exist"));
    }

    #[test]
    fn github_entry_without_url_is_rejected() {
        let entries = vec![entry("jupiter", FetchSource::Github)];
        let result = builder(entries).build();
        assert!(config_reason(&result).contains("GitHub URL"));
    }

    #[test]
    fn malformed_program_ids_are_rejected() {
        for program_id in ["ProgABC", WILDCARD_PROGRAM_ID, ""] {
            let mut bad = entry("jupiter", FetchSource::Local);
            bad.program_id = program_id;
            let result = builder(vec![bad]).build();
            assert!(config_reason(&result).contains("invalid program id"));
        }
    }

    #[test]
    fn invalid_json_text_is_a_json_error() {
        let entries = vec![entry("broken", FetchSource::Local)];
        let result = builder(entries)
            .document_text("broken", "{\"errors\": [")
            .build();
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn document_text_is_parsed_like_a_bundled_idl() {
        let entries = vec![entry("textual", FetchSource::Local)];
        let raw = r#"{"errors": [{"code": 6000, "name": "Text", "msg": "from text"}]}"#;
        let registry = builder(entries)
            .document_text("textual", raw)
            .build()
            .unwrap();
        let protocol = registry.get_by_program_id(CUSTOM_PROGRAM_ID).unwrap();
        assert_eq!(protocol.get_error(6000).unwrap().description, "from text");
    }

    #[test]
    fn injected_documents_override_bundled_ones() {
        let entries = vec![entry("jupiter", FetchSource::Local)];
        let doc = json!({"errors": [{"code": 6000, "name": "Only", "msg": "only entry"}]});
        let registry = builder(entries).document("jupiter", doc).build().unwrap();
        let protocol = registry.get_by_program_id(CUSTOM_PROGRAM_ID).unwrap();
        assert_eq!(protocol.error_count(), 1);
        assert_eq!(protocol.get_error(6000).unwrap().name, "Only");
    }

    #[test]
    fn malformed_documents_register_with_no_errors() {
        let entries = vec![entry("weird", FetchSource::Local)];
        let doc = json!({"errors": {"not": "an array"}});
        let registry = builder(entries).document("weird", doc).build().unwrap();
        let protocol = registry.get_by_program_id(CUSTOM_PROGRAM_ID).unwrap();
        assert_eq!(protocol.error_count(), 0);
    }

    #[test]
    fn manual_entries_other_than_anchor_are_skipped() {
        let mut manual = entry("hand-written", FetchSource::Manual);
        manual.display_name = "Hand Written";
        let registry = builder(vec![manual, anchor_entry()]).build().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get_by_name("Hand Written").is_none());
        let framework_name = registry.framework().map(Protocol::name);
        assert_eq!(framework_name, Some("Anchor Framework"));
    }

    #[test]
    fn empty_configuration_builds_an_empty_registry() {
        let registry = builder(Vec::new()).build().unwrap();
        assert!(registry.is_empty());
    }
}
