use crate::types::{ErrorInfo, ErrorTable, IdlSource, ProtocolCategory, ProtocolMetadata};

/// Everything needed to construct a [`Protocol`].
///
/// `errors` is expected to be already normalized (see [`crate::normalize::build_error_table`]).
pub struct ProtocolConfig {
    pub name: String,
    pub program_id: String,
    pub version: String,
    pub category: ProtocolCategory,
    pub errors: ErrorTable,
    pub idl_source: Option<IdlSource>,
    pub last_verified: String,
}

/// One program's error table plus identity metadata. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    metadata: ProtocolMetadata,
    errors: ErrorTable,
}

impl Protocol {
    pub fn new(config: ProtocolConfig) -> Self {
        let ProtocolConfig {
            name,
            program_id,
            version,
            category,
            errors,
            idl_source,
            last_verified,
        } = config;

        Self {
            metadata: ProtocolMetadata {
                name,
                program_id,
                version,
                category,
                idl_source,
                last_verified,
            },
            errors,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn program_id(&self) -> &str {
        &self.metadata.program_id
    }

    pub fn category(&self) -> ProtocolCategory {
        self.metadata.category
    }

    pub fn metadata(&self) -> &ProtocolMetadata {
        &self.metadata
    }

    /// `None` is the common case: codes are sparse.
    pub fn get_error(&self, code: u32) -> Option<&ErrorInfo> {
        self.errors.get(&code)
    }

    pub fn has_error(&self, code: u32) -> bool {
        self.errors.contains_key(&code)
    }

    /// All errors, ascending by code. Callers should not rely on the order.
    pub fn all_errors(&self) -> impl ExactSizeIterator<Item = &ErrorInfo> + '_ {
        self.errors.values()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Case-insensitive substring match on name or description.
    /// An empty query matches every error.
    pub fn search_errors(&self, query: &str) -> Vec<&ErrorInfo> {
        let needle = query.to_lowercase();
        self.errors
            .values()
            .filter(|error| {
                error.name.to_lowercase().contains(&needle)
                    || error.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(code: u32, name: &str, description: &str) -> ErrorInfo {
        ErrorInfo {
            code,
            name: name.to_string(),
            description: description.to_string(),
            docs: None,
        }
    }

    fn sample() -> Protocol {
        let mut errors = ErrorTable::new();
        for error in [
            info(6000, "EmptyRoute", "Empty route"),
            info(
                6001,
                "SlippageToleranceExceeded",
                "Slippage tolerance exceeded",
            ),
            info(6002, "InvalidCalculation", "Invalid calculation"),
            info(6003, "MathOverflow", "Arithmetic OVERFLOW in swap"),
        ] {
            errors.insert(error.code, error);
        }

        Protocol::new(ProtocolConfig {
            name: "Jupiter Aggregator v6".to_string(),
            program_id: "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4".to_string(),
            version: "0.1.0".to_string(),
            category: ProtocolCategory::ProgramSpecific,
            errors,
            idl_source: None,
            last_verified: "2025-01-01".to_string(),
        })
    }

    #[test]
    fn metadata_wraps_identity_fields() {
        let protocol = sample();
        let metadata = protocol.metadata();
        assert_eq!(metadata.name, "Jupiter Aggregator v6");
        assert_eq!(
            metadata.program_id,
            "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4"
        );
        assert_eq!(metadata.version, "0.1.0");
        assert_eq!(metadata.category, ProtocolCategory::ProgramSpecific);
        assert_eq!(metadata.idl_source, None);
        assert_eq!(metadata.last_verified, "2025-01-01");
    }

    #[test]
    fn lookups_report_absence_without_failing() {
        let protocol = sample();
        assert_eq!(
            protocol.get_error(6001).map(|e| e.name.as_str()),
            Some("SlippageToleranceExceeded")
        );
        assert!(protocol.has_error(6000));
        assert!(protocol.get_error(42).is_none());
        assert!(!protocol.has_error(42));
        assert_eq!(protocol.error_count(), 4);
        assert_eq!(protocol.all_errors().len(), 4);
    }

    #[test]
    fn search_matches_name_or_description_ignoring_case() {
        let protocol = sample();

        let by_name: Vec<u32> = protocol
            .search_errors("slippage")
            .iter()
            .map(|e| e.code)
            .collect();
        assert_eq!(by_name, vec![6001]);

        let by_description: Vec<u32> = protocol
            .search_errors("overflow")
            .iter()
            .map(|e| e.code)
            .collect();
        assert_eq!(by_description, vec![6003]);

        assert!(protocol.search_errors("no such thing").is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        let protocol = sample();
        assert_eq!(protocol.search_errors("").len(), protocol.error_count());
    }

    fn lcg_next(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        *state
    }

    fn random_query(state: &mut u64) -> String {
        const ALPHABET: &[u8] = b"aceilnorstuwxERTOV ";
        let len = (lcg_next(state) >> 33) % 4;
        (0..len)
            .map(|_| {
                let index = ((lcg_next(state) >> 33) % ALPHABET.len() as u64) as usize;
                char::from(ALPHABET[index])
            })
            .collect()
    }

    #[test]
    fn search_is_exact_against_the_predicate() {
        let protocol = sample();
        let mut seed = 0x00C0_FFEE_u64;

        for _ in 0..2_000 {
            let query = random_query(&mut seed);
            let needle = query.to_lowercase();
            let hits: Vec<u32> = protocol
                .search_errors(&query)
                .iter()
                .map(|e| e.code)
                .collect();
            let expected: Vec<u32> = protocol
                .all_errors()
                .filter(|e| {
                    e.name.to_lowercase().contains(&needle)
                        || e.description.to_lowercase().contains(&needle)
                })
                .map(|e| e.code)
                .collect();
            assert_eq!(hits, expected, "query {query:?}");
        }
    }
}
