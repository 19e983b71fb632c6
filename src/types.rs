use std::collections::BTreeMap;

use serde::Serialize;

/// One normalized program error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    /// Numeric code emitted by the program (`custom program error: 0x..`).
    pub code: u32,
    /// Variant name as declared in the IDL (e.g. `"SlippageToleranceExceeded"`).
    pub name: String,
    /// Display message. Always present, empty when the IDL carries none.
    pub description: String,
    /// Extra documentation lines. `Some` only when the IDL has at least one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<Vec<String>>,
}

/// A protocol's errors keyed by code. Keys are unique by construction.
pub type ErrorTable = BTreeMap<u32, ErrorInfo>;

/// How a protocol participates in resolution.
///
/// Parsed from the configuration `type` field (`"program"`, `"token-program"`,
/// `"framework"`); displayed with the resolution-facing spelling.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
pub enum ProtocolCategory {
    #[default]
    #[serde(rename = "program-specific")]
    #[strum(to_string = "program-specific", serialize = "program")]
    ProgramSpecific,
    #[serde(rename = "token-program")]
    #[strum(serialize = "token-program")]
    TokenProgram,
    #[serde(rename = "framework")]
    #[strum(serialize = "framework")]
    Framework,
}

/// Where a protocol's IDL came from. Descriptive only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum IdlSource {
    Github { url: String, commit: String },
    OnChain { fetched_at: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMetadata {
    pub name: String,
    /// Base58 program address, or `"*"` for the framework protocol.
    pub program_id: String,
    pub version: String,
    pub category: ProtocolCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idl_source: Option<IdlSource>,
    /// `YYYY-MM-DD` of the build that loaded this protocol.
    pub last_verified: String,
}

/// Which resolution tier produced a [`ResolvedError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ErrorSource {
    ProgramSpecific {
        program_id: String,
        program_name: String,
    },
    TokenProgram {
        program_id: String,
        program_name: String,
    },
    /// Framework errors are not tied to the calling program's identity, so no name.
    AnchorFramework { program_id: String },
}

impl ErrorSource {
    /// The program id the caller asked about.
    pub fn program_id(&self) -> &str {
        match self {
            Self::ProgramSpecific { program_id, .. }
            | Self::TokenProgram { program_id, .. }
            | Self::AnchorFramework { program_id } => program_id,
        }
    }

    pub fn program_name(&self) -> Option<&str> {
        match self {
            Self::ProgramSpecific { program_name, .. } => Some(program_name),
            Self::TokenProgram { program_name, .. } => Some(program_name),
            Self::AnchorFramework { .. } => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProgramSpecific { .. } => "program-specific",
            Self::TokenProgram { .. } => "token-program",
            Self::AnchorFramework { .. } => "anchor-framework",
        }
    }
}

/// Result of [`crate::ProtocolRegistry::resolve`]. Built per query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedError {
    #[serde(flatten)]
    pub error: ErrorInfo,
    pub source: ErrorSource,
}
