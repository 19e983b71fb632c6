#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod error;
pub mod failure;
pub mod normalize;
pub mod protocol;
pub mod protocols;
pub mod registry;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::Error;
pub use failure::{InstructionFailure, LogFailure, instruction_failure, log_failure};
pub use normalize::{
    ExtractedErrors, IdlShape, ParseOutcome, RawErrorEntry, build_error_table, extract_raw_errors,
    normalize_entry,
};
pub use protocol::{Protocol, ProtocolConfig};
pub use protocols::{FetchSource, PROTOCOLS, ProtocolEntry};
pub use registry::{ProtocolRegistry, RegistryBuilder, RegistryState, SearchHit};
pub use types::{
    ErrorInfo, ErrorSource, ErrorTable, IdlSource, ProtocolCategory, ProtocolMetadata,
    ResolvedError,
};
