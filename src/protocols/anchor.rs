//! Errors defined by the Anchor framework itself (v0.30.1).
//!
//! These apply to every Anchor program and back the framework fallback tier.
//! Codes below 6000 are reserved by Anchor; program errors start at 6000.

use crate::types::{ErrorInfo, ErrorTable};

/// One row of the framework table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorError {
    pub code: u32,
    pub name: &'static str,
    pub msg: &'static str,
}

pub const ANCHOR_FRAMEWORK_ERRORS: &[AnchorError] = &[
    // Instructions
    AnchorError {
        code: 100,
        name: "InstructionMissing",
        msg: "8 byte instruction identifier not provided",
    },
    AnchorError {
        code: 101,
        name: "InstructionFallbackNotFound",
        msg: "Fallback functions are not supported",
    },
    AnchorError {
        code: 102,
        name: "InstructionDidNotDeserialize",
        msg: "The program could not deserialize the given instruction",
    },
    AnchorError {
        code: 103,
        name: "InstructionDidNotSerialize",
        msg: "The program could not serialize the given instruction",
    },
    // IDL instructions
    AnchorError {
        code: 1000,
        name: "IdlInstructionStub",
        msg: "The program was compiled without idl instructions",
    },
    AnchorError {
        code: 1001,
        name: "IdlInstructionInvalidProgram",
        msg: "Invalid program given to the IDL instruction",
    },
    AnchorError {
        code: 1002,
        name: "IdlAccountNotEmpty",
        msg: "IDL account must be empty in order to resize",
    },
    // Events
    AnchorError {
        code: 1500,
        name: "EventInstructionStub",
        msg: "The program was compiled without `event-cpi` feature",
    },
    // Constraints
    AnchorError {
        code: 2000,
        name: "ConstraintMut",
        msg: "A mut constraint was violated",
    },
    AnchorError {
        code: 2001,
        name: "ConstraintHasOne",
        msg: "A has_one constraint was violated",
    },
    AnchorError {
        code: 2002,
        name: "ConstraintSigner",
        msg: "A signer constraint was violated",
    },
    AnchorError {
        code: 2003,
        name: "ConstraintRaw",
        msg: "A raw constraint was violated",
    },
    AnchorError {
        code: 2004,
        name: "ConstraintOwner",
        msg: "An owner constraint was violated",
    },
    AnchorError {
        code: 2005,
        name: "ConstraintRentExempt",
        msg: "A rent exemption constraint was violated",
    },
    AnchorError {
        code: 2006,
        name: "ConstraintSeeds",
        msg: "A seeds constraint was violated",
    },
    AnchorError {
        code: 2007,
        name: "ConstraintExecutable",
        msg: "An executable constraint was violated",
    },
    AnchorError {
        code: 2008,
        name: "ConstraintState",
        msg: "Deprecated error, no longer used",
    },
    AnchorError {
        code: 2009,
        name: "ConstraintAssociated",
        msg: "An associated constraint was violated",
    },
    AnchorError {
        code: 2010,
        name: "ConstraintAssociatedInit",
        msg: "An associated init constraint was violated",
    },
    AnchorError {
        code: 2011,
        name: "ConstraintClose",
        msg: "A close constraint was violated",
    },
    AnchorError {
        code: 2012,
        name: "ConstraintAddress",
        msg: "An address constraint was violated",
    },
    AnchorError {
        code: 2013,
        name: "ConstraintZero",
        msg: "Expected zero account discriminant",
    },
    AnchorError {
        code: 2014,
        name: "ConstraintTokenMint",
        msg: "A token mint constraint was violated",
    },
    AnchorError {
        code: 2015,
        name: "ConstraintTokenOwner",
        msg: "A token owner constraint was violated",
    },
    AnchorError {
        code: 2016,
        name: "ConstraintMintMintAuthority",
        msg: "A mint mint authority constraint was violated",
    },
    AnchorError {
        code: 2017,
        name: "ConstraintMintFreezeAuthority",
        msg: "A mint freeze authority constraint was violated",
    },
    AnchorError {
        code: 2018,
        name: "ConstraintMintDecimals",
        msg: "A mint decimals constraint was violated",
    },
    AnchorError {
        code: 2019,
        name: "ConstraintSpace",
        msg: "A space constraint was violated",
    },
    AnchorError {
        code: 2020,
        name: "ConstraintAccountIsNone",
        msg: "A required account for the constraint is None",
    },
    AnchorError {
        code: 2021,
        name: "ConstraintTokenTokenProgram",
        msg: "A token account token program constraint was violated",
    },
    AnchorError {
        code: 2022,
        name: "ConstraintMintTokenProgram",
        msg: "A mint token program constraint was violated",
    },
    AnchorError {
        code: 2023,
        name: "ConstraintAssociatedTokenTokenProgram",
        msg: "An associated token token program constraint was violated",
    },
    AnchorError {
        code: 2024,
        name: "ConstraintMintGroupPointerExtension",
        msg: "A mint group pointer extension constraint was violated",
    },
    AnchorError {
        code: 2025,
        name: "ConstraintMintGroupPointerExtensionAuthority",
        msg: "A mint group pointer extension authority constraint was violated",
    },
    AnchorError {
        code: 2026,
        name: "ConstraintMintGroupPointerExtensionGroupAddress",
        msg: "A mint group pointer extension group address constraint was violated",
    },
    AnchorError {
        code: 2027,
        name: "ConstraintMintGroupMemberPointerExtension",
        msg: "A mint group member pointer extension constraint was violated",
    },
    AnchorError {
        code: 2028,
        name: "ConstraintMintGroupMemberPointerExtensionAuthority",
        msg: "A mint group member pointer extension authority constraint was violated",
    },
    AnchorError {
        code: 2029,
        name: "ConstraintMintGroupMemberPointerExtensionMemberAddress",
        msg: "A mint group member pointer extension member address constraint was violated",
    },
    AnchorError {
        code: 2030,
        name: "ConstraintMintMetadataPointerExtension",
        msg: "A mint metadata pointer extension constraint was violated",
    },
    AnchorError {
        code: 2031,
        name: "ConstraintMintMetadataPointerExtensionAuthority",
        msg: "A mint metadata pointer extension authority constraint was violated",
    },
    AnchorError {
        code: 2032,
        name: "ConstraintMintMetadataPointerExtensionMetadataAddress",
        msg: "A mint metadata pointer extension metadata address constraint was violated",
    },
    AnchorError {
        code: 2033,
        name: "ConstraintMintCloseAuthorityExtension",
        msg: "A mint close authority extension constraint was violated",
    },
    AnchorError {
        code: 2034,
        name: "ConstraintMintCloseAuthorityExtensionAuthority",
        msg: "A mint close authority extension authority constraint was violated",
    },
    AnchorError {
        code: 2035,
        name: "ConstraintMintPermanentDelegateExtension",
        msg: "A mint permanent delegate extension constraint was violated",
    },
    AnchorError {
        code: 2036,
        name: "ConstraintMintPermanentDelegateExtensionDelegate",
        msg: "A mint permanent delegate extension delegate constraint was violated",
    },
    AnchorError {
        code: 2037,
        name: "ConstraintMintTransferHookExtension",
        msg: "A mint transfer hook extension constraint was violated",
    },
    AnchorError {
        code: 2038,
        name: "ConstraintMintTransferHookExtensionAuthority",
        msg: "A mint transfer hook extension authority constraint was violated",
    },
    AnchorError {
        code: 2039,
        name: "ConstraintMintTransferHookExtensionProgramId",
        msg: "A mint transfer hook extension program id constraint was violated",
    },
    // Require expressions
    AnchorError {
        code: 2500,
        name: "RequireViolated",
        msg: "A require expression was violated",
    },
    AnchorError {
        code: 2501,
        name: "RequireEqViolated",
        msg: "A require_eq expression was violated",
    },
    AnchorError {
        code: 2502,
        name: "RequireKeysEqViolated",
        msg: "A require_keys_eq expression was violated",
    },
    AnchorError {
        code: 2503,
        name: "RequireNeqViolated",
        msg: "A require_neq expression was violated",
    },
    AnchorError {
        code: 2504,
        name: "RequireKeysNeqViolated",
        msg: "A require_keys_neq expression was violated",
    },
    AnchorError {
        code: 2505,
        name: "RequireGtViolated",
        msg: "A require_gt expression was violated",
    },
    AnchorError {
        code: 2506,
        name: "RequireGteViolated",
        msg: "A require_gte expression was violated",
    },
    // Accounts
    AnchorError {
        code: 3000,
        name: "AccountDiscriminatorAlreadySet",
        msg: "The account discriminator was already set on this account",
    },
    AnchorError {
        code: 3001,
        name: "AccountDiscriminatorNotFound",
        msg: "No 8 byte discriminator was found on the account",
    },
    AnchorError {
        code: 3002,
        name: "AccountDiscriminatorMismatch",
        msg: "8 byte discriminator did not match what was expected",
    },
    AnchorError {
        code: 3003,
        name: "AccountDidNotDeserialize",
        msg: "Failed to deserialize the account",
    },
    AnchorError {
        code: 3004,
        name: "AccountDidNotSerialize",
        msg: "Failed to serialize the account",
    },
    AnchorError {
        code: 3005,
        name: "AccountNotEnoughKeys",
        msg: "Not enough account keys given to the instruction",
    },
    AnchorError {
        code: 3006,
        name: "AccountNotMutable",
        msg: "The given account is not mutable",
    },
    AnchorError {
        code: 3007,
        name: "AccountOwnedByWrongProgram",
        msg: "The given account is owned by a different program than expected",
    },
    AnchorError {
        code: 3008,
        name: "InvalidProgramId",
        msg: "Program ID was not as expected",
    },
    AnchorError {
        code: 3009,
        name: "InvalidProgramExecutable",
        msg: "Program account is not executable",
    },
    AnchorError {
        code: 3010,
        name: "AccountNotSigner",
        msg: "The given account did not sign",
    },
    AnchorError {
        code: 3011,
        name: "AccountNotSystemOwned",
        msg: "The given account is not owned by the system program",
    },
    AnchorError {
        code: 3012,
        name: "AccountNotInitialized",
        msg: "The program expected this account to be already initialized",
    },
    AnchorError {
        code: 3013,
        name: "AccountNotProgramData",
        msg: "The given account is not a program data account",
    },
    AnchorError {
        code: 3014,
        name: "AccountNotAssociatedTokenAccount",
        msg: "The given account is not the associated token account",
    },
    AnchorError {
        code: 3015,
        name: "AccountSysvarMismatch",
        msg: "The given public key does not match the required sysvar",
    },
    AnchorError {
        code: 3016,
        name: "AccountReallocExceedsLimit",
        msg: "The account reallocation exceeds the MAX_PERMITTED_DATA_INCREASE limit",
    },
    AnchorError {
        code: 3017,
        name: "AccountDuplicateReallocs",
        msg: "The account was duplicated for more than one reallocation",
    },
    // Miscellaneous
    AnchorError {
        code: 4100,
        name: "DeclaredProgramIdMismatch",
        msg: "The declared program id does not match the actual program id",
    },
    AnchorError {
        code: 4101,
        name: "Deprecated",
        msg: "The API being used is deprecated and should no longer be used",
    },
    AnchorError {
        code: 4102,
        name: "ZeroCopyTypeMismatch",
        msg: "The given account is not zero-copy initialized",
    },
    // Deprecated
    AnchorError {
        code: 5000,
        name: "TryingToInitPayerAsProgramAccount",
        msg: "Trying to initialize the payer as a program account",
    },
];

/// The framework table in the shape a [`crate::Protocol`] expects.
pub fn framework_error_table() -> ErrorTable {
    ANCHOR_FRAMEWORK_ERRORS
        .iter()
        .map(|row| {
            (
                row.code,
                ErrorInfo {
                    code: row.code,
                    name: row.name.to_string(),
                    description: row.msg.to_string(),
                    docs: None,
                },
            )
        })
        .collect()
}
