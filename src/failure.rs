//! Locating the `(program, code)` pair behind a failed transaction.
//!
//! RPC nodes report a custom program error in two places: the transaction's
//! `err` value (`{"InstructionError": [index, {"Custom": code}]}`) and the
//! program log line `Program <id> failed: custom program error: 0x<hex>`.

use serde_json::Value;

const FAILED_MARKER: &str = " failed: custom program error: ";

/// A `Custom` instruction error. `instruction_index` is the top-level instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionFailure {
    pub instruction_index: usize,
    pub code: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFailure {
    pub program_id: String,
    pub code: u32,
}

/// Reads `{"InstructionError": [index, {"Custom": code}]}`.
///
/// Non-custom instruction errors (`"InvalidAccountData"`, `{"BorshIoError": ..}`)
/// carry no program code and yield `None`.
pub fn instruction_failure(err: &Value) -> Option<InstructionFailure> {
    let pair = err.get("InstructionError")?.as_array()?;
    let [index, detail] = pair.as_slice() else {
        return None;
    };

    let instruction_index = usize::try_from(index.as_u64()?).ok()?;
    let code = u32::try_from(detail.get("Custom")?.as_u64()?).ok()?;

    Some(InstructionFailure {
        instruction_index,
        code,
    })
}

/// Parses a single `Program <id> failed: custom program error: 0x<hex>` line.
pub fn parse_failure_line(line: &str) -> Option<LogFailure> {
    let rest = line.trim().strip_prefix("Program ")?;
    let (program_id, hex) = rest.split_once(FAILED_MARKER)?;
    if program_id.is_empty() || program_id.contains(' ') {
        return None;
    }

    let digits = hex
        .trim()
        .strip_prefix("0x")
        .or_else(|| hex.trim().strip_prefix("0X"))?;
    let code = u32::from_str_radix(digits, 16).ok()?;

    Some(LogFailure {
        program_id: program_id.to_string(),
        code,
    })
}

/// The first custom-error failure in `logs`.
///
/// The innermost failing program logs first; outer programs in the CPI chain
/// then repeat the same code, so the first match names the program that raised it.
pub fn log_failure<S: AsRef<str>>(logs: &[S]) -> Option<LogFailure> {
    logs.iter()
        .find_map(|line| parse_failure_line(line.as_ref()))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn custom_instruction_error_is_read() {
        let err = json!({"InstructionError": [2, {"Custom": 6001}]});
        assert_eq!(
            instruction_failure(&err),
            Some(InstructionFailure {
                instruction_index: 2,
                code: 6001
            })
        );
    }

    #[test]
    fn non_custom_instruction_errors_are_ignored() {
        for err in [
            json!({"InstructionError": [0, "InvalidAccountData"]}),
            json!({"InstructionError": [0, {"BorshIoError": "Unknown"}]}),
            json!({"InstructionError": [0]}),
            json!({"InstructionError": [0, {"Custom": -1}]}),
            json!({"InstructionError": [0, {"Custom": 4_294_967_296_u64}]}),
            json!("AccountNotFound"),
            json!({"InsufficientFundsForRent": {"account_index": 0}}),
            Value::Null,
        ] {
            assert_eq!(instruction_failure(&err), None, "{err}");
        }
    }

    #[test]
    fn failure_line_is_parsed() {
        let failure = parse_failure_line(
            "Program JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4 failed: custom program error: 0x1771",
        )
        .unwrap();
        assert_eq!(
            failure.program_id,
            "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4"
        );
        assert_eq!(failure.code, 6001);
    }

    #[test]
    fn other_log_lines_are_ignored() {
        for line in [
            "Program JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4 invoke [1]",
            "Program log: AnchorError occurred. Error Code: SlippageToleranceExceeded.",
            "Program 11111111111111111111111111111111 failed: insufficient lamports",
            "Program X failed: custom program error: 1771",
            "Program X failed: custom program error: 0xZZ",
            "Program  failed: custom program error: 0x1",
        ] {
            assert_eq!(parse_failure_line(line), None, "{line}");
        }
    }

    #[test]
    fn first_failure_in_logs_wins() {
        let logs = [
            "Program JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4 invoke [1]",
            "Program whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc invoke [2]",
            "Program whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc failed: custom program error: 0x1786",
            "Program JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4 failed: custom program error: 0x1786",
        ];
        let failure = log_failure(&logs).unwrap();
        assert_eq!(
            failure.program_id,
            "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc"
        );
        assert_eq!(failure.code, 0x1786);
        assert_eq!(log_failure::<&str>(&[]), None);
    }
}
