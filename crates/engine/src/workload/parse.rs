//! Line parser and serializer for the textual workload format.
//!
//! One instruction per line, case-insensitive, surrounding whitespace and
//! blank lines ignored, LF or CRLF terminators:
//!
//! ```text
//! new(<pid>,<size_bytes>)
//! use(<ptr_id>)
//! delete(<ptr_id>)
//! kill(<pid>)
//! ```
//!
//! Parsing reassigns pointer ids to `new` lines in the order they appear
//! (counting from a caller-supplied first id, normally 1), so serialized
//! streams omit them. Unrecognised lines are reported as warnings, logged,
//! and skipped; the workload layer never fails.

use log::warn;

use super::instruction::ProcessInstruction;

/// A skipped workload line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number in the input.
    pub line_number: usize,
    /// The offending line, trimmed.
    pub line: String,
    /// Why the line was skipped.
    pub reason: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line_number, self.reason, self.line)
    }
}

/// The result of parsing a workload text.
#[derive(Debug, Clone)]
pub struct ParsedWorkload {
    /// Accepted instructions, in input order.
    pub instructions: Vec<ProcessInstruction>,
    /// The next unused pointer id.
    pub next_ptr_id: u32,
    /// Skipped lines.
    pub warnings: Vec<ParseWarning>,
}

/// Parses a workload text, assigning pointer ids from `first_ptr_id`.
pub fn parse_workload(text: &str, first_ptr_id: u32) -> ParsedWorkload {
    let mut instructions = Vec::new();
    let mut warnings = Vec::new();
    let mut next_ptr_id = first_ptr_id;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line, next_ptr_id) {
            Ok(instruction) => {
                if matches!(instruction, ProcessInstruction::New { .. }) {
                    next_ptr_id += 1;
                }
                instructions.push(instruction);
            }
            Err(reason) => {
                let warning = ParseWarning {
                    line_number: index + 1,
                    line: line.to_string(),
                    reason,
                };
                warn!("skipping workload {}", warning);
                warnings.push(warning);
            }
        }
    }

    ParsedWorkload {
        instructions,
        next_ptr_id,
        warnings,
    }
}

/// Renders instructions back to the textual format, one per line.
pub fn serialize_workload(instructions: &[ProcessInstruction]) -> String {
    let mut out = String::new();
    for instruction in instructions {
        out.push_str(&instruction.to_string());
        out.push('\n');
    }
    out
}

/// Parses one trimmed, non-empty line.
fn parse_line(line: &str, next_ptr_id: u32) -> Result<ProcessInstruction, String> {
    let open = line.find('(').ok_or("missing opening parenthesis")?;
    if !line.ends_with(')') {
        return Err("missing closing parenthesis".to_string());
    }
    let op = line[..open].trim().to_ascii_lowercase();
    let args = &line[open + 1..line.len() - 1];

    match op.as_str() {
        "new" => {
            let (pid, size) = args
                .split_once(',')
                .ok_or("new takes two arguments")?;
            let pid = parse_pid(pid)?;
            let size_bytes: u32 = size
                .trim()
                .parse()
                .map_err(|_| "allocation size is not a non-negative integer".to_string())?;
            if size_bytes == 0 {
                return Err("allocation size must be at least 1 byte".to_string());
            }
            Ok(ProcessInstruction::New {
                pid,
                size_bytes,
                ptr_id: next_ptr_id,
            })
        }
        "use" => Ok(ProcessInstruction::Use {
            ptr_id: parse_ptr(args)?,
        }),
        "delete" => Ok(ProcessInstruction::Delete {
            ptr_id: parse_ptr(args)?,
        }),
        "kill" => Ok(ProcessInstruction::Kill {
            pid: parse_pid(args)?,
        }),
        other => Err(format!("unknown operation {:?}", other)),
    }
}

/// Validates a process token (`\w+`).
fn parse_pid(token: &str) -> Result<String, String> {
    let token = token.trim();
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("invalid process token {:?}", token));
    }
    Ok(token.to_string())
}

/// Parses a pointer-id operand.
fn parse_ptr(token: &str) -> Result<u32, String> {
    token
        .trim()
        .parse()
        .map_err(|_| "pointer id is not a non-negative integer".to_string())
}
