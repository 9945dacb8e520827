//! Workload file loading.
//!
//! Reads a UTF-8 workload file (LF or CRLF) and hands it to the parser;
//! writes the inverse. Skipped lines come back as warnings on the parsed
//! workload, so a front-end can surface them without failing the load.

use std::fs;
use std::io;
use std::path::Path;

use crate::workload::{parse_workload, serialize_workload, ParsedWorkload, ProcessInstruction};

/// Reads and parses a workload file, numbering pointers from 1.
///
/// # Errors
///
/// Only I/O errors fail the load; malformed lines become warnings on the
/// returned workload.
pub fn load_workload<P: AsRef<Path>>(path: P) -> io::Result<ParsedWorkload> {
    let text = fs::read_to_string(path)?;
    Ok(parse_workload(&text, 1))
}

/// Writes instructions to a workload file in the textual format.
pub fn write_workload<P: AsRef<Path>>(
    path: P,
    instructions: &[ProcessInstruction],
) -> io::Result<()> {
    fs::write(path, serialize_workload(instructions))
}
