//! The process-instruction model.
//!
//! Four operations drive the simulator:
//! 1. **`new(pid, size)`**: allocate `size` bytes for process `pid`; the
//!    allocation's pointer id is assigned globally in stream order.
//! 2. **`use(ptr)`**: dereference every logical page of pointer `ptr`.
//! 3. **`delete(ptr)`**: free pointer `ptr`; its pages leave RAM and disk.
//! 4. **`kill(pid)`**: free every live pointer owned by `pid`.
//!
//! `Display` renders the textual workload format; pointer ids are implicit
//! in the ordering of `new` lines and are not emitted.

use std::fmt;

/// One process memory instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessInstruction {
    /// Allocate `size_bytes` for `pid` under the pointer id `ptr_id`.
    New {
        /// Owning process token.
        pid: String,
        /// Requested allocation size in bytes (≥ 1).
        size_bytes: u32,
        /// Globally assigned pointer id.
        ptr_id: u32,
    },
    /// Dereference every page of the allocation `ptr_id`.
    Use {
        /// Target pointer id.
        ptr_id: u32,
    },
    /// Free the allocation `ptr_id`.
    Delete {
        /// Target pointer id.
        ptr_id: u32,
    },
    /// Free every live allocation owned by `pid`.
    Kill {
        /// Target process token.
        pid: String,
    },
}

impl ProcessInstruction {
    /// The pointer id this instruction targets, if it targets one.
    pub fn ptr_id(&self) -> Option<u32> {
        match self {
            ProcessInstruction::New { ptr_id, .. }
            | ProcessInstruction::Use { ptr_id }
            | ProcessInstruction::Delete { ptr_id } => Some(*ptr_id),
            ProcessInstruction::Kill { .. } => None,
        }
    }
}

impl fmt::Display for ProcessInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessInstruction::New {
                pid, size_bytes, ..
            } => write!(f, "new({},{})", pid, size_bytes),
            ProcessInstruction::Use { ptr_id } => write!(f, "use({})", ptr_id),
            ProcessInstruction::Delete { ptr_id } => write!(f, "delete({})", ptr_id),
            ProcessInstruction::Kill { pid } => write!(f, "kill({})", pid),
        }
    }
}
