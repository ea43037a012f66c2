//! JSON request/response bodies.
//!
//! # Responsibility
//! - Translate between the Portuguese camelCase wire shape consumed by the
//!   web front-end and the core input/record types.
//! - Compute derived response fields (`atrasada`, `diasRestantes`,
//!   `diasAtePrazo`) at serialization time.
//!
//! # Invariants
//! - Request fields are all optional; required-field checks live in core.
//! - Unknown request fields (ids, derived flags echoed back) are ignored.

pub mod format;
pub mod goal;
pub mod note;
pub mod study;
pub mod task;
