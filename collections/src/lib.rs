//! Collections indexed by small integer handles.
//!
//! Entities of a planning task (variables, operators, ...) are stored in dense arenas and referred to
//! by a typed handle instead of a pointer. The containers of this crate are thin wrappers around
//! vectors and bitsets that can be indexed directly by such handles.

pub mod ref_store;
pub mod set;

pub use ref_store::{Ref, RefVec};
pub use set::RefSet;
