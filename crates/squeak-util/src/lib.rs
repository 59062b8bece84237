//! squeak-util - shared primitives for the Squeak language pipeline.
//!
//! Every phase of the pipeline (scanner, parser, resolver, evaluator) shares a
//! handful of cross-cutting concerns: interned strings and a typed-index/
//! `IndexVec` pair for building side-tables over parser-assigned ids. None of
//! this is Squeak-specific; it is the scaffolding the rest of the crates
//! build on. Each phase's own error taxonomy (`LexError`, `ParseError`,
//! `ResolveError`, `RuntimeError`) lives in that phase's crate instead of
//! here, since each carries phase-specific fields; this crate has no
//! fallible operations of its own and so defines no error type. Source
//! positions are tracked as plain `u32` line numbers by the crates that need
//! them rather than through a shared newtype here.

mod idx;
mod ref_id;
mod symbol;

pub use idx::{Idx, IndexVec};
pub use ref_id::{RefId, RefIdGenerator};
pub use symbol::Symbol;
