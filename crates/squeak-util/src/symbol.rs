//! Global string interner.
//!
//! Identifiers and keywords are interned once and compared by the resulting
//! handle rather than by string content for the rest of the pipeline. The
//! interner is process-global (a `DashMap` keyed by `ahash`) so a `Symbol`
//! stays valid and cheaply comparable across the scanner, parser, resolver
//! and evaluator without threading an arena through all of them.

use dashmap::DashMap;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

type Hasher = BuildHasherDefault<ahash::AHasher>;

struct Interner {
    strings: DashMap<&'static str, Symbol, Hasher>,
    values: DashMap<Symbol, &'static str, Hasher>,
    next: AtomicU32,
}

fn interner() -> &'static Interner {
    static INTERNER: OnceLock<Interner> = OnceLock::new();
    INTERNER.get_or_init(|| Interner {
        strings: DashMap::with_hasher(Hasher::default()),
        values: DashMap::with_hasher(Hasher::default()),
        next: AtomicU32::new(0),
    })
}

/// A handle to an interned string. Cheap to copy, compare and hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(text: &str) -> Symbol {
        let interner = interner();
        if let Some(sym) = interner.strings.get(text) {
            return *sym;
        }

        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let id = interner.next.fetch_add(1, Ordering::Relaxed);
        let sym = Symbol(id);
        interner.strings.insert(leaked, sym);
        interner.values.insert(sym, leaked);
        sym
    }

    pub fn as_str(self) -> &'static str {
        interner()
            .values
            .get(&self)
            .expect("Symbol always has a backing string")
            .value()
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
