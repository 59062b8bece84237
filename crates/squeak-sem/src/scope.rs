//! The lexical scope stack the resolver walks while visiting the AST.
//!
//! Modeled directly on the compiler workspace's `Rib`/`ScopeTree`: a typed
//! index (`RibId`) into an append-only `IndexVec` of ribs, each holding a
//! parent link and the set of names declared directly in it. Unlike that
//! scope tree, ribs here are never retained for anything but depth counting
//! and there is no implicit rib for the top level — the global scope is
//! simply "off the end" of the stack, which is what lets `resolve` signal
//! "this name is global" by returning `None` instead of a depth.

use rustc_hash::FxHashSet;
use squeak_util::{Idx, IndexVec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RibId(u32);

impl Idx for RibId {
    fn new(index: usize) -> Self {
        RibId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RibKind {
    Block,
    Function,
}

#[derive(Debug)]
struct Rib {
    declared: FxHashSet<String>,
    parent: Option<RibId>,
    #[allow(dead_code)]
    kind: RibKind,
}

#[derive(Debug, Default)]
pub struct ScopeTree {
    ribs: IndexVec<RibId, Rib>,
    current: Option<RibId>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            ribs: IndexVec::new(),
            current: None,
        }
    }

    pub fn enter_scope(&mut self, kind: RibKind) {
        let parent = self.current;
        let rib = Rib {
            declared: FxHashSet::default(),
            parent,
            kind,
        };
        self.current = Some(self.ribs.push(rib));
    }

    pub fn exit_scope(&mut self) {
        self.current = self
            .current
            .and_then(|id| self.ribs.get(id).and_then(|rib| rib.parent));
    }

    pub fn is_at_top_level(&self) -> bool {
        self.current.is_none()
    }

    /// Declares `name` in the current (innermost) scope. Returns `false` if
    /// it was already declared there — a redeclaration. Has no effect at
    /// the top level, which isn't tracked by this stack at all.
    pub fn declare(&mut self, name: &str) -> bool {
        match self.current {
            Some(id) => self.ribs[id].declared.insert(name.to_string()),
            None => true,
        }
    }

    /// Counts parent hops from the current scope to the nearest rib
    /// declaring `name`. `None` means the name was not found in any
    /// lexical scope and should be treated as a global reference.
    pub fn resolve(&self, name: &str) -> Option<u32> {
        let mut depth = 0u32;
        let mut rib = self.current;
        while let Some(id) = rib {
            if self.ribs[id].declared.contains(name) {
                return Some(depth);
            }
            rib = self.ribs[id].parent;
            depth += 1;
        }
        None
    }
}
