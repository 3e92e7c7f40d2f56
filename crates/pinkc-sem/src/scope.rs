//! The lexical scope stack: a stack of frames mapping names to local slots.
//!
//! Per spec: `local x := …` declared twice in the same frame is an error;
//! assigning an undeclared name binds it in the innermost frame; a `for`
//! loop's induction variable lives in its own frame, popped when the loop
//! ends, so it shadows (and doesn't clobber) an outer binding of the same
//! name. A function body gets a brand new `Scope` — it never sees its
//! caller's frames.

use rustc_hash::FxHashMap;

use crate::ir::LocalIdx;
use pinkc_util::Symbol;

pub(crate) struct Scope {
    frames: Vec<FxHashMap<Symbol, LocalIdx>>,
    next_local: u32,
}

impl Scope {
    pub(crate) fn new() -> Self {
        Self {
            frames: vec![FxHashMap::default()],
            next_local: 0,
        }
    }

    pub(crate) fn push_frame(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub(crate) fn pop_frame(&mut self) {
        self.frames.pop();
        debug_assert!(!self.frames.is_empty(), "the outermost frame is never popped");
    }

    pub(crate) fn declared_in_current_frame(&self, name: Symbol) -> bool {
        self.frames
            .last()
            .expect("at least one frame")
            .contains_key(&name)
    }

    /// Allocates a brand new slot and binds `name` to it in the current
    /// frame, unconditionally (callers check for re-declaration first).
    pub(crate) fn declare(&mut self, name: Symbol) -> LocalIdx {
        let slot = self.fresh_slot();
        self.frames
            .last_mut()
            .expect("at least one frame")
            .insert(name, slot);
        slot
    }

    /// Allocates a slot with no name attached, for scratch/induction use.
    pub(crate) fn fresh_slot(&mut self) -> LocalIdx {
        let slot = LocalIdx(self.next_local);
        self.next_local += 1;
        slot
    }

    pub(crate) fn lookup(&self, name: Symbol) -> Option<LocalIdx> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(&name).copied())
    }

    /// `x := e` outside of `local`: reuse an existing binding from any
    /// enclosing frame, or create one in the innermost frame.
    pub(crate) fn assign_or_declare(&mut self, name: Symbol) -> LocalIdx {
        self.lookup(name).unwrap_or_else(|| self.declare(name))
    }

    pub(crate) fn local_count(&self) -> u32 {
        self.next_local
    }
}
