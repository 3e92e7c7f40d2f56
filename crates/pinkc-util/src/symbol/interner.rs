//! Concurrent string interner backing [`super::Symbol`].
//!
//! Strings are leaked into `'static` storage once and never freed; a
//! compiler process interns at most a few thousand distinct identifiers, so
//! the leak is bounded and the payoff is a `Symbol` that is `Copy` and needs
//! no lifetime.

use std::hash::BuildHasherDefault;
use std::sync::LazyLock;
use std::sync::RwLock;

use ahash::AHasher;
use dashmap::DashMap;

use super::{Symbol, KEYWORDS};

pub(crate) static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(StringTable::new);

/// Interns strings to [`Symbol`]s and back.
///
/// `by_str` gives O(1) amortized lookup from text to an existing symbol;
/// `strings` is the reverse index, append-only and guarded by a `RwLock`
/// since insertion is rare compared to lookup.
pub struct StringTable {
    by_str: DashMap<&'static str, Symbol, BuildHasherDefault<AHasher>>,
    strings: RwLock<Vec<&'static str>>,
}

impl StringTable {
    pub(crate) fn new() -> Self {
        let table = Self {
            by_str: DashMap::with_hasher(BuildHasherDefault::default()),
            strings: RwLock::new(Vec::new()),
        };
        for kw in KEYWORDS {
            table.intern(kw);
        }
        table
    }

    pub fn intern(&self, s: &str) -> Symbol {
        if let Some(sym) = self.by_str.get(s) {
            return *sym;
        }
        // Another thread may have inserted `s` between the check above and
        // the write lock below; `strings.len()` is taken under the lock so
        // the index we hand out always matches its slot.
        let mut strings = self.strings.write().expect("string table poisoned");
        if let Some(sym) = self.by_str.get(s) {
            return *sym;
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let symbol = Symbol {
            index: strings.len() as u32,
        };
        strings.push(leaked);
        self.by_str.insert(leaked, symbol);
        symbol
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        let strings = self.strings.read().expect("string table poisoned");
        strings.get(symbol.index as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_preinterned_in_declared_order() {
        let table = StringTable::new();
        for (idx, kw) in KEYWORDS.iter().enumerate() {
            let sym = table.intern(kw);
            assert_eq!(sym.index, idx as u32);
        }
    }
}
