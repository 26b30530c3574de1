use std::ops::{Index, IndexMut};

use crate::clause::Clause;
use crate::cref::ClauseRef;
use crate::lit::Lit;

/// Clause storage. Freed slots are recycled by subsequent allocations.
#[derive(Debug)]
pub struct ClauseAllocator {
    db: Vec<Clause>,
    free: Vec<ClauseRef>,
}

impl ClauseAllocator {
    pub const fn new() -> Self {
        Self {
            db: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl Default for ClauseAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ca[cref]
impl Index<ClauseRef> for ClauseAllocator {
    type Output = Clause;

    fn index(&self, cref: ClauseRef) -> &Self::Output {
        self.db.index(cref.0)
    }
}

// &mut ca[cref]
impl IndexMut<ClauseRef> for ClauseAllocator {
    fn index_mut(&mut self, cref: ClauseRef) -> &mut Self::Output {
        self.db.index_mut(cref.0)
    }
}

impl ClauseAllocator {
    /// Number of live (allocated and not freed) clauses.
    pub fn len(&self) -> usize {
        self.db.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clause(&self, cref: ClauseRef) -> &Clause {
        self.index(cref)
    }

    pub fn clause_mut(&mut self, cref: ClauseRef) -> &mut Clause {
        self.index_mut(cref)
    }

    pub fn alloc(&mut self, lits: Vec<Lit>, learnt: bool) -> ClauseRef {
        let clause = Clause::new(lits, learnt);
        if let Some(cref) = self.free.pop() {
            self.db[cref.0] = clause;
            cref
        } else {
            let cref = ClauseRef(self.db.len());
            self.db.push(clause);
            cref
        }
    }

    /// Release the clause storage for reuse.
    /// All watchers of the clause must be detached beforehand.
    pub fn free(&mut self, cref: ClauseRef) {
        let clause = &mut self.db[cref.0];
        clause.mark_deleted();
        clause.lits = Vec::new();
        self.free.push(cref);
    }

    pub fn clear(&mut self) {
        self.db.clear();
        self.free.clear();
    }
}
