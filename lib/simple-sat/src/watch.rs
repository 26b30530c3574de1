use crate::cref::ClauseRef;
use crate::idx::LitVec;
use crate::lit::Lit;
use crate::var::Var;

#[derive(Debug, Copy, Clone)]
pub struct Watcher {
    pub(crate) cref: ClauseRef,
    pub(crate) blocker: Lit,
}

/// For each literal, the clauses currently watching it.
#[derive(Debug)]
pub struct WatchList {
    watchlist: LitVec<Vec<Watcher>>,
}

impl WatchList {
    pub const fn new() -> Self {
        Self { watchlist: LitVec::new() }
    }

    pub fn init(&mut self, var: Var) {
        self.watchlist.init(Lit::new(var, false));
        self.watchlist.init(Lit::new(var, true));
    }

    pub fn lookup(&mut self, lit: Lit) -> &mut Vec<Watcher> {
        &mut self.watchlist[lit]
    }

    pub fn insert(&mut self, lit: Lit, watch: Watcher) {
        self.watchlist[lit].push(watch);
    }

    /// Drop every watcher whose clause satisfies `is_dead`.
    pub fn purge<F>(&mut self, is_dead: F)
    where
        F: Fn(ClauseRef) -> bool,
    {
        for watchers in self.watchlist.iter_mut() {
            watchers.retain(|w| !is_dead(w.cref));
        }
    }

    pub fn clear(&mut self) {
        self.watchlist.clear();
    }
}

impl Default for WatchList {
    fn default() -> Self {
        Self::new()
    }
}
