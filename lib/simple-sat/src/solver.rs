use std::fmt::{Display, Formatter};

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::assignment::Assignment;
use crate::clause_allocator::ClauseAllocator;
use crate::cref::ClauseRef;
use crate::idx::{LitVec, VarVec};
use crate::lbool::LBool;
use crate::learning::{LearningGuard, LearningStrategy};
use crate::lit::Lit;
use crate::options::{Options, PhaseInit};
use crate::restart::RestartStrategy;
use crate::var::Var;
use crate::var_order::VarOrder;
use crate::watch::{WatchList, Watcher};

/// Scale of the random initial activity, used for seeded tie-breaking.
/// Small enough to be dominated by the very first bump.
const INITIAL_ACTIVITY_NOISE: f64 = 1e-5;

/// Largest supported variable index. Per-variable storage is allocated eagerly
/// up to the largest index mentioned, so larger indices are rejected by callers.
pub const MAX_VAR: u32 = 1 << 24;

const DEFAULT_CLA_DECAY: f64 = 0.999;
const DEFAULT_CLA_INC: f64 = 1.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolveResult {
    Sat,
    Unsat,
    Unknown,
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Stats {
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
    pub restarts: u64,
}

#[derive(Debug)]
pub struct Solver {
    options: Options,
    ca: ClauseAllocator,
    clauses: Vec<ClauseRef>,
    learnts: Vec<ClauseRef>,
    watchlist: WatchList,
    assignment: Assignment,
    var_order: VarOrder,
    polarity: VarVec<Option<bool>>, // saved phases
    jw: LitVec<f64>,                // Jeroslow-Wang scores
    seen: VarVec<bool>,
    assumptions: Vec<Lit>,
    model: Vec<LBool>,
    ok: bool,
    next_var: u32,
    cla_inc: f64,
    cla_decay: f64,
    restart: RestartStrategy,
    learning: LearningGuard,
    rng: StdRng,
    stats: Stats,
}

impl Solver {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            ca: ClauseAllocator::new(),
            clauses: Vec::new(),
            learnts: Vec::new(),
            watchlist: WatchList::new(),
            assignment: Assignment::new(),
            var_order: VarOrder::new(),
            polarity: VarVec::new(),
            jw: LitVec::new(),
            seen: VarVec::new(),
            assumptions: Vec::new(),
            model: Vec::new(),
            ok: true,
            next_var: 0,
            cla_inc: DEFAULT_CLA_INC,
            cla_decay: DEFAULT_CLA_DECAY,
            restart: RestartStrategy::from_options(&options),
            learning: LearningGuard::new(LearningStrategy::from_options(&options)),
            rng: StdRng::seed_from_u64(options.seed),
            stats: Stats::default(),
            options,
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Solver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SimpleSat(vars={}, clauses={}, learnts={})",
            self.num_vars(),
            self.num_clauses(),
            self.num_learnts()
        )
    }
}

impl Solver {
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn num_vars(&self) -> usize {
        self.next_var as _
    }
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
    pub fn num_learnts(&self) -> usize {
        self.learnts.len()
    }
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Returns `false` once the formula is known to be unsatisfiable
    /// regardless of assumptions.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Re-seed the random generator driving tie-breaking and random phases.
    pub fn set_seed(&mut self, seed: u64) {
        self.options.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn set_phase_init(&mut self, phase_init: PhaseInit) {
        self.options.phase_init = phase_init;
    }

    /// Limit the number of propagated literals per `solve` call.
    pub fn set_propagation_limit(&mut self, limit: Option<u64>) {
        self.options.propagation_limit = limit;
    }

    /// Forget all saved phases, so that the next search starts from the
    /// initial phase heuristic again.
    pub fn reset_phases(&mut self) {
        self.polarity.fill_with(|| None);
    }

    /// Drop the whole state (clauses, variables, statistics) but keep the options.
    pub fn reset(&mut self) {
        *self = Self::with_options(self.options.clone());
    }

    /// Free all clause storage. Safe to call repeatedly; the solver is left empty.
    pub fn release(&mut self) {
        debug!("Releasing {}", self);
        self.reset();
    }

    pub fn new_var(&mut self) -> Var {
        let var = Var::new(self.next_var);
        self.next_var += 1;

        self.watchlist.init(var);
        self.assignment.init(var);
        self.polarity.init(var);
        self.seen.init(var);
        self.jw.init(Lit::new(var, true));

        let activity = self.rng.gen::<f64>() * INITIAL_ACTIVITY_NOISE;
        self.var_order.init(var, activity);

        var
    }

    /// Make sure that all variables up to `var` (1-based) exist.
    fn ensure_vars(&mut self, max_var: u32) {
        debug_assert!(max_var <= MAX_VAR, "variable {} exceeds MAX_VAR", max_var);
        while self.next_var < max_var {
            self.new_var();
        }
    }

    /// Value of the literal in the model found by the last successful `solve`.
    pub fn value(&self, lit: Lit) -> LBool {
        match self.model.get(lit.var().index()) {
            Some(&value) => value ^ lit.negated(),
            None => LBool::Undef,
        }
    }

    pub fn model(&self) -> &[LBool] {
        &self.model
    }

    /// Add a clause to the solver. Missing variables are created automatically.
    ///
    /// Returns `false` if the solver is (now) in UNSAT state.
    pub fn add_clause(&mut self, lits: &[Lit]) -> bool {
        debug_assert_eq!(self.assignment.decision_level(), 0);

        // If the solver is already in UNSAT state, we do not need to add new clause.
        if !self.ok {
            return false;
        }

        if let Some(max_var) = lits.iter().map(|lit| lit.var().to_external()).max() {
            self.ensure_vars(max_var);
        }

        // Sorting places `x` and `-x` next to each other.
        let lits = lits.iter().copied().sorted().dedup().collect_vec();
        let mut simplified = Vec::with_capacity(lits.len());
        for (i, &lit) in lits.iter().enumerate() {
            if self.assignment.value(lit) == LBool::True || (i > 0 && lits[i - 1] == !lit) {
                trace!("clause {:?} is satisfied or tautological", lits);
                return true;
            }
            if self.assignment.value(lit) == LBool::Undef {
                simplified.push(lit);
            }
        }

        let weight = 2f64.powi(-(simplified.len() as i32));
        for &lit in simplified.iter() {
            self.jw[lit] += weight;
        }

        match simplified.len() {
            0 => {
                debug!("empty clause => UNSAT");
                self.ok = false;
            }
            1 => {
                self.assignment.unchecked_enqueue(simplified[0], None);
                if self.propagate().is_some() {
                    debug!("conflict on root level after adding unit {}", simplified[0]);
                    self.ok = false;
                }
            }
            _ => {
                let cref = self.ca.alloc(simplified, false);
                self.clauses.push(cref);
                self.attach_clause(cref);
            }
        }
        self.ok
    }

    fn attach_clause(&mut self, cref: ClauseRef) {
        let clause = &self.ca[cref];
        debug_assert!(clause.len() >= 2, "Clause must have at least 2 literals");
        let (a, b) = (clause[0], clause[1]);
        self.watchlist.insert(a, Watcher { cref, blocker: b });
        self.watchlist.insert(b, Watcher { cref, blocker: a });
    }

    pub fn solve(&mut self) -> SolveResult {
        self.solve_under_assumptions(&[])
    }

    /// Solve the formula under the given assumptions.
    ///
    /// Assumptions only apply to this call. On return the solver is always
    /// back on the root level, so clauses can be added right away.
    pub fn solve_under_assumptions(&mut self, assumptions: &[Lit]) -> SolveResult {
        self.model.clear();

        // If the solver is already in UNSAT state, return early.
        if !self.ok {
            return SolveResult::Unsat;
        }

        if let Some(max_var) = assumptions.iter().map(|lit| lit.var().to_external()).max() {
            self.ensure_vars(max_var);
        }
        self.assumptions = assumptions.to_vec();
        self.learning.reset(self.num_clauses());

        let budget_start = self.stats.propagations;
        let mut current_restarts = 0;
        let status = loop {
            let num_confl = self.restart.num_confl(current_restarts);
            if let Some(status) = self.search(num_confl, budget_start) {
                break status;
            }
            current_restarts += 1;
        };

        if status == SolveResult::Sat {
            self.model = (0..self.next_var).map(|v| self.assignment.value_var(Var::new(v))).collect();
        }

        self.backtrack(0);
        self.assumptions.clear();

        info!(
            "{:?} after {} decisions, {} conflicts, {} restarts",
            status, self.stats.decisions, self.stats.conflicts, self.stats.restarts
        );
        status
    }

    fn budget_exhausted(&self, budget_start: u64) -> bool {
        match self.options.propagation_limit {
            Some(limit) => self.stats.propagations - budget_start >= limit,
            None => false,
        }
    }

    /// The main CDCL loop.
    ///
    /// Returns [`Some`] when the search reached a verdict, and [`None`] when
    /// `num_confl` conflicts were encountered and a restart is due.
    fn search(&mut self, num_confl: usize, budget_start: u64) -> Option<SolveResult> {
        debug_assert!(self.ok);

        let mut current_conflicts = 0;

        loop {
            if let Some(conflict) = self.propagate() {
                // Conflict
                current_conflicts += 1;
                self.stats.conflicts += 1;

                if self.assignment.decision_level() == 0 {
                    // conflict on root level => UNSAT
                    self.ok = false;
                    return Some(SolveResult::Unsat);
                }

                let (lemma, backtrack_level) = self.analyze(conflict);
                self.backtrack(backtrack_level);

                if lemma.len() == 1 {
                    // Learn a unit clause
                    self.assignment.unchecked_enqueue(lemma[0], None);
                } else {
                    // Learn a clause
                    let asserting = lemma[0];
                    let cref = self.ca.alloc(lemma, true);
                    self.learnts.push(cref);
                    self.attach_clause(cref);
                    self.cla_bump_activity(cref);
                    self.assignment.unchecked_enqueue(asserting, Some(cref));
                }

                self.var_order.var_decay_activity();
                self.cla_decay_activity();
                self.learning.bump();
            } else {
                // NO conflict

                if self.budget_exhausted(budget_start) {
                    debug!("propagation budget exhausted");
                    return Some(SolveResult::Unknown);
                }

                // Restart:
                if num_confl > 0 && current_conflicts >= num_confl {
                    self.stats.restarts += 1;
                    self.backtrack(0);
                    return None;
                }

                if !self.learnts.is_empty() && self.learnts.len() >= self.learning.limit(self.assignment.num_assigned()) {
                    self.reduce_db();
                }

                // Assumptions come first, one decision level each:
                let mut next = None;
                while self.assignment.decision_level() < self.assumptions.len() {
                    let p = self.assumptions[self.assignment.decision_level()];
                    match self.assignment.value(p) {
                        LBool::True => {
                            // Dummy decision level:
                            self.assignment.new_decision_level();
                        }
                        LBool::False => {
                            debug!("assumption {} is falsified", p);
                            return Some(SolveResult::Unsat);
                        }
                        LBool::Undef => {
                            next = Some(p);
                            break;
                        }
                    }
                }

                let decision = match next {
                    Some(p) => p,
                    None => match self.var_order.pick_branching_variable(&self.assignment.assignment) {
                        Some(var) => {
                            self.stats.decisions += 1;
                            Lit::new(var, !self.pick_phase(var))
                        }
                        // All variables are assigned => SAT
                        None => return Some(SolveResult::Sat),
                    },
                };

                self.assignment.new_decision_level();
                self.assignment.unchecked_enqueue(decision, None);
            }
        }
    }

    /// Returns `true` if the variable should be assigned positively.
    fn pick_phase(&mut self, var: Var) -> bool {
        if let Some(phase) = self.polarity[var] {
            return phase;
        }
        let phase = match self.options.phase_init {
            PhaseInit::JeroslowWang => {
                let pos = Lit::positive(var);
                self.jw[pos] > self.jw[!pos]
            }
            PhaseInit::Random => self.rng.gen(),
        };
        self.polarity[var] = Some(phase);
        phase
    }

    fn backtrack(&mut self, level: usize) {
        let polarity = &mut self.polarity;
        let var_order = &mut self.var_order;
        self.assignment.cancel_until(level, |lit| {
            // Phase saving:
            polarity[lit.var()] = Some(!lit.negated());
            var_order.insert_var_order(lit.var());
        });
    }

    /// Propagate all enqueued literals. Returns the conflicting clause, if any.
    fn propagate(&mut self) -> Option<ClauseRef> {
        let mut conflict = None;

        while let Some(p) = self.assignment.dequeue() {
            self.stats.propagations += 1;
            let false_literal = !p;

            let mut watchers = std::mem::take(self.watchlist.lookup(false_literal));
            let mut i = 0;
            let mut j = 0;

            'watches: while i < watchers.len() {
                let w = watchers[i];
                i += 1;

                // Try to avoid inspecting the clause:
                if self.assignment.value(w.blocker) == LBool::True {
                    watchers[j] = w;
                    j += 1;
                    continue;
                }

                let clause = &mut self.ca[w.cref];

                // Make sure the false literal is at index 1:
                if clause[0] == false_literal {
                    clause.lits.swap(0, 1);
                }
                debug_assert_eq!(clause[1], false_literal);

                // If the 0th literal is `true`, then the clause is already satisfied.
                let first = clause[0];
                let watcher = Watcher {
                    cref: w.cref,
                    blocker: first,
                };
                if first != w.blocker && self.assignment.value(first) == LBool::True {
                    watchers[j] = watcher;
                    j += 1;
                    continue;
                }

                // Find the non-falsified literal:
                for k in 2..clause.len() {
                    let other = clause[k];
                    if self.assignment.value(other) != LBool::False {
                        clause.lits.swap(1, k);
                        self.watchlist.insert(other, watcher);
                        continue 'watches;
                    }
                }

                watchers[j] = watcher;
                j += 1;

                if self.assignment.value(first) == LBool::False {
                    conflict = Some(w.cref);
                    self.assignment.skip_queue();
                    // Keep the remaining watches:
                    while i < watchers.len() {
                        watchers[j] = watchers[i];
                        j += 1;
                        i += 1;
                    }
                } else {
                    self.assignment.unchecked_enqueue(first, Some(w.cref));
                }
            }

            watchers.truncate(j);
            *self.watchlist.lookup(false_literal) = watchers;
        }

        conflict
    }

    /// Returns learnt clause and backtrack level.
    fn analyze(&mut self, conflict: ClauseRef) -> (Vec<Lit>, usize) {
        debug_assert!(self.assignment.decision_level() > 0);

        // Placeholder for the asserting literal:
        let mut lemma = vec![Lit::positive(Var::new(0))];
        let mut counter: usize = 0; // number of literals of the current decision level to resolve
        let mut confl = conflict;
        let mut start_index = 0; // 0 for initial conflict, 1 thereafter
        let mut index = self.assignment.num_assigned();

        loop {
            self.cla_bump_activity(confl);

            let clause = &self.ca[confl];
            for j in start_index..clause.len() {
                let q = clause[j];
                let var = q.var();
                debug_assert_eq!(self.assignment.value(q), LBool::False);

                if !self.seen[var] && self.assignment.level(var) > 0 {
                    self.var_order.var_bump_activity(var);
                    self.seen[var] = true;

                    if self.assignment.level(var) >= self.assignment.decision_level() {
                        counter += 1;
                    } else {
                        lemma.push(q);
                    }
                }
            }

            // Select next literal to look at:
            loop {
                index -= 1;
                if self.seen[self.assignment.trail[index].var()] {
                    break;
                }
            }
            let p = self.assignment.trail[index];
            self.seen[p.var()] = false;
            start_index = 1;
            counter -= 1;
            if counter == 0 {
                lemma[0] = !p;
                break;
            }
            confl = self
                .assignment
                .reason(p.var())
                .expect("implied literal on the current level must have a reason");
        }

        // Remove literals implied by the rest of the lemma (local minimization):
        let minimized = lemma
            .iter()
            .enumerate()
            .filter(|&(i, &lit)| i == 0 || !self.is_redundant(lit))
            .map(|(_, &lit)| lit)
            .collect_vec();
        for lit in lemma.iter().skip(1) {
            self.seen[lit.var()] = false;
        }
        let mut lemma = minimized;

        // Find the correct backtrack level:
        let backtrack_level = if lemma.len() == 1 {
            0
        } else {
            let mut max_i = 1;
            // Find the first literal assigned at the next-highest level:
            for i in 2..lemma.len() {
                if self.assignment.level(lemma[i].var()) > self.assignment.level(lemma[max_i].var()) {
                    max_i = i;
                }
            }
            // Swap-in this literal at index 1:
            lemma.swap(1, max_i);
            self.assignment.level(lemma[1].var())
        };

        trace!("learnt {:?}, backtrack to {}", lemma, backtrack_level);
        (lemma, backtrack_level)
    }

    /// A lemma literal is redundant when its reason consists of lemma literals
    /// and root-level literals only.
    fn is_redundant(&self, lit: Lit) -> bool {
        match self.assignment.reason(lit.var()) {
            None => false,
            Some(cref) => self.ca[cref]
                .iter()
                .skip(1)
                .all(|&q| self.seen[q.var()] || self.assignment.level(q.var()) == 0),
        }
    }

    fn cla_decay_activity(&mut self) {
        self.cla_inc *= 1.0 / self.cla_decay;
    }

    fn cla_bump_activity(&mut self, cref: ClauseRef) {
        let clause = &mut self.ca[cref];
        if !clause.is_learnt() {
            return;
        }

        clause.activity += self.cla_inc;

        // Rescale:
        if clause.activity > 1e20 {
            self.cla_inc *= 1e-20;
            for &cref in self.learnts.iter() {
                self.ca[cref].activity *= 1e-20;
            }
        }
    }

    /// Remove half of the learnt clauses, minus the binary and locked ones.
    fn reduce_db(&mut self) {
        let ca = &self.ca;
        let assignment = &self.assignment;

        self.learnts.sort_by(|&a, &b| {
            let (x, y) = (&ca[a], &ca[b]);
            (x.len() <= 2)
                .cmp(&(y.len() <= 2))
                .then(x.activity().total_cmp(&y.activity()))
        });

        let index_lim = self.learnts.len() / 2;
        let extra_lim = self.cla_inc / self.learnts.len() as f64; // Remove any clause below this activity

        let mut removed = Vec::new();
        let mut i = 0;
        self.learnts.retain(|&cref| {
            let c = &ca[cref];
            let locked = assignment.reason(c[0].var()) == Some(cref) && assignment.value(c[0]) == LBool::True;
            let keep = c.len() <= 2 || locked || (i >= index_lim && c.activity() >= extra_lim);
            i += 1;
            if !keep {
                removed.push(cref);
            }
            keep
        });

        for &cref in removed.iter() {
            self.ca[cref].mark_deleted();
        }
        let ca = &self.ca;
        self.watchlist.purge(|cref| ca[cref].is_deleted());
        for &cref in removed.iter() {
            self.ca.free(cref);
        }

        debug!("Removed {} learnt clauses, {} left", removed.len(), self.learnts.len());
    }
}
