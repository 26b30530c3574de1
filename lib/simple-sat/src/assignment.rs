use std::ops::Index;

use crate::cref::ClauseRef;
use crate::idx::VarVec;
use crate::lbool::LBool;
use crate::lit::Lit;
use crate::var::Var;

#[derive(Debug, Copy, Clone, Default)]
pub struct VarData {
    pub(crate) reason: Option<ClauseRef>,
    pub(crate) level: usize,
}

/// Partial assignment together with the trail of assigned literals.
#[derive(Debug)]
pub struct Assignment {
    pub(crate) assignment: VarVec<LBool>, // {var: value}
    pub(crate) var_data: VarVec<VarData>, // {var: {reason,level}}
    pub(crate) trail: Vec<Lit>,
    pub(crate) trail_lim: Vec<usize>,
    pub(crate) qhead: usize,
}

impl Assignment {
    pub const fn new() -> Self {
        Self {
            assignment: VarVec::new(),
            var_data: VarVec::new(),
            trail: vec![],
            trail_lim: vec![],
            qhead: 0,
        }
    }
}

impl Default for Assignment {
    fn default() -> Self {
        Self::new()
    }
}

// assignment[var]
impl Index<Var> for Assignment {
    type Output = LBool;

    fn index(&self, var: Var) -> &Self::Output {
        self.assignment.index(var)
    }
}

impl Assignment {
    pub fn init(&mut self, var: Var) {
        self.assignment.init(var);
        self.var_data.init(var);
    }

    pub fn value_var(&self, var: Var) -> LBool {
        self.assignment[var]
    }
    pub fn value(&self, lit: Lit) -> LBool {
        self.assignment[lit.var()] ^ lit.negated()
    }

    pub fn reason(&self, var: Var) -> Option<ClauseRef> {
        self.var_data[var].reason
    }
    pub fn level(&self, var: Var) -> usize {
        self.var_data[var].level
    }

    pub fn num_assigned(&self) -> usize {
        self.trail.len()
    }

    pub fn decision_level(&self) -> usize {
        self.trail_lim.len()
    }
    pub fn new_decision_level(&mut self) {
        self.trail_lim.push(self.trail.len());
    }

    pub fn unchecked_enqueue(&mut self, lit: Lit, reason: Option<ClauseRef>) {
        debug_assert_eq!(self.value(lit), LBool::Undef);

        self.assignment[lit.var()] = LBool::from(!lit.negated());
        self.var_data[lit.var()] = VarData {
            reason,
            level: self.decision_level(),
        };
        self.trail.push(lit);
    }

    pub fn dequeue(&mut self) -> Option<Lit> {
        if self.qhead < self.trail.len() {
            let p = self.trail[self.qhead];
            self.qhead += 1;
            Some(p)
        } else {
            None
        }
    }

    /// Mark the propagation queue as fully processed.
    pub fn skip_queue(&mut self) {
        self.qhead = self.trail.len();
    }

    /// Undo all assignments above `level`, returning them (most recent first)
    /// to the caller through `on_unassign`.
    pub fn cancel_until<F>(&mut self, level: usize, mut on_unassign: F)
    where
        F: FnMut(Lit),
    {
        if self.decision_level() > level {
            let lim = self.trail_lim[level];
            for &lit in self.trail[lim..].iter().rev() {
                self.assignment[lit.var()] = LBool::Undef;
                on_unassign(lit);
            }
            self.qhead = lim;
            self.trail.truncate(lim);
            self.trail_lim.truncate(level);
        }
    }

    pub fn clear(&mut self) {
        self.assignment.clear();
        self.var_data.clear();
        self.trail.clear();
        self.trail_lim.clear();
        self.qhead = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_and_cancel() {
        let mut assignment = Assignment::new();
        for v in 0..3 {
            assignment.init(Var::new(v));
        }
        let a = Lit::positive(Var::new(0));
        let b = Lit::positive(Var::new(1));
        let c = Lit::positive(Var::new(2));

        assignment.unchecked_enqueue(a, None);
        assignment.new_decision_level();
        assignment.unchecked_enqueue(!b, None);
        assignment.unchecked_enqueue(c, None);
        assert_eq!(assignment.value(b), LBool::False);
        assert_eq!(assignment.level(c.var()), 1);
        assert_eq!(assignment.num_assigned(), 3);

        let mut undone = Vec::new();
        assignment.cancel_until(0, |lit| undone.push(lit));
        assert_eq!(undone, vec![c, !b]);
        assert_eq!(assignment.decision_level(), 0);
        assert_eq!(assignment.value(a), LBool::True);
        assert_eq!(assignment.value(b), LBool::Undef);
    }
}
