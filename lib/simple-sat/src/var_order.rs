use tracing::debug;

use crate::idx::{VarHeap, VarVec};
use crate::lbool::LBool;
use crate::var::Var;

const DEFAULT_VAR_DECAY: f64 = 0.95;
const DEFAULT_VAR_INC: f64 = 1.0;

/// VSIDS variable order: max-heap of variables ordered by activity.
#[derive(Debug)]
pub struct VarOrder {
    pub(crate) activity: VarVec<f64>,
    order_heap: VarHeap,
    var_decay: f64,
    var_inc: f64,
}

impl VarOrder {
    pub fn new() -> Self {
        Self {
            activity: VarVec::new(),
            order_heap: VarHeap::new(),
            var_decay: DEFAULT_VAR_DECAY,
            var_inc: DEFAULT_VAR_INC,
        }
    }
}

impl Default for VarOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl VarOrder {
    /// Register a new variable with the given initial activity.
    pub fn init(&mut self, var: Var, activity: f64) {
        self.activity.init(var);
        self.activity[var] = activity;
        self.insert_var_order(var);
    }

    pub fn var_decay_activity(&mut self) {
        self.var_inc /= self.var_decay;
    }

    pub fn var_bump_activity(&mut self, var: Var) {
        let new = self.activity[var] + self.var_inc;
        self.activity[var] = new;

        // Rescale large activities, if necessary:
        if new > 1e100 {
            self.var_rescale_activity();
        }

        // Update `var` in heap:
        if self.order_heap.contains(&var) {
            self.order_heap.update_by(var, |&a, &b| self.activity[a] > self.activity[b]);
        }
    }

    fn var_rescale_activity(&mut self) {
        debug!("Rescaling activity");
        for a in self.activity.iter_mut() {
            *a *= 1e-100;
        }
        self.var_inc *= 1e-100;
    }

    pub fn insert_var_order(&mut self, var: Var) {
        self.order_heap.insert_by(var, |&a, &b| self.activity[a] > self.activity[b]);
    }

    /// Pop variables until an unassigned one is found.
    pub fn pick_branching_variable(&mut self, assignment: &VarVec<LBool>) -> Option<Var> {
        while let Some(var) = self.order_heap.pop_by(|&a, &b| self.activity[a] > self.activity[b]) {
            if assignment[var].is_undef() {
                return Some(var);
            }
        }
        None
    }

    pub fn clear(&mut self) {
        self.activity.clear();
        self.order_heap.clear();
        self.var_inc = DEFAULT_VAR_INC;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_most_active_unassigned() {
        let mut order = VarOrder::new();
        let mut assignment: VarVec<LBool> = VarVec::new();
        for v in 0..4 {
            let var = Var::new(v);
            order.init(var, 0.0);
            assignment.init(var);
        }
        order.var_bump_activity(Var::new(2));
        order.var_bump_activity(Var::new(2));
        order.var_bump_activity(Var::new(1));

        assignment[Var::new(2)] = LBool::True;
        assert_eq!(order.pick_branching_variable(&assignment), Some(Var::new(1)));
    }
}
