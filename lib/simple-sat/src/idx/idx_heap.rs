use std::fmt::{Debug, Formatter};

use super::Idx;

/// Binary heap over dense keys, with position tracking.
///
/// The ordering is not stored in the heap itself: every mutating operation
/// accepts a `before(a, b)` predicate, which must return `true` iff `a` has
/// a strictly higher priority than `b`.
pub struct IdxHeap<K: Idx> {
    heap: Vec<K>,
    positions: Vec<Option<usize>>,
}

impl<K: Idx> IdxHeap<K> {
    pub const fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: Vec::new(),
        }
    }
}

impl<K: Idx> Default for IdxHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Idx + Debug> Debug for IdxHeap<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.heap.iter()).finish()
    }
}

impl<K: Idx> IdxHeap<K> {
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, k: &K) -> bool {
        matches!(self.positions.get(k.idx()), Some(Some(_)))
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.heap.iter()
    }

    pub fn insert_by<F>(&mut self, k: K, before: F)
    where
        F: Fn(&K, &K) -> bool,
    {
        if self.contains(&k) {
            return;
        }
        if k.idx() >= self.positions.len() {
            self.positions.resize(k.idx() + 1, None);
        }
        let pos = self.heap.len();
        self.heap.push(k);
        self.positions[k.idx()] = Some(pos);
        self.sift_up(pos, &before);
    }

    /// Restore the heap property after the priority of `k` has increased.
    pub fn update_by<F>(&mut self, k: K, before: F)
    where
        F: Fn(&K, &K) -> bool,
    {
        if let Some(Some(pos)) = self.positions.get(k.idx()).copied() {
            self.sift_up(pos, &before);
        }
    }

    pub fn pop_by<F>(&mut self, before: F) -> Option<K>
    where
        F: Fn(&K, &K) -> bool,
    {
        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            self.positions[last.idx()] = None;
            return Some(last);
        }
        let top = std::mem::replace(&mut self.heap[0], last);
        self.positions[top.idx()] = None;
        self.positions[last.idx()] = Some(0);
        self.sift_down(0, &before);
        Some(top)
    }

    fn sift_up<F>(&mut self, mut pos: usize, before: &F)
    where
        F: Fn(&K, &K) -> bool,
    {
        let k = self.heap[pos];
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !before(&k, &self.heap[parent]) {
                break;
            }
            self.heap[pos] = self.heap[parent];
            self.positions[self.heap[pos].idx()] = Some(pos);
            pos = parent;
        }
        self.heap[pos] = k;
        self.positions[k.idx()] = Some(pos);
    }

    fn sift_down<F>(&mut self, mut pos: usize, before: &F)
    where
        F: Fn(&K, &K) -> bool,
    {
        let k = self.heap[pos];
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && before(&self.heap[right], &self.heap[left]) {
                right
            } else {
                left
            };
            if !before(&self.heap[child], &k) {
                break;
            }
            self.heap[pos] = self.heap[child];
            self.positions[self.heap[pos].idx()] = Some(pos);
            pos = child;
        }
        self.heap[pos] = k;
        self.positions[k.idx()] = Some(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::var::Var;

    #[test]
    fn test_heap_pops_in_priority_order() {
        let prio = [3.0, 1.0, 4.0, 1.5, 5.0, 9.0, 2.0];
        let before = |a: &Var, b: &Var| prio[a.index()] > prio[b.index()];

        let mut heap = IdxHeap::new();
        for i in 0..prio.len() {
            heap.insert_by(Var::new(i as u32), before);
        }
        assert_eq!(heap.len(), prio.len());
        assert!(heap.contains(&Var::new(4)));

        let mut popped = Vec::new();
        while let Some(var) = heap.pop_by(before) {
            assert!(!heap.contains(&var));
            popped.push(var.index());
        }
        assert_eq!(popped, vec![5, 4, 2, 0, 6, 3, 1]);
    }

    #[test]
    fn test_heap_update_after_bump() {
        let mut prio = vec![1.0, 2.0, 3.0];
        let mut heap = IdxHeap::new();
        for i in 0..3 {
            heap.insert_by(Var::new(i), |a: &Var, b: &Var| prio[a.index()] > prio[b.index()]);
        }
        prio[0] = 10.0;
        heap.update_by(Var::new(0), |a: &Var, b: &Var| prio[a.index()] > prio[b.index()]);
        assert_eq!(heap.pop_by(|a: &Var, b: &Var| prio[a.index()] > prio[b.index()]), Some(Var::new(0)));
    }

    #[test]
    fn test_heap_double_insert_is_noop() {
        let before = |a: &Var, b: &Var| a.index() < b.index();
        let mut heap = IdxHeap::new();
        heap.insert_by(Var::new(1), before);
        heap.insert_by(Var::new(1), before);
        assert_eq!(heap.len(), 1);
    }
}
