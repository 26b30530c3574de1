use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::slice;

use super::Idx;

/// Dense vector indexed by [`Idx`] keys.
pub struct IdxVec<K: Idx, V> {
    vec: Vec<V>,
    phantom: PhantomData<K>,
}

impl<K: Idx, V> IdxVec<K, V> {
    pub const fn new() -> Self {
        Self {
            vec: Vec::new(),
            phantom: PhantomData,
        }
    }
}

impl<K: Idx, V> Default for IdxVec<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Idx, V> Debug for IdxVec<K, V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.vec.iter()).finish()
    }
}

impl<K: Idx, V> IdxVec<K, V> {
    /// Grow the vector (if necessary) so that `k` becomes a valid key.
    pub fn init(&mut self, k: K)
    where
        V: Default,
    {
        self.init_by(k, Default::default)
    }

    pub fn init_by<F>(&mut self, k: K, f: F)
    where
        F: FnMut() -> V,
    {
        let new_len = k.idx() + 1;
        if new_len > self.vec.len() {
            self.vec.resize_with(new_len, f);
        }
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn contains_key(&self, k: K) -> bool {
        k.idx() < self.vec.len()
    }

    pub fn clear(&mut self) {
        self.vec.clear();
    }

    pub fn fill_with<F>(&mut self, f: F)
    where
        F: FnMut() -> V,
    {
        self.vec.fill_with(f);
    }

    pub fn iter(&self) -> slice::Iter<V> {
        self.vec.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<V> {
        self.vec.iter_mut()
    }
}

// vec[key]
impl<K: Idx, V> Index<K> for IdxVec<K, V> {
    type Output = V;

    fn index(&self, k: K) -> &Self::Output {
        self.vec.index(k.idx())
    }
}

// vec[key] = (value)
impl<K: Idx, V> IndexMut<K> for IdxVec<K, V> {
    fn index_mut(&mut self, k: K) -> &mut Self::Output {
        self.vec.index_mut(k.idx())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::var::Var;

    #[test]
    fn test_init_grows() {
        let mut vec: IdxVec<Var, u32> = IdxVec::new();
        assert!(vec.is_empty());
        vec.init(Var::new(3));
        assert_eq!(vec.len(), 4);
        vec[Var::new(2)] = 42;
        assert_eq!(vec[Var::new(2)], 42);
        // Shrinking never happens:
        vec.init(Var::new(0));
        assert_eq!(vec.len(), 4);
    }
}
