/// Handle of a clause stored in the [`ClauseAllocator`][crate::clause_allocator::ClauseAllocator].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ClauseRef(pub(crate) usize);
