/// A value paired with its priority, as stored in the heap's array.
///
/// Priority changes replace the whole entry rather than mutating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<V, P> {
    pub value: V,
    pub priority: P,
}

impl<V, P> Entry<V, P> {
    pub fn new(value: V, priority: P) -> Self {
        Self { value, priority }
    }

    pub fn into_pair(self) -> (V, P) {
        (self.value, self.priority)
    }
}
