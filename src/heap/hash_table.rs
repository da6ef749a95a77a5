use std::{
    collections::hash_map::RandomState,
    fmt::{self, Debug, Display},
    hash::{BuildHasher, Hash},
    mem,
};

/// Bucket count used by [`HashTable::new`].
pub const DEFAULT_CAPACITY: usize = 17;
/// The bucket array doubles once `len / capacity` exceeds this.
pub const MAX_LOAD_FACTOR: f64 = 0.8;

type Link<K, V> = Option<Box<Pair<K, V>>>;

struct Pair<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

/// A hash map resolving collisions by separate chaining.
///
/// Each bucket is a singly linked chain of key/value pairs. Inserting past
/// a load factor of [`MAX_LOAD_FACTOR`] doubles the bucket array and
/// rehashes every pair into it.
pub struct HashTable<K, V, S = RandomState> {
    buckets: Vec<Link<K, V>>,
    len: usize,
    hasher: S,
}

impl<K: Hash + Eq, V> HashTable<K, V, RandomState> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K: Hash + Eq, V> Default for HashTable<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            len: 0,
            hasher,
        }
    }

    /// Number of key/value mappings held.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let mut cursor = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(pair) = cursor {
            if pair.key == *key {
                return Some(&pair.value);
            }
            cursor = pair.next.as_deref();
        }
        None
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key);
        let mut cursor = self.buckets[index].as_deref_mut();
        while let Some(pair) = cursor {
            if pair.key == *key {
                return Some(&mut pair.value);
            }
            cursor = pair.next.as_deref_mut();
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Maps `key` to `value`, returning the value it replaced.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(mem::replace(slot, value));
        }
        let index = self.bucket_index(&key);
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Pair { key, value, next }));
        self.len += 1;
        self.grow_if_needed();
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }
        let index = self.bucket_index(key);
        let mut chain = self.buckets[index].take();
        let mut removed = None;
        while let Some(mut pair) = chain {
            chain = pair.next.take();
            if removed.is_none() && pair.key == *key {
                removed = Some(pair.value);
            } else {
                pair.next = self.buckets[index].take();
                self.buckets[index] = Some(pair);
            }
        }
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn bucket_index(&self, key: &K) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    fn grow_if_needed(&mut self) {
        if self.load_factor() <= MAX_LOAD_FACTOR {
            return;
        }
        let doubled = empty_buckets(self.buckets.len() * 2);
        let old_buckets = mem::replace(&mut self.buckets, doubled);
        debug!(
            "rehashing {} pairs from {} into {} buckets",
            self.len,
            old_buckets.len(),
            self.buckets.len()
        );
        for mut chain in old_buckets {
            while let Some(mut pair) = chain {
                chain = pair.next.take();
                let index = self.bucket_index(&pair.key);
                pair.next = self.buckets[index].take();
                self.buckets[index] = Some(pair);
            }
        }
    }
}

impl<K: Display, V: Display, S> HashTable<K, V, S> {
    /// Logs every bucket chain at debug level.
    pub fn dump(&self) {
        debug!("{self}");
    }
}

impl<K: Display, V: Display, S> Display for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table size: {} capacity: {}", self.len, self.buckets.len())?;
        for (i, bucket) in self.buckets.iter().enumerate() {
            write!(f, "{i}: --")?;
            let mut cursor = bucket.as_deref();
            while let Some(pair) = cursor {
                write!(f, ">({}, {})--", pair.key, pair.value)?;
                cursor = pair.next.as_deref();
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

impl<K: Debug, V: Debug, S> Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for bucket in &self.buckets {
            let mut cursor = bucket.as_deref();
            while let Some(pair) = cursor {
                map.entry(&pair.key, &pair.value);
                cursor = pair.next.as_deref();
            }
        }
        map.finish()
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Link<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, || None);
    buckets
}
