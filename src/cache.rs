use std::sync::Arc;

/// Monotonic version counter for one input of the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn bump(&mut self) {
        self.0 += 1;
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Single-slot cache that recomputes only when its key changes
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, Arc<V>)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Cached value for `key`, computing and storing it on a miss
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        if let Some((cached_key, value)) = &self.slot {
            if *cached_key == key {
                return Arc::clone(value);
            }
        }

        let value = Arc::new(compute());
        self.slot = Some((key, Arc::clone(&value)));
        value
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_cached(&self, key: &K) -> bool {
        self.slot.as_ref().is_some_and(|(k, _)| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_recomputes_on_key_change() {
        let mut memo: Memo<u64, String> = Memo::default();
        let mut calls = 0;

        let first = memo.get_or_compute(1, || {
            calls += 1;
            "a".to_string()
        });
        let again = memo.get_or_compute(1, || {
            calls += 1;
            "b".to_string()
        });
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(calls, 1);

        let changed = memo.get_or_compute(2, || {
            calls += 1;
            "c".to_string()
        });
        assert_eq!(*changed, "c");
        assert_eq!(calls, 2);
        assert!(memo.is_cached(&2));

        memo.clear();
        assert!(!memo.is_cached(&2));
    }

    #[test]
    fn test_generation_bump() {
        let mut generation = Generation::default();
        assert_eq!(generation.value(), 0);
        generation.bump();
        generation.bump();
        assert_eq!(generation.value(), 2);
    }
}
