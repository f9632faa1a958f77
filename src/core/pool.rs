//! Object recycling with reset-on-release
//!
//! A [`Pool`] keeps a free list of previously used values. Values are moved
//! in and out by ownership, so a caller cannot keep using a value it handed
//! back, and [`Pool::put`] resets every value before it becomes reachable
//! again. A pooled value never carries data from its previous owner.

use parking_lot::Mutex;
use std::fmt;

/// Default number of idle values a pool keeps before dropping returns.
pub const DEFAULT_MAX_IDLE: usize = 1024;

/// Values that can be cleared for reuse.
pub trait Reset {
    fn reset(&mut self);
}

impl<T: Reset + ?Sized> Reset for Box<T> {
    fn reset(&mut self) {
        (**self).reset();
    }
}

pub struct Pool<T> {
    free: Mutex<Vec<T>>,
    create: fn() -> T,
    max_idle: usize,
}

impl<T: Reset> Pool<T> {
    /// Create an empty pool that builds new values with `create`.
    pub const fn new(create: fn() -> T) -> Self {
        Self::with_max_idle(create, DEFAULT_MAX_IDLE)
    }

    /// Create an empty pool that keeps at most `max_idle` values around.
    pub const fn with_max_idle(create: fn() -> T, max_idle: usize) -> Self {
        Self {
            free: parking_lot::const_mutex(Vec::new()),
            create,
            max_idle,
        }
    }

    /// Take a reset value from the free list, or build a fresh one.
    pub fn get(&self) -> T {
        let reused = self.free.lock().pop();
        reused.unwrap_or_else(self.create)
    }

    /// Reset `value` and return it to the free list.
    ///
    /// When the free list is full the value is dropped instead.
    pub fn put(&self, mut value: T) {
        value.reset();
        let mut free = self.free.lock();
        if free.len() < self.max_idle {
            free.push(value);
        }
    }

    /// Number of values currently waiting for reuse.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("idle", &self.free.lock().len())
            .field("max_idle", &self.max_idle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[derive(Default)]
    struct Slot {
        name: String,
        hits: u32,
    }

    impl Reset for Slot {
        fn reset(&mut self) {
            self.name.clear();
            self.hits = 0;
        }
    }

    #[test]
    fn test_get_builds_when_empty() {
        let pool: Pool<Slot> = Pool::new(Slot::default);
        assert_eq!(pool.idle(), 0);

        let slot = pool.get();
        assert!(slot.name.is_empty());
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_put_resets_before_reuse() {
        let pool: Pool<Slot> = Pool::new(Slot::default);

        let mut slot = pool.get();
        slot.name.push_str("previous owner");
        slot.hits = 7;
        let capacity = slot.name.capacity();
        pool.put(slot);
        assert_eq!(pool.idle(), 1);

        let slot = pool.get();
        assert!(slot.name.is_empty());
        assert_eq!(slot.hits, 0);
        // Same allocation handed back
        assert_eq!(slot.name.capacity(), capacity);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_max_idle_drops_extra_values() {
        let pool: Pool<Slot> = Pool::with_max_idle(Slot::default, 2);
        for _ in 0..5 {
            pool.put(Slot::default());
        }
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn test_boxed_values_reset_through_box() {
        let pool: Pool<Box<Slot>> = Pool::new(|| Box::new(Slot::default()));
        let mut slot = pool.get();
        slot.hits = 3;
        pool.put(slot);
        assert_eq!(pool.get().hits, 0);
    }

    #[test]
    fn test_concurrent_get_put() {
        let pool: Arc<Pool<Slot>> = Arc::new(Pool::new(Slot::default));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let mut slot = pool.get();
                        assert!(slot.name.is_empty());
                        assert_eq!(slot.hits, 0);
                        slot.name.push_str("worker");
                        slot.hits = i;
                        pool.put(slot);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(pool.idle() <= 8);
    }
}
