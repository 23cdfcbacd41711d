//! Fixed-capacity pools of reusable actors
//!
//! Slots are allocated once and never grow or shrink. Acquiring scans for the
//! first idle slot in order; an exhausted pool simply yields nothing.

/// Something that can sit idle in a pool until it is activated again
pub trait Reusable {
    fn is_idle(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<T>,
}

impl<T: Reusable> Pool<T> {
    /// Build `capacity` slots up front
    pub fn new(capacity: usize, mut make: impl FnMut() -> T) -> Self {
        Self {
            slots: (0..capacity).map(|_| make()).collect(),
        }
    }

    /// Index of the first idle slot
    fn first_idle(&self) -> Option<usize> {
        self.slots.iter().position(Reusable::is_idle)
    }

    /// First idle slot, mutably, for activation
    pub fn acquire(&mut self) -> Option<(usize, &mut T)> {
        let index = self.first_idle()?;
        Some((index, &mut self.slots[index]))
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_idle()).count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Slot {
        busy: bool,
    }

    impl Reusable for Slot {
        fn is_idle(&self) -> bool {
            !self.busy
        }
    }

    #[test]
    fn test_acquire_takes_first_idle_in_order() {
        let mut pool = Pool::new(3, Slot::default);
        pool.get_mut(0).unwrap().busy = true;

        let (index, slot) = pool.acquire().unwrap();
        assert_eq!(index, 1);
        slot.busy = true;
        assert_eq!(pool.first_idle(), Some(2));
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_exhausted_pool_yields_nothing() {
        let mut pool = Pool::new(2, || Slot { busy: true });
        assert!(pool.acquire().is_none());
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.active_count(), 2);
    }
}
