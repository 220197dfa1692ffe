use std::collections::VecDeque;
use std::fmt;

/// Fixed-capacity stack. Pushing onto a full queue evicts the oldest entry,
/// so only the most recent `capacity` items survive.
pub struct CircularQueue<T> {
    deque: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> Clone for CircularQueue<T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque.clone(),
            capacity: self.capacity,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.deque.fmt(f)
    }
}

impl<T> CircularQueue<T> {
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            deque: VecDeque::with_capacity(cap),
            capacity: cap,
        }
    }

    /// Pushes `item` as the newest entry and returns whatever fell off the
    /// old end. With zero capacity the item itself is handed back.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }

        let evicted = if self.is_full() {
            self.deque.pop_back()
        } else {
            None
        };

        self.deque.push_front(item);

        evicted
    }

    /// Removes the newest entry.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.deque.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.deque.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn clear(&mut self) {
        self.deque.clear()
    }
}
