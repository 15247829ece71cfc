use crate::collection::Collection;
use crate::guard::{Cursor, Positional, Revision, Shared};
use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};

const KIND: &str = "Queue";

/// 队列的存储，遍历从队首开始。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fifo<T>(VecDeque<T>);

impl<T: Clone> Positional for Fifo<T> {
    type Item = T;
    const KIND: &'static str = KIND;

    fn item_at(&self, position: usize) -> Option<T> {
        self.0.get(position).cloned()
    }
}

impl<T> Deref for Fifo<T> {
    type Target = VecDeque<T>;

    fn deref(&self) -> &VecDeque<T> {
        &self.0
    }
}

impl<T> DerefMut for Fifo<T> {
    fn deref_mut(&mut self) -> &mut VecDeque<T> {
        &mut self.0
    }
}

/// 先进先出队列，遍历从队首开始。
#[derive(Debug, Clone, PartialEq)]
pub struct Queue<T> {
    inner: Shared<Fifo<T>>,
}

impl<T> Queue<T> {
    pub fn new() -> Queue<T> {
        Queue { inner: Shared::new(Fifo(VecDeque::new())) }
    }

    pub fn with_capacity(capacity: usize) -> Queue<T> {
        Queue { inner: Shared::new(Fifo(VecDeque::with_capacity(capacity))) }
    }

    pub fn enqueue(&mut self, value: T) {
        self.inner.write().push_back(value);
    }

    pub fn enqueue_all(&mut self, values: impl IntoIterator<Item = T>) {
        let mut data = self.inner.write();
        let before = data.len();
        data.extend(values);
        tracing::trace!(container = KIND, count = data.len() - before, "enqueue_all");
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.inner.write().pop_front()
    }

    pub fn clear(&mut self) {
        self.inner.write().clear();
    }
}

impl<T: Clone> Queue<T> {
    pub fn peek(&self) -> Option<T> {
        self.inner.read().front().cloned()
    }
}

impl<T: PartialEq> Queue<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.inner.read().contains(value)
    }
}

impl<T: Clone + 'static> Collection for Queue<T> {
    type Item = T;
    type Storage = Fifo<T>;

    fn count(&self) -> usize {
        self.inner.read().len()
    }

    fn revision(&self) -> Revision {
        self.inner.revision()
    }

    fn cursor(&self) -> Cursor<Fifo<T>> {
        self.inner.cursor()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Queue::new()
    }
}

impl<T> From<Vec<T>> for Queue<T> {
    fn from(data: Vec<T>) -> Self {
        Queue { inner: Shared::new(Fifo(VecDeque::from(data))) }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Queue { inner: Shared::new(Fifo(iter.into_iter().collect())) }
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.enqueue_all(iter);
    }
}

impl<T: Clone + 'static> IntoIterator for &Queue<T> {
    type Item = T;
    type IntoIter = Cursor<Fifo<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}
