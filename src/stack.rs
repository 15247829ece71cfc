use crate::collection::Collection;
use crate::guard::{Cursor, Positional, Revision, Shared};

const KIND: &str = "ArrayStack";

/// 栈的存储，栈顶位于数组末尾，遍历从栈顶开始。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lifo<T>(Vec<T>);

impl<T: Clone> Positional for Lifo<T> {
    type Item = T;
    const KIND: &'static str = KIND;

    fn item_at(&self, position: usize) -> Option<T> {
        let index = self.0.len().checked_sub(position + 1)?;
        Some(self.0[index].clone())
    }
}

/// 基于数组的栈。
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayStack<T> {
    inner: Shared<Lifo<T>>,
}

impl<T> ArrayStack<T> {
    pub fn new() -> ArrayStack<T> {
        ArrayStack { inner: Shared::new(Lifo(Vec::new())) }
    }

    pub fn push(&mut self, value: T) {
        self.inner.write().0.push(value);
    }

    /// 依次压栈，最后一个元素位于栈顶，修订号只加一。
    pub fn push_all(&mut self, values: impl IntoIterator<Item = T>) {
        let mut data = self.inner.write();
        let before = data.0.len();
        data.0.extend(values);
        tracing::trace!(container = KIND, count = data.0.len() - before, "push_all");
    }

    pub fn pop(&mut self) -> Option<T> {
        self.inner.write().0.pop()
    }

    pub fn clear(&mut self) {
        self.inner.write().0.clear();
    }
}

impl<T: Clone> ArrayStack<T> {
    pub fn peek(&self) -> Option<T> {
        self.inner.read().0.last().cloned()
    }
}

impl<T: PartialEq> ArrayStack<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.inner.read().0.contains(value)
    }
}

impl<T: Clone + 'static> Collection for ArrayStack<T> {
    type Item = T;
    type Storage = Lifo<T>;

    fn count(&self) -> usize {
        self.inner.read().0.len()
    }

    fn revision(&self) -> Revision {
        self.inner.revision()
    }

    fn cursor(&self) -> Cursor<Lifo<T>> {
        self.inner.cursor()
    }
}

impl<T> Default for ArrayStack<T> {
    fn default() -> Self {
        ArrayStack::new()
    }
}

/// 按顺序压栈，最后一个元素位于栈顶。
impl<T> From<Vec<T>> for ArrayStack<T> {
    fn from(data: Vec<T>) -> Self {
        ArrayStack { inner: Shared::new(Lifo(data)) }
    }
}

impl<T> FromIterator<T> for ArrayStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ArrayStack::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Extend<T> for ArrayStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_all(iter);
    }
}

impl<T: Clone + 'static> IntoIterator for &ArrayStack<T> {
    type Item = T;
    type IntoIter = Cursor<Lifo<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_peek() {
        let mut stack = ArrayStack::new();
        stack.push(1);
        stack.push(2);
        assert_eq!(stack.peek(), Some(2));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.peek(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_iterates_from_top() {
        let stack = ArrayStack::from(vec![1, 2, 3]);
        assert_eq!(stack.to_vec(), vec![3, 2, 1]);
        assert_eq!(stack.peek(), Some(3));
        assert!(stack.contains(&1));
    }

    #[test]
    fn test_push_all_bumps_revision_once() {
        let mut stack: ArrayStack<i32> = ArrayStack::new();
        stack.push_all(vec![1, 2, 3]);
        assert_eq!(stack.revision(), 1);
        assert_eq!(stack.count(), 3);
        assert_eq!(stack.peek(), Some(3));
    }

    #[test]
    fn test_every_mutating_call_bumps_revision() {
        let mut stack: ArrayStack<i32> = ArrayStack::new();
        stack.pop();
        stack.clear();
        assert_eq!(stack.revision(), 2);
        stack.peek();
        assert_eq!(stack.revision(), 2);
    }

    #[test]
    #[should_panic(expected = "concurrent modification of `ArrayStack`")]
    fn test_pop_while_iterating() {
        let mut stack = ArrayStack::from(vec![1, 2, 3]);
        let mut cursor = stack.cursor();
        assert_eq!(cursor.next(), Some(3));
        stack.pop();
        cursor.next();
    }
}
