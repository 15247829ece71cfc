use crate::collection::Collection;
use crate::err::CollErr;
use crate::guard::{Cursor, Positional, Revision, Shared};
use crate::CollRes;
use std::cmp::Ordering;
use std::ops::{Deref, DerefMut, Range};

const KIND: &str = "ArrayList";

/// 列表的存储，按下标顺序遍历。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Slots<T>(Vec<T>);

impl<T: Clone> Positional for Slots<T> {
    type Item = T;
    const KIND: &'static str = KIND;

    fn item_at(&self, position: usize) -> Option<T> {
        self.0.get(position).cloned()
    }
}

impl<T> Deref for Slots<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.0
    }
}

impl<T> DerefMut for Slots<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.0
    }
}

/// 基于数组的列表。
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayList<T> {
    inner: Shared<Slots<T>>,
}

impl<T> ArrayList<T> {
    pub fn new() -> ArrayList<T> {
        ArrayList { inner: Shared::new(Slots(Vec::new())) }
    }

    pub fn with_capacity(capacity: usize) -> ArrayList<T> {
        ArrayList { inner: Shared::new(Slots(Vec::with_capacity(capacity))) }
    }

    pub fn push(&mut self, value: T) {
        self.inner.write().push(value);
    }

    /// 追加全部元素，修订号只加一。
    pub fn append_all(&mut self, values: impl IntoIterator<Item = T>) {
        let mut data = self.inner.write();
        let before = data.len();
        data.extend(values);
        tracing::trace!(container = KIND, count = data.len() - before, "append_all");
    }

    pub fn prepend(&mut self, value: T) {
        self.inner.write().insert(0, value);
    }

    pub fn prepend_all(&mut self, values: impl IntoIterator<Item = T>) {
        let mut data = self.inner.write();
        let before = data.len();
        data.splice(0..0, values);
        tracing::trace!(container = KIND, count = data.len() - before, "prepend_all");
    }

    /// 在指定位置插入，`index == count` 时等价于追加。
    pub fn insert(&mut self, index: usize, value: T) -> CollRes<()> {
        self.check_insert_index(index)?;
        self.inner.write().insert(index, value);
        Ok(())
    }

    pub fn insert_all(&mut self, index: usize, values: impl IntoIterator<Item = T>) -> CollRes<()> {
        self.check_insert_index(index)?;
        let mut data = self.inner.write();
        let before = data.len();
        data.splice(index..index, values);
        tracing::trace!(container = KIND, count = data.len() - before, index, "insert_all");
        Ok(())
    }

    /// 替换指定位置的元素并返回旧值，越界时返回`None`且不修改。
    pub fn set(&mut self, index: usize, value: T) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        Some(std::mem::replace(&mut self.inner.write()[index], value))
    }

    /// 原地更新指定位置的元素，越界时返回`false`。
    pub fn update(&mut self, index: usize, f: impl FnOnce(&mut T)) -> bool {
        if index >= self.len() {
            return false;
        }
        f(&mut self.inner.write()[index]);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        Some(self.inner.write().remove(index))
    }

    pub fn remove_range(&mut self, range: Range<usize>) -> CollRes<()> {
        let count = self.len();
        if range.start > range.end || range.end > count {
            Err(CollErr::InvalidRange { container: KIND, start: range.start, end: range.end, count })?
        }
        self.inner.write().drain(range);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.inner.write().clear();
    }

    pub fn reverse(&mut self) {
        self.inner.write().reverse();
    }

    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.inner.write().sort();
    }

    pub fn sort_by(&mut self, compare: impl FnMut(&T, &T) -> Ordering) {
        self.inner.write().sort_by(compare);
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn check_insert_index(&self, index: usize) -> CollRes<()> {
        let count = self.len();
        if index > count {
            Err(CollErr::IndexOutOfRange { container: KIND, index, count })?
        }
        Ok(())
    }
}

impl<T: Clone> ArrayList<T> {
    /// 越界时返回`None`，上界是严格的：`index == count`同样越界。
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.read().get(index).cloned()
    }

    pub fn find_first(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.inner.read().iter().find(|item| predicate(item)).cloned()
    }

    pub fn find_last(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.inner.read().iter().rev().find(|item| predicate(item)).cloned()
    }
}

impl<T: PartialEq> ArrayList<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.inner.read().contains(value)
    }

    pub fn find_first_index(&self, value: &T) -> Option<usize> {
        self.inner.read().iter().position(|item| item == value)
    }

    pub fn find_last_index(&self, value: &T) -> Option<usize> {
        self.inner.read().iter().rposition(|item| item == value)
    }
}

impl<T: Clone + 'static> Collection for ArrayList<T> {
    type Item = T;
    type Storage = Slots<T>;

    fn count(&self) -> usize {
        self.len()
    }

    fn revision(&self) -> Revision {
        self.inner.revision()
    }

    fn cursor(&self) -> Cursor<Slots<T>> {
        self.inner.cursor()
    }
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        ArrayList::new()
    }
}

impl<T> From<Vec<T>> for ArrayList<T> {
    fn from(data: Vec<T>) -> Self {
        ArrayList { inner: Shared::new(Slots(data)) }
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ArrayList::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Extend<T> for ArrayList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.append_all(iter);
    }
}

impl<T: Clone + 'static> IntoIterator for &ArrayList<T> {
    type Item = T;
    type IntoIter = Cursor<Slots<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}
