use crate::collection::Collection;
use crate::guard::{Cursor, Positional, Revision, Shared};
use crate::table::Table;
use std::borrow::Borrow;
use std::hash::Hash;

const KIND: &str = "HashSet";

/// 集合的存储，只使用散列表的键。
#[derive(Debug, Clone)]
pub struct Keys<T>(Table<T, ()>);

impl<T: Clone> Positional for Keys<T> {
    type Item = T;
    const KIND: &'static str = KIND;

    fn item_at(&self, position: usize) -> Option<T> {
        self.0.entry_at(position).map(|(key, _)| key.clone())
    }
}

impl<T: Hash + Eq + Clone> PartialEq for Keys<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

#[derive(Debug, Clone)]
pub struct HashSet<T> {
    inner: Shared<Keys<T>>,
}

impl<T: Hash + Eq + Clone> HashSet<T> {
    pub fn new() -> HashSet<T> {
        HashSet { inner: Shared::new(Keys(Table::default())) }
    }

    pub fn with_capacity(capacity: usize) -> HashSet<T> {
        HashSet { inner: Shared::new(Keys(Table::with_capacity(capacity))) }
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().0.contains_key(value)
    }

    /// 包含给定的全部元素，空参数总是满足。
    pub fn contains_all<'a>(&self, values: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        let keys = self.inner.read();
        values.into_iter().all(|value| keys.0.contains_key(value))
    }

    /// 新加入时返回`true`，已存在时保持原元素不变。
    pub fn put(&mut self, value: T) -> bool {
        let mut keys = self.inner.write();
        if keys.0.contains_key(&value) {
            return false;
        }
        keys.0.insert(value, ());
        true
    }

    /// 批量加入，修订号只加一。
    pub fn put_all(&mut self, values: impl IntoIterator<Item = T>) {
        let mut keys = self.inner.write();
        let before = keys.0.len();
        for value in values {
            if !keys.0.contains_key(&value) {
                keys.0.insert(value, ());
            }
        }
        tracing::trace!(container = KIND, added = keys.0.len() - before, "put_all");
    }

    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().0.remove(value).map(|(key, _)| key)
    }

    pub fn clear(&mut self) {
        self.inner.write().0.clear();
    }
}

impl<T: Hash + Eq + Clone + 'static> Collection for HashSet<T> {
    type Item = T;
    type Storage = Keys<T>;

    fn count(&self) -> usize {
        self.inner.read().0.len()
    }

    fn revision(&self) -> Revision {
        self.inner.revision()
    }

    fn cursor(&self) -> Cursor<Keys<T>> {
        self.inner.cursor()
    }
}

impl<T: Hash + Eq + Clone> PartialEq for HashSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Hash + Eq + Clone> Default for HashSet<T> {
    fn default() -> Self {
        HashSet::new()
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Table::default();
        for value in iter {
            if !table.contains_key(&value) {
                table.insert(value, ());
            }
        }
        HashSet { inner: Shared::new(Keys(table)) }
    }
}

impl<T: Hash + Eq + Clone> Extend<T> for HashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<T: Hash + Eq + Clone + 'static> IntoIterator for &HashSet<T> {
    type Item = T;
    type IntoIter = Cursor<Keys<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}
