use crate::collection::Collection;
use crate::err::CollErr;
use crate::guard::{Cursor, Positional, Revision, Shared};
use crate::table::Table;
use crate::CollRes;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

const KIND: &str = "HashMap";

/// 散列表的存储，按插入顺序遍历键值对。
#[derive(Debug, Clone)]
pub struct Entries<K, V>(Table<K, V>);

impl<K: Clone, V: Clone> Positional for Entries<K, V> {
    type Item = (K, V);
    const KIND: &'static str = KIND;

    fn item_at(&self, position: usize) -> Option<(K, V)> {
        self.0.entry_at(position).cloned()
    }
}

impl<K: Hash + Eq + Clone, V: PartialEq> PartialEq for Entries<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K, V> Deref for Entries<K, V> {
    type Target = Table<K, V>;

    fn deref(&self) -> &Table<K, V> {
        &self.0
    }
}

impl<K, V> DerefMut for Entries<K, V> {
    fn deref_mut(&mut self) -> &mut Table<K, V> {
        &mut self.0
    }
}

/// 散列表，遍历顺序为插入顺序，删除条目会把最后一个条目移到空位上。
#[derive(Debug, Clone)]
pub struct HashMap<K, V> {
    inner: Shared<Entries<K, V>>,
}

impl<K: Hash + Eq + Clone, V> HashMap<K, V> {
    pub fn new() -> HashMap<K, V> {
        HashMap { inner: Shared::new(Entries(Table::default())) }
    }

    pub fn with_capacity(capacity: usize) -> HashMap<K, V> {
        HashMap { inner: Shared::new(Entries(Table::with_capacity(capacity))) }
    }

    /// 从键值对创建，键不允许重复。
    pub fn of(pairs: impl IntoIterator<Item = (K, V)>) -> CollRes<HashMap<K, V>>
    where
        K: Debug,
    {
        let mut table = Table::default();
        for (key, value) in pairs {
            if table.contains_key(&key) {
                Err(CollErr::DuplicateKey { container: KIND, key: format!("{key:?}") })?
            }
            table.insert(key, value);
        }
        Ok(HashMap { inner: Shared::new(Entries(table)) })
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains_key(key)
    }

    /// 写入并返回旧值，无论键是否已存在修订号都加一。
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// 批量写入，修订号只加一。
    pub fn put_all(&mut self, pairs: impl IntoIterator<Item = (K, V)>) {
        let mut table = self.inner.write();
        let mut count = 0usize;
        for (key, value) in pairs {
            table.insert(key, value);
            count += 1;
        }
        tracing::trace!(container = KIND, count, "put_all");
    }

    /// 键存在时原地更新，不存在时先用`init`创建再更新。
    pub fn upsert(&mut self, key: K, init: impl FnOnce() -> V, update: impl FnOnce(&mut V)) {
        let mut table = self.inner.write();
        if let Some(value) = table.get_mut(&key) {
            update(value);
        } else {
            let mut value = init();
            update(&mut value);
            table.insert(key, value);
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().remove(key).map(|(_, value)| value)
    }

    pub fn clear(&mut self) {
        self.inner.write().clear();
    }

    pub fn keys(&self) -> Vec<K> {
        self.inner.read().iter().map(|(key, _)| key.clone()).collect()
    }
}

impl<K: Hash + Eq + Clone, V: Clone> HashMap<K, V> {
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().get(key).cloned()
    }

    pub fn find(&self, mut predicate: impl FnMut(&K, &V) -> bool) -> Option<(K, V)> {
        self.inner.read().iter().find(|(key, value)| predicate(key, value)).cloned()
    }

    pub fn values(&self) -> Vec<V> {
        self.inner.read().iter().map(|(_, value)| value.clone()).collect()
    }
}

impl<K: Hash + Eq + Clone + 'static, V: Clone + 'static> Collection for HashMap<K, V> {
    type Item = (K, V);
    type Storage = Entries<K, V>;

    fn count(&self) -> usize {
        self.inner.read().len()
    }

    fn revision(&self) -> Revision {
        self.inner.revision()
    }

    fn cursor(&self) -> Cursor<Entries<K, V>> {
        self.inner.cursor()
    }
}

impl<K: Hash + Eq + Clone, V: PartialEq> PartialEq for HashMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Hash + Eq + Clone, V> Default for HashMap<K, V> {
    fn default() -> Self {
        HashMap::new()
    }
}

/// 重复的键保留最后一个值。
impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for HashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Table::default();
        for (key, value) in iter {
            table.insert(key, value);
        }
        HashMap { inner: Shared::new(Entries(table)) }
    }
}

impl<K: Hash + Eq + Clone, V> Extend<(K, V)> for HashMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<K: Hash + Eq + Clone + 'static, V: Clone + 'static> IntoIterator for &HashMap<K, V> {
    type Item = (K, V);
    type IntoIter = Cursor<Entries<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}
