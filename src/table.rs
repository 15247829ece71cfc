use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::hash::Hash;

/// 按插入顺序存放的散列表。
///
/// 条目连续存放以支持按位置遍历，删除时用最后一个条目填补空位。
#[derive(Debug, Clone)]
pub struct Table<K, V> {
    entries: Vec<(K, V)>,
    index: FxHashMap<K, usize>,
}

impl<K, V> Table<K, V> {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entry_at(&self, position: usize) -> Option<&(K, V)> {
        self.entries.get(position)
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.entries.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

impl<K: Hash + Eq + Clone, V> Table<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Table<K, V> {
        Table {
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = *self.index.get(key)?;
        Some(&mut self.entries[i].1)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// 插入或替换，返回旧值。替换不改变条目位置。
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = self.index.remove(key)?;
        let removed = self.entries.swap_remove(i);
        if let Some((moved, _)) = self.entries.get(i) {
            self.index.insert(moved.clone(), i);
        }
        Some(removed)
    }
}

impl<K: Hash + Eq + Clone, V> Default for Table<K, V> {
    fn default() -> Self {
        Table { entries: Vec::new(), index: FxHashMap::default() }
    }
}

/// 与插入顺序无关。
impl<K: Hash + Eq + Clone, V: PartialEq> PartialEq for Table<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut table = Table::default();
        assert_eq!(table.insert("b", 2), None);
        assert_eq!(table.insert("a", 1), None);
        assert_eq!(table.insert("b", 20), Some(2));
        assert_eq!(table.iter().cloned().collect::<Vec<_>>(), vec![("b", 20), ("a", 1)]);
        assert_eq!(table.get("a"), Some(&1));
        assert_eq!(table.get("c"), None);
    }

    #[test]
    fn test_remove_fills_hole_with_last() {
        let mut table: Table<String, i32> = Table::with_capacity(4);
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            table.insert(key.to_string(), i as i32);
        }
        assert_eq!(table.remove("b"), Some(("b".to_string(), 1)));
        assert_eq!(table.entry_at(1), Some(&("d".to_string(), 3)));
        assert_eq!(table.get("d"), Some(&3));
        assert_eq!(table.remove("d"), Some(("d".to_string(), 3)));
        assert_eq!(table.remove("d"), None);
        assert_eq!(table.len(), 2);
        assert!(table.contains_key("c"));
    }

    #[test]
    fn test_remove_last_entry() {
        let mut table = Table::default();
        table.insert(1, "x");
        table.insert(2, "y");
        assert_eq!(table.remove(&2), Some((2, "y")));
        assert_eq!(table.get(&1), Some(&"x"));
        assert_eq!(table.entry_at(1), None);
    }

    #[test]
    fn test_eq_ignores_order() {
        let mut left = Table::default();
        left.insert(1, 'a');
        left.insert(2, 'b');
        let mut right = Table::default();
        right.insert(2, 'b');
        right.insert(1, 'a');
        assert_eq!(left, right);
        if let Some(v) = right.get_mut(&1) {
            *v = 'z';
        }
        assert_ne!(left, right);
    }
}
