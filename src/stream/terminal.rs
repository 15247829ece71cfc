use super::{Collector, Stream};
use crate::list::ArrayList;
use crate::num::Float;
use std::cmp::Ordering;
use std::iter::{Product, Sum};

impl<T: 'static> Stream<T> {
    /// 严格的左折叠，消耗整个流。
    pub fn fold<R>(mut self, initial: R, mut op: impl FnMut(R, T) -> R) -> R {
        let mut acc = initial;
        while let Some(item) = self.pull() {
            acc = op(acc, item);
        }
        acc
    }

    /// 以第一个元素为初始值折叠，空流返回`None`。
    pub fn reduce(mut self, op: impl FnMut(T, T) -> T) -> Option<T> {
        let first = self.pull()?;
        Some(self.fold(first, op))
    }

    pub fn for_each(self, mut action: impl FnMut(T)) {
        self.fold((), |(), item| action(item))
    }

    pub fn count(self) -> usize {
        self.fold(0, |count, _| count + 1)
    }

    /// 最多拉取一个元素。
    pub fn is_empty(mut self) -> bool {
        self.pull().is_none()
    }

    pub fn contains(self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.any_match(|item| item == value)
    }

    /// 遇到第一个不满足的元素即返回。
    pub fn all_match(mut self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        while let Some(item) = self.pull() {
            if !predicate(&item) {
                return false;
            }
        }
        true
    }

    /// 遇到第一个满足的元素即返回。
    pub fn any_match(mut self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        while let Some(item) = self.pull() {
            if predicate(&item) {
                return true;
            }
        }
        false
    }

    pub fn none_match(self, predicate: impl FnMut(&T) -> bool) -> bool {
        !self.any_match(predicate)
    }

    pub fn max(self) -> Option<T>
    where
        T: Ord,
    {
        self.max_by(T::cmp)
    }

    pub fn min(self) -> Option<T>
    where
        T: Ord,
    {
        self.min_by(T::cmp)
    }

    /// 相等时保留先出现的元素。
    pub fn max_by(self, mut compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        self.reduce(|max, item| if compare(&item, &max) == Ordering::Greater { item } else { max })
    }

    /// 相等时保留先出现的元素。
    pub fn min_by(self, mut compare: impl FnMut(&T, &T) -> Ordering) -> Option<T> {
        self.reduce(|min, item| if compare(&item, &min) == Ordering::Less { item } else { min })
    }

    /// 空流返回零值。
    pub fn sum(self) -> T
    where
        T: Sum<T>,
    {
        T::sum(self)
    }

    /// 空流返回单位值。
    pub fn product(self) -> T
    where
        T: Product<T>,
    {
        T::product(self)
    }

    /// 增量求平均值，`mean + (value - mean) / (index + 1)`，空流返回`None`。
    pub fn average(self) -> Option<T>
    where
        T: Float,
    {
        let mut indexed = self.enumerate();
        let (_, first) = indexed.pull()?;
        Some(indexed.fold(first, |mean, (index, value)| mean + (value - mean) / T::from_count(index + 1)))
    }

    pub fn first(mut self) -> Option<T> {
        self.pull()
    }

    pub fn last(self) -> Option<T> {
        self.fold(None, |_, item| Some(item))
    }

    /// 拉取`index + 1`个元素，提前结束时返回`None`。
    pub fn at(mut self, index: usize) -> Option<T> {
        for _ in 0..index {
            self.pull()?;
        }
        self.pull()
    }

    /// 收集到任意容器中。
    pub fn collect<C: FromIterator<T>>(self) -> C {
        C::from_iter(self)
    }

    /// 使用收集器归约。
    pub fn collect_by<C: Collector<T>>(self, collector: C) -> C::Output {
        let mut acc = collector.supply();
        self.for_each(|item| collector.accumulate(&mut acc, item));
        collector.finish(acc)
    }
}

impl<A: 'static, B: 'static> Stream<(A, B)> {
    /// 一次遍历拆分为两个列表。
    pub fn unzip(self) -> (ArrayList<A>, ArrayList<B>) {
        let (left, right) = self.fold((Vec::new(), Vec::new()), |(mut left, mut right), (a, b)| {
            left.push(a);
            right.push(b);
            (left, right)
        });
        (ArrayList::from(left), ArrayList::from(right))
    }
}
