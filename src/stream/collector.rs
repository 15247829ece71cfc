use crate::list::ArrayList;
use crate::map::HashMap;
use itertools::Itertools;
use std::fmt::Display;
use std::hash::Hash;
use std::marker::PhantomData;

/// 通用归约：提供可变的累加器，逐个累加元素，最后生成结果。
pub trait Collector<T> {
    type Accumulator;
    type Output;

    fn supply(&self) -> Self::Accumulator;

    fn accumulate(&self, acc: &mut Self::Accumulator, item: T);

    fn finish(&self, acc: Self::Accumulator) -> Self::Output;
}

/// 拼接为字符串：`<prefix><item><delimiter><item>...<postfix>`。
#[derive(Debug, PartialEq, Default, Clone)]
pub struct Joining {
    pub delimiter: String,
    pub prefix: String,
    pub postfix: String,
}

impl Joining {
    pub fn new(delimiter: impl Into<String>) -> Joining {
        Joining { delimiter: delimiter.into(), ..Default::default() }
    }

    pub fn with_affix(delimiter: impl Into<String>, prefix: impl Into<String>, postfix: impl Into<String>) -> Joining {
        Joining { delimiter: delimiter.into(), prefix: prefix.into(), postfix: postfix.into() }
    }
}

impl<T: Display> Collector<T> for Joining {
    type Accumulator = Vec<T>;
    type Output = String;

    fn supply(&self) -> Vec<T> {
        Vec::new()
    }

    fn accumulate(&self, acc: &mut Vec<T>, item: T) {
        acc.push(item);
    }

    fn finish(&self, acc: Vec<T>) -> String {
        format!("{}{}{}", self.prefix, acc.iter().join(&self.delimiter), self.postfix)
    }
}

/// 按键分组，组的顺序为键首次出现的顺序，组内保持原顺序。
pub struct GroupingBy<K, F> {
    key: F,
    _key: PhantomData<fn() -> K>,
}

impl<K, F> GroupingBy<K, F> {
    pub fn new(key: F) -> GroupingBy<K, F> {
        GroupingBy { key, _key: PhantomData }
    }
}

impl<T, K, F> Collector<T> for GroupingBy<K, F>
where
    K: Hash + Eq + Clone,
    F: Fn(&T) -> K,
{
    type Accumulator = HashMap<K, ArrayList<T>>;
    type Output = HashMap<K, ArrayList<T>>;

    fn supply(&self) -> Self::Accumulator {
        HashMap::new()
    }

    fn accumulate(&self, acc: &mut Self::Accumulator, item: T) {
        acc.upsert((self.key)(&item), ArrayList::new, |group| group.push(item));
    }

    fn finish(&self, acc: Self::Accumulator) -> Self::Output {
        acc
    }
}

/// 计数。
#[derive(Debug, Default, Clone, Copy)]
pub struct Counting;

impl<T> Collector<T> for Counting {
    type Accumulator = usize;
    type Output = usize;

    fn supply(&self) -> usize {
        0
    }

    fn accumulate(&self, acc: &mut usize, _: T) {
        *acc += 1;
    }

    fn finish(&self, acc: usize) -> usize {
        acc
    }
}

/// 由三个闭包组成的收集器，见[`collector`]。
pub struct FnCollector<S, A, F, T> {
    supply: S,
    accumulate: A,
    finish: F,
    _item: PhantomData<fn(T)>,
}

pub fn collector<T, M, R, S, A, F>(supply: S, accumulate: A, finish: F) -> FnCollector<S, A, F, T>
where
    S: Fn() -> M,
    A: Fn(&mut M, T),
    F: Fn(M) -> R,
{
    FnCollector { supply, accumulate, finish, _item: PhantomData }
}

impl<T, M, R, S, A, F> Collector<T> for FnCollector<S, A, F, T>
where
    S: Fn() -> M,
    A: Fn(&mut M, T),
    F: Fn(M) -> R,
{
    type Accumulator = M;
    type Output = R;

    fn supply(&self) -> M {
        (self.supply)()
    }

    fn accumulate(&self, acc: &mut M, item: T) {
        (self.accumulate)(acc, item)
    }

    fn finish(&self, acc: M) -> R {
        (self.finish)(acc)
    }
}
