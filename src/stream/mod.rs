mod collector;
mod terminal;

pub use collector::{Collector, Counting, FnCollector, GroupingBy, Joining, collector};

use std::fmt::{Debug, Formatter};
use std::iter::{Fuse, FusedIterator};

/// 改变元素类型的节点，闭包持有上游和节点状态。
type Pull<T> = Box<dyn FnMut() -> Option<T>>;

/// 惰性流水线。
///
/// 每个节点持有自己的上游，只有终结操作才会驱动求值。流水线不可重启，结束后继续拉取总是返回`None`。
pub struct Stream<T> {
    node: Node<T>,
}

enum Node<T> {
    Head(Fuse<Box<dyn Iterator<Item = T>>>),
    Map(Pull<T>),
    Enumerate(Pull<T>),
    Flatten(Pull<T>),
    Zip(Pull<T>),
    Filter { upstream: Box<Stream<T>>, predicate: Box<dyn FnMut(&T) -> bool> },
    Inspect { upstream: Box<Stream<T>>, action: Box<dyn FnMut(&T)> },
    Concat { first: Box<Stream<T>>, second: Box<Stream<T>>, first_done: bool },
    Step { upstream: Box<Stream<T>>, stride: usize, started: bool },
    Skip { upstream: Box<Stream<T>>, remaining: usize },
    Limit { upstream: Box<Stream<T>>, remaining: usize },
}

impl<T> Node<T> {
    fn name(&self) -> &'static str {
        match self {
            Node::Head(_) => "head",
            Node::Map(_) => "map",
            Node::Enumerate(_) => "enumerate",
            Node::Flatten(_) => "flatten",
            Node::Zip(_) => "zip",
            Node::Filter { .. } => "filter",
            Node::Inspect { .. } => "inspect",
            Node::Concat { .. } => "concat",
            Node::Step { .. } => "step",
            Node::Skip { .. } => "skip",
            Node::Limit { .. } => "limit",
        }
    }
}

impl<T> Stream<T> {
    /// 拉取下一个元素。
    pub(crate) fn pull(&mut self) -> Option<T> {
        match &mut self.node {
            Node::Head(source) => source.next(),
            Node::Map(pull) | Node::Enumerate(pull) | Node::Flatten(pull) | Node::Zip(pull) => pull(),
            Node::Filter { upstream, predicate } => {
                while let Some(item) = upstream.pull() {
                    if predicate(&item) {
                        return Some(item);
                    }
                }
                None
            }
            Node::Inspect { upstream, action } => upstream.pull().inspect(|item| action(item)),
            Node::Concat { first, second, first_done } => {
                if !*first_done {
                    if let Some(item) = first.pull() {
                        return Some(item);
                    }
                    *first_done = true;
                }
                second.pull()
            }
            Node::Step { upstream, stride, started } => {
                if *started {
                    for _ in 1..*stride {
                        upstream.pull()?;
                    }
                } else {
                    *started = true;
                }
                upstream.pull()
            }
            Node::Skip { upstream, remaining } => {
                while *remaining > 0 {
                    upstream.pull()?;
                    *remaining -= 1;
                }
                upstream.pull()
            }
            Node::Limit { upstream, remaining } => {
                if *remaining == 0 {
                    return None;
                }
                *remaining -= 1;
                upstream.pull()
            }
        }
    }
}

impl<T: 'static> Stream<T> {
    /// 以任意序列作为源头，序列可以是无限的。
    pub fn new<I>(source: I) -> Stream<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let source: Box<dyn Iterator<Item = T>> = Box::new(source.into_iter());
        Stream { node: Node::Head(source.fuse()) }
    }

    pub fn empty() -> Stream<T> {
        Stream::new(std::iter::empty())
    }

    pub fn once(value: T) -> Stream<T> {
        Stream::new(std::iter::once(value))
    }

    /// 每次拉取都调用`f`生成新元素，无限流。
    pub fn generate(f: impl FnMut() -> T + 'static) -> Stream<T> {
        Stream::new(std::iter::repeat_with(f))
    }

    /// 从`seed`开始，每次用上一个元素计算下一个元素，无限流。
    pub fn iterate(seed: T, mut f: impl FnMut(&T) -> T + 'static) -> Stream<T> {
        Stream::new(std::iter::successors(Some(seed), move |prev| Some(f(prev))))
    }

    fn wrap(node: Node<T>) -> Stream<T> {
        Stream { node }
    }

    pub fn map<U: 'static>(mut self, mut f: impl FnMut(T) -> U + 'static) -> Stream<U> {
        Stream::wrap(Node::Map(Box::new(move || self.pull().map(&mut f))))
    }

    pub fn filter(self, predicate: impl FnMut(&T) -> bool + 'static) -> Stream<T> {
        Stream::wrap(Node::Filter { upstream: Box::new(self), predicate: Box::new(predicate) })
    }

    /// 对每个经过的元素执行`action`，元素本身不变。
    pub fn inspect(self, action: impl FnMut(&T) + 'static) -> Stream<T> {
        Stream::wrap(Node::Inspect { upstream: Box::new(self), action: Box::new(action) })
    }

    /// 附加从0开始的序号。
    pub fn enumerate(mut self) -> Stream<(usize, T)> {
        let mut index = 0;
        Stream::wrap(Node::Enumerate(Box::new(move || {
            let item = self.pull()?;
            let pair = (index, item);
            index += 1;
            Some(pair)
        })))
    }

    /// 展开子序列，空的子序列直接跳过。
    pub fn flatten<U: 'static>(mut self) -> Stream<U>
    where
        T: IntoIterator<Item = U>,
        T::IntoIter: 'static,
    {
        let mut active: Option<T::IntoIter> = None;
        Stream::wrap(Node::Flatten(Box::new(move || {
            loop {
                if let Some(sub) = active.as_mut() {
                    if let Some(item) = sub.next() {
                        return Some(item);
                    }
                    active = None;
                }
                active = Some(self.pull()?.into_iter());
            }
        })))
    }

    /// 两侧都拉取一次，任何一侧结束即结束。
    pub fn zip<U: 'static>(mut self, mut other: Stream<U>) -> Stream<(T, U)> {
        Stream::wrap(Node::Zip(Box::new(move || match (self.pull(), other.pull()) {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        })))
    }

    pub fn concat(self, other: Stream<T>) -> Stream<T> {
        Stream::wrap(Node::Concat { first: Box::new(self), second: Box::new(other), first_done: false })
    }

    /// 保留第一个元素，之后每隔`stride`个保留一个。`stride`为0时按1处理。
    pub fn step(self, stride: usize) -> Stream<T> {
        Stream::wrap(Node::Step { upstream: Box::new(self), stride: stride.max(1), started: false })
    }

    pub fn skip(self, count: usize) -> Stream<T> {
        Stream::wrap(Node::Skip { upstream: Box::new(self), remaining: count })
    }

    /// 最多保留`count`个元素，达到数量后不再拉取上游。
    pub fn limit(self, count: usize) -> Stream<T> {
        Stream::wrap(Node::Limit { upstream: Box::new(self), remaining: count })
    }
}

impl<T> Iterator for Stream<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull()
    }
}

impl<T> FusedIterator for Stream<T> {}

impl<T> Debug for Stream<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream").field("node", &self.node.name()).finish()
    }
}

/// 把任意序列转为流。
pub trait IntoStream: IntoIterator {
    fn into_stream(self) -> Stream<Self::Item>;
}

impl<I> IntoStream for I
where
    I: IntoIterator,
    I::IntoIter: 'static,
    I::Item: 'static,
{
    fn into_stream(self) -> Stream<Self::Item> {
        Stream::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Collection;
    use crate::list::ArrayList;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counted(values: Vec<i32>) -> (Stream<i32>, Rc<Cell<usize>>) {
        let pulled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulled);
        (values.into_stream().inspect(move |_| counter.set(counter.get() + 1)), pulled)
    }

    #[test]
    fn test_filter_then_map() {
        let list = ArrayList::from(vec![1, 2, 3, 4, 5]);
        let result: ArrayList<i32> = list.stream().filter(|x| x % 2 == 0).map(|x| x * 10).collect();
        assert_eq!(result.to_vec(), vec![20, 40]);
    }

    #[test]
    fn test_nothing_is_pulled_before_terminal() {
        let (stream, pulled) = counted(vec![1, 2, 3]);
        let stream = stream.map(|x| x + 1).filter(|x| *x > 0);
        assert_eq!(pulled.get(), 0);
        assert_eq!(stream.collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(pulled.get(), 3);
    }

    #[test]
    fn test_map_on_end() {
        let mut stream = Stream::<i32>::empty().map(|x| x.to_string());
        assert_eq!(stream.next(), None);
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn test_enumerate() {
        let pairs: Vec<_> = vec!["a", "b", "c"].into_stream().enumerate().collect();
        assert_eq!(pairs, vec![(0, "a"), (1, "b"), (2, "c")]);
    }

    #[test]
    fn test_enumerate_index_persists_across_filter() {
        let pairs: Vec<_> = (10..20).into_stream().enumerate().filter(|(i, _)| i % 4 == 0).collect();
        assert_eq!(pairs, vec![(0, 10), (4, 14), (8, 18)]);
    }

    #[test]
    fn test_flatten_skips_empty_sub_sequences() {
        let nested: Vec<Vec<i32>> = vec![vec![], vec![1, 2], vec![], vec![], vec![3], vec![]];
        assert_eq!(nested.into_stream().flatten().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_flatten_many_empty_sub_sequences() {
        let stream = Stream::new((0..1_000_000).map(|_| Vec::<u8>::new())).concat(Stream::once(vec![7]));
        assert_eq!(stream.flatten().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn test_flatten_is_lazy_on_infinite_outer() {
        let firsts: Vec<_> = Stream::iterate(1, |n| n + 1).map(|n| vec![n; n]).flatten().limit(6).collect();
        assert_eq!(firsts, vec![1, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn test_zip_truncates_to_shorter() {
        let zipped: Vec<_> = vec![1, 2, 3].into_stream().zip(vec!['a', 'b'].into_stream()).collect();
        assert_eq!(zipped, vec![(1, 'a'), (2, 'b')]);
        let zipped: Vec<_> = vec![1].into_stream().zip(Stream::generate(|| 'x')).collect();
        assert_eq!(zipped, vec![(1, 'x')]);
    }

    #[test]
    fn test_concat_drains_first_then_second() {
        let joined: Vec<_> = vec![1, 2].into_stream().concat(vec![3, 4].into_stream()).collect();
        assert_eq!(joined, vec![1, 2, 3, 4]);
        let joined: Vec<_> = Stream::empty().concat(vec![5].into_stream()).collect();
        assert_eq!(joined, vec![5]);
    }

    #[test]
    fn test_step() {
        assert_eq!(vec![1, 2, 3, 4, 5, 6].into_stream().step(2).collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!((1..=7).into_stream().step(3).collect::<Vec<_>>(), vec![1, 4, 7]);
        assert_eq!((1..=3).into_stream().step(1).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!((1..=3).into_stream().step(0).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(Stream::<i32>::empty().step(2).collect::<Vec<_>>(), Vec::<i32>::new());
    }

    #[test]
    fn test_skip() {
        assert_eq!((1..=5).into_stream().skip(2).collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!((1..=5).into_stream().skip(0).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!((1..=2).into_stream().skip(5).collect::<Vec<_>>(), Vec::<i32>::new());
    }

    #[test]
    fn test_limit() {
        assert_eq!((1..=5).into_stream().limit(2).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!((1..=5).into_stream().limit(0).collect::<Vec<_>>(), Vec::<i32>::new());
        assert_eq!((1..=2).into_stream().limit(5).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(Stream::generate(|| 0).limit(3).collect::<Vec<_>>(), vec![0, 0, 0]);
    }

    #[test]
    fn test_limit_stops_pulling_upstream() {
        let (stream, pulled) = counted(vec![1, 2, 3, 4]);
        let mut limited = stream.limit(2);
        assert_eq!(limited.by_ref().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(limited.next(), None);
        assert_eq!(pulled.get(), 2);
        let (stream, pulled) = counted(vec![1]);
        assert_eq!(stream.limit(0).collect::<Vec<_>>(), Vec::<i32>::new());
        assert_eq!(pulled.get(), 0);
    }

    #[test]
    fn test_exhausted_stream_stays_exhausted() {
        let mut calls = 0;
        let flaky = std::iter::from_fn(move || {
            calls += 1;
            if calls == 2 { None } else { Some(calls) }
        });
        let mut stream = Stream::new(flaky);
        assert_eq!(stream.next(), Some(1));
        assert_eq!(stream.next(), None);
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn test_debug_names_outer_node() {
        let stream = (1..3).into_stream().skip(1).limit(1);
        assert_eq!(format!("{stream:?}"), "Stream { node: \"limit\" }");
    }

    #[test]
    #[should_panic(expected = "concurrent modification of `ArrayList`")]
    fn test_push_while_streaming() {
        let mut list = ArrayList::from(vec![1, 2, 3]);
        let stream = list.stream().map(|x| x * 2);
        stream.for_each(|x| list.push(x));
    }
}
