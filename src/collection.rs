use crate::guard::{Cursor, Positional, Revision};
use crate::stream::Stream;

/// 带修改保护的容器。
///
/// 所有容器都通过 [`Cursor`] 对外遍历，遍历过程中容器发生结构性修改时，下一次拉取直接终止。
pub trait Collection {
    type Item: 'static;
    type Storage: Positional<Item = Self::Item> + 'static;

    fn count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// 当前修订号。
    fn revision(&self) -> Revision;

    /// 创建一次新的遍历。
    fn cursor(&self) -> Cursor<Self::Storage>;

    /// 以新的遍历作为源头创建流。
    fn stream(&self) -> Stream<Self::Item> {
        Stream::new(self.cursor())
    }

    fn to_vec(&self) -> Vec<Self::Item> {
        self.cursor().collect()
    }
}
