//! 带快速失败游标的泛型容器，以及惰性、单次遍历的流水线。

mod collection;
mod err;
mod guard;
mod list;
mod map;
mod num;
mod queue;
mod set;
mod stack;
mod stream;
mod table;

pub use collection::Collection;
pub use err::CollErr;
pub use guard::{Cursor, Positional, Revision};
pub use list::{ArrayList, Slots};
pub use map::{Entries, HashMap};
pub use num::Float;
pub use queue::{Fifo, Queue};
pub use set::{HashSet, Keys};
pub use stack::{ArrayStack, Lifo};
pub use stream::{Collector, Counting, FnCollector, GroupingBy, IntoStream, Joining, Stream, collector};

pub type CollRes<T> = Result<T, CollErr>;
