use crate::err::CollErr;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

/// 修订号，每次结构性修改加一，只增不减。
pub type Revision = u64;

#[derive(Debug)]
struct Guarded<S> {
    storage: S,
    revision: Revision,
}

/// 容器的存储，容器持有唯一的可写入口，游标只持有读引用和创建时的修订号。
pub(crate) struct Shared<S> {
    cell: Rc<RefCell<Guarded<S>>>,
}

impl<S> Shared<S> {
    pub(crate) fn new(storage: S) -> Shared<S> {
        Shared { cell: Rc::new(RefCell::new(Guarded { storage, revision: 0 })) }
    }

    pub(crate) fn read(&self) -> Ref<'_, S> {
        Ref::map(self.cell.borrow(), |guarded| &guarded.storage)
    }

    /// 结构性修改入口，每次调用修订号加一。
    pub(crate) fn write(&mut self) -> RefMut<'_, S> {
        RefMut::map(self.cell.borrow_mut(), |guarded| {
            guarded.revision += 1;
            &mut guarded.storage
        })
    }

    pub(crate) fn revision(&self) -> Revision {
        self.cell.borrow().revision
    }
}

impl<S: Positional> Shared<S> {
    pub(crate) fn cursor(&self) -> Cursor<S> {
        let revision = self.revision();
        tracing::trace!(container = S::KIND, revision, "cursor created");
        Cursor { source: Rc::downgrade(&self.cell), position: 0, revision }
    }
}

/// 深拷贝，新容器的修订号从零开始。
impl<S: Clone> Clone for Shared<S> {
    fn clone(&self) -> Self {
        Shared::new(self.read().clone())
    }
}

impl<S: PartialEq> PartialEq for Shared<S> {
    fn eq(&self, other: &Self) -> bool {
        *self.read() == *other.read()
    }
}

impl<S: Debug> Debug for Shared<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.read().fmt(f)
    }
}

/// 可按遍历位置取出元素的存储。
pub trait Positional {
    type Item;

    /// 容器名称，用于日志和错误信息。
    const KIND: &'static str;

    fn item_at(&self, position: usize) -> Option<Self::Item>;
}

/// 容器的单次遍历。
///
/// 每次拉取前都会比较创建时记录的修订号和容器当前的修订号，不一致时直接终止。
/// 先修改再改回的操作同样会被发现，因为修订号只增不减。
/// 游标不持有容器，容器被释放后的拉取同样直接终止。
pub struct Cursor<S> {
    source: Weak<RefCell<Guarded<S>>>,
    position: usize,
    revision: Revision,
}

impl<S> Cursor<S> {
    pub fn revision(&self) -> Revision {
        self.revision
    }
}

impl<S: Positional> Iterator for Cursor<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(source) = self.source.upgrade() else {
            CollErr::DroppedContainer { container: S::KIND }.termination();
        };
        let Ok(guarded) = source.try_borrow() else {
            CollErr::BusyContainer { container: S::KIND }.termination();
        };
        if guarded.revision != self.revision {
            CollErr::ConcurrentModification { container: S::KIND, expected: self.revision, actual: guarded.revision }
                .termination();
        }
        let item = guarded.storage.item_at(self.position)?;
        self.position += 1;
        Some(item)
    }
}

impl<S> Debug for Cursor<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor").field("position", &self.position).field("revision", &self.revision).finish()
    }
}
