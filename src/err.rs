use crate::guard::Revision;
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum CollErr {
    #[error(
        "[Guard] concurrent modification of `{container}`: cursor captured revision {expected}, container is at revision {actual}"
    )]
    ConcurrentModification { container: &'static str, expected: Revision, actual: Revision },

    #[error("[Guard] concurrent modification of `{container}`: container is being mutated during the pull")]
    BusyContainer { container: &'static str },

    #[error("[Guard] `{container}` was dropped before the traversal ended")]
    DroppedContainer { container: &'static str },

    #[error("[Index] Index `{index}` is out of range for `{container}` of count `{count}`")]
    IndexOutOfRange { container: &'static str, index: usize, count: usize },

    #[error("[Range] Range `{start}..{end}` is invalid for `{container}` of count `{count}`")]
    InvalidRange { container: &'static str, start: usize, end: usize, count: usize },

    #[error("[Key] Duplicate key `{key}` for `{container}`")]
    DuplicateKey { container: &'static str, key: String },
}

impl CollErr {
    /// 致命错误，直接终止当前遍历。
    ///
    /// 遍历状态已不可信，不允许作为普通错误返回给调用方。
    pub fn termination(self) -> ! {
        debug_assert!(self.is_fatal(), "non-fatal error routed to termination: {self}");
        tracing::error!(fault = %self, "traversal aborted");
        panic!("{}", self);
    }

    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CollErr::ConcurrentModification { .. } | CollErr::BusyContainer { .. } | CollErr::DroppedContainer { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CollErr::IndexOutOfRange { container: "ArrayList", index: 3, count: 3 };
        assert_eq!(err.to_string(), "[Index] Index `3` is out of range for `ArrayList` of count `3`");
        let err = CollErr::DuplicateKey { container: "HashMap", key: "\"a\"".to_string() };
        assert_eq!(err.to_string(), "[Key] Duplicate key `\"a\"` for `HashMap`");
    }

    #[test]
    fn test_is_fatal() {
        assert!(CollErr::ConcurrentModification { container: "Queue", expected: 1, actual: 2 }.is_fatal());
        assert!(CollErr::DroppedContainer { container: "ArrayStack" }.is_fatal());
        assert!(!CollErr::InvalidRange { container: "ArrayList", start: 2, end: 1, count: 3 }.is_fatal());
    }

    #[test]
    #[should_panic(expected = "non-fatal error routed to termination")]
    fn test_termination_rejects_recoverable_errors() {
        CollErr::IndexOutOfRange { container: "ArrayList", index: 5, count: 1 }.termination();
    }

    #[test]
    #[should_panic(expected = "concurrent modification of `HashSet`")]
    fn test_termination_panics() {
        CollErr::ConcurrentModification { container: "HashSet", expected: 0, actual: 1 }.termination();
    }
}
