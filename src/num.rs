use ordered_float::OrderedFloat;
use std::ops::{Add, Div, Sub};

/// 支持求平均值的浮点类型。
pub trait Float: Copy + Add<Output = Self> + Sub<Output = Self> + Div<Output = Self> {
    fn from_count(count: usize) -> Self;
}

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl Float for $t {
            fn from_count(count: usize) -> Self {
                count as $t
            }
        }

        impl Float for OrderedFloat<$t> {
            fn from_count(count: usize) -> Self {
                OrderedFloat(count as $t)
            }
        }
    )*};
}

impl_float!(f32, f64);
