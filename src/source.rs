//! 构造来源的分类与读取策略。
//!
//! 调用方需要把数据适配为两种可识别形态之一：
//! 带长度、可按索引读取的类数组 ([`Collection`])，或有限的可迭代序列。
//! [`Source`] 在调用时对输入进行分类。

use std::fmt;

use crate::buffer::ArrayBuffer;

mod private {
    pub trait Sealed {}
}

/// 可以转换为 `f64` 的元素类型。
pub trait Element: Copy + 'static + private::Sealed {
    fn to_f64(self) -> f64;

    /// 仅 `f64` 切片可以直接按索引读取。
    #[inline]
    fn as_f64_slice(_slice: &[Self]) -> Option<&[f64]> {
        None
    }
}

impl private::Sealed for f64 {}

impl Element for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn as_f64_slice(slice: &[Self]) -> Option<&[f64]> {
        Some(slice)
    }
}

macro_rules! impl_element {
    ($($t:ty),*) => {
        $(
            impl private::Sealed for $t {}

            impl Element for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

impl_element!(f32, i8, u8, i16, u16, i32, u32);

/// 类数组：有长度，且支持按索引读取。
pub trait Collection {
    fn len(&self) -> usize;

    /// 读取第 `index` 个元素，越界时返回 `None`。
    fn get(&self, index: usize) -> Option<f64>;

    /// 底层是否为连续的本机 `f64` 切片。
    ///
    /// 返回 `None` 的类型通过 [`Collection::get`] 访问。
    #[inline]
    fn as_f64_slice(&self) -> Option<&[f64]> {
        None
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: Collection + ?Sized> Collection for &C {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<f64> {
        (**self).get(index)
    }

    #[inline]
    fn as_f64_slice(&self) -> Option<&[f64]> {
        (**self).as_f64_slice()
    }
}

impl<T: Element> Collection for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<f64> {
        <[T]>::get(self, index).map(|v| v.to_f64())
    }

    #[inline]
    fn as_f64_slice(&self) -> Option<&[f64]> {
        T::as_f64_slice(self)
    }
}

impl<T: Element, const N: usize> Collection for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<f64> {
        Collection::get(self.as_slice(), index)
    }

    #[inline]
    fn as_f64_slice(&self) -> Option<&[f64]> {
        T::as_f64_slice(self.as_slice())
    }
}

impl<T: Element> Collection for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<f64> {
        Collection::get(self.as_slice(), index)
    }

    #[inline]
    fn as_f64_slice(&self) -> Option<&[f64]> {
        T::as_f64_slice(self.as_slice())
    }
}

/// 元素读取策略，每次调用只解析一次。
pub enum Getter<'a, C: ?Sized> {
    /// 直接按索引读取本机 `f64` 切片。
    Indexed(&'a [f64]),
    /// 通过访问器方法读取。
    Accessor(&'a C),
}

impl<'a, C: Collection + ?Sized> Getter<'a, C> {
    pub fn resolve(src: &'a C) -> Self {
        match src.as_f64_slice() {
            Some(slice) => Getter::Indexed(slice),
            None => Getter::Accessor(src),
        }
    }

    /// 读取第 `index` 个元素；缺失的元素按 NaN 处理。
    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        let value = match self {
            Getter::Indexed(slice) => <[f64]>::get(slice, index).copied(),
            Getter::Accessor(src) => src.get(index),
        };
        value.unwrap_or(f64::NAN)
    }
}

/// 构造来源，在调用时分类。
///
/// 可迭代来源必须是有限的：它会在分配之前被完整消耗。
pub enum Source<'a> {
    Empty,
    /// 元素个数，分配全零缓冲区。
    Length(usize),
    /// 类数组，元素被复制。
    Collection(Box<dyn Collection + 'a>),
    /// 有限序列，先完整消耗再复制。
    Iterable(Box<dyn Iterator<Item = f64> + 'a>),
    /// 整个外部缓冲区的视图。
    Buffer(ArrayBuffer),
    /// 从字节偏移量开始的视图。
    BufferView(ArrayBuffer, usize),
    /// 从字节偏移量开始、指定元素个数的视图。
    BufferViewSized(ArrayBuffer, usize, usize),
}

impl<'a> Source<'a> {
    /// 包装一个有限的可迭代序列。
    pub fn iterable<I>(iterable: I) -> Self
    where
        I: IntoIterator,
        I::Item: Element,
        I::IntoIter: 'a,
    {
        Source::Iterable(Box::new(iterable.into_iter().map(Element::to_f64)))
    }

    /// 来源形态的名称。
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Empty => "empty",
            Source::Length(_) => "length",
            Source::Collection(_) => "collection",
            Source::Iterable(_) => "iterable",
            Source::Buffer(_) => "buffer",
            Source::BufferView(..) => "buffer view",
            Source::BufferViewSized(..) => "sized buffer view",
        }
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Empty => f.write_str("Empty"),
            Source::Length(n) => write!(f, "Length({n})"),
            Source::Collection(src) => write!(f, "Collection(len = {})", src.len()),
            Source::Iterable(_) => f.write_str("Iterable"),
            Source::Buffer(buf) => f.debug_tuple("Buffer").field(buf).finish(),
            Source::BufferView(buf, offset) => {
                f.debug_tuple("BufferView").field(buf).field(offset).finish()
            }
            Source::BufferViewSized(buf, offset, len) => f
                .debug_tuple("BufferViewSized")
                .field(buf)
                .field(offset)
                .field(len)
                .finish(),
        }
    }
}

impl From<usize> for Source<'_> {
    fn from(length: usize) -> Self {
        Source::Length(length)
    }
}

impl From<ArrayBuffer> for Source<'_> {
    fn from(buffer: ArrayBuffer) -> Self {
        Source::Buffer(buffer)
    }
}

impl<'a, C: Collection + ?Sized> From<&'a C> for Source<'a> {
    fn from(src: &'a C) -> Self {
        Source::Collection(Box::new(src))
    }
}

/// 把迭代器完整消耗为有序序列。
pub fn from_iterator<I: Iterator<Item = f64>>(iter: I) -> Vec<f64> {
    iter.collect()
}

/// 把迭代器完整消耗为有序序列，并按产出顺序对每个值调用 `f(value, index)`。
pub fn from_iterator_map<I, F>(iter: I, mut f: F) -> Vec<f64>
where
    I: Iterator<Item = f64>,
    F: FnMut(f64, usize) -> f64,
{
    iter.enumerate().map(|(i, v)| f(v, i)).collect()
}
