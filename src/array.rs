use std::fmt;

use byteorder::LittleEndian;
use bytes::{BufMut, Bytes};
use log::trace;

use crate::buffer::ArrayBuffer;
use crate::codec::consts::{BYTES_PER_ELEMENT, ByteOrderTag, NAME};
use crate::codec::error::{Error, Result};
use crate::fixed::{FixedEndianFloat64Array, Iter};
use crate::source::{Collection, Getter, Source, from_iterator, from_iterator_map};

/// 小端序双精度浮点数组。
///
/// 每个元素占 8 个连续字节，按 IEEE-754 双精度、低位字节在前存放，
/// 与宿主平台的本机字节序无关。写出 [`Float64ArrayLE::to_bytes`] 的结果
/// 即可得到可移植的小端双精度序列。
///
/// 该类型包装了 [`FixedEndianFloat64Array<LittleEndian>`]，并把字节序固定为小端。
/// 不支持通过继承扩展：`from_source` / `of` 等构造函数始终返回 `Float64ArrayLE`。
///
/// # 示例
///
/// ```
/// use float64_array_le::Float64ArrayLE;
///
/// let arr = Float64ArrayLE::of(&[1.5, -2.25, 0.0]);
/// assert_eq!(arr.len(), 3);
/// assert_eq!(arr.byte_length(), 24);
///
/// let doubled = Float64ArrayLE::from_map(&[1.0, 2.0, 3.0], |v, _| v * 2.0).unwrap();
/// assert_eq!(doubled.to_vec(), vec![2.0, 4.0, 6.0]);
/// ```
#[derive(PartialEq, Default)]
pub struct Float64ArrayLE {
    inner: FixedEndianFloat64Array<LittleEndian>,
}

impl Float64ArrayLE {
    /// 每个元素占用的字节数。
    pub const BYTES_PER_ELEMENT: usize = BYTES_PER_ELEMENT;

    /// 类型名称。
    pub const NAME: &'static str = NAME;

    /// 创建空数组。
    pub fn new() -> Self {
        Self::from_inner(FixedEndianFloat64Array::new())
    }

    /// 创建 `length` 个元素的数组，所有元素为 0。
    pub fn with_length(length: usize) -> Self {
        Self::from_inner(FixedEndianFloat64Array::with_length(length))
    }

    /// 覆盖整个外部缓冲区的视图，不复制。
    pub fn from_buffer(buffer: ArrayBuffer) -> Result<Self> {
        FixedEndianFloat64Array::from_buffer(buffer).map(Self::from_inner)
    }

    /// 从 `byte_offset` 开始的外部缓冲区视图。
    pub fn from_buffer_offset(buffer: ArrayBuffer, byte_offset: usize) -> Result<Self> {
        FixedEndianFloat64Array::from_buffer_offset(buffer, byte_offset).map(Self::from_inner)
    }

    /// 从 `byte_offset` 开始、恰好 `length` 个元素的外部缓冲区视图。
    pub fn from_buffer_view(
        buffer: ArrayBuffer,
        byte_offset: usize,
        length: usize,
    ) -> Result<Self> {
        FixedEndianFloat64Array::from_buffer_view(buffer, byte_offset, length).map(Self::from_inner)
    }

    /// 从类数组复制元素。
    pub fn from_collection<C: Collection + ?Sized>(src: &C) -> Self {
        Self::from_inner(FixedEndianFloat64Array::from_collection(src))
    }

    /// 按来源形态构造。
    ///
    /// 接受所有来源形态；存储层的错误 (偏移量、容量) 原样返回。
    pub fn construct(source: Source<'_>) -> Result<Self> {
        FixedEndianFloat64Array::construct(source).map(Self::from_inner)
    }

    /// 从类数组或可迭代来源创建新数组。
    ///
    /// 结果总是一份独立的拷贝，不与来源共享存储。
    ///
    /// # 错误
    ///
    /// 来源既不是类数组也不是可迭代对象时返回 `Error::InvalidArgument`.
    pub fn from_source<'a>(source: impl Into<Source<'a>>) -> Result<Self> {
        match source.into() {
            Source::Collection(src) => {
                trace!("Float64ArrayLE::from: copying collection of {}", src.len());
                Ok(Self::from_collection(&*src))
            }
            Source::Iterable(iter) => {
                let values = from_iterator(iter);
                trace!("Float64ArrayLE::from: drained {} values", values.len());
                Ok(Self::from_collection(&values))
            }
            other => Err(unsupported_source(&other)),
        }
    }

    /// 从类数组或可迭代来源创建新数组，并对每个元素调用 `f(value, index)`。
    ///
    /// 类数组按索引读取后立即变换并写入；可迭代来源在消耗时按产出顺序变换。
    pub fn from_map<'a, F>(source: impl Into<Source<'a>>, mut f: F) -> Result<Self>
    where
        F: FnMut(f64, usize) -> f64,
    {
        match source.into() {
            Source::Collection(src) => {
                let length = src.len();
                trace!("Float64ArrayLE::from: mapping collection of {}", length);
                let getter = Getter::resolve(&*src);
                let mut out = Self::with_length(length);
                for i in 0..length {
                    out.inner.put(i, f(getter.get(i), i));
                }
                Ok(out)
            }
            Source::Iterable(iter) => {
                let values = from_iterator_map(iter, f);
                trace!("Float64ArrayLE::from: drained and mapped {} values", values.len());
                Ok(Self::from_collection(&values))
            }
            other => Err(unsupported_source(&other)),
        }
    }

    /// 与 [`Float64ArrayLE::from_map`] 相同，但变换函数额外接收调用上下文 `ctx`。
    pub fn from_map_with<'a, T, F>(
        source: impl Into<Source<'a>>,
        mut f: F,
        ctx: &mut T,
    ) -> Result<Self>
    where
        F: FnMut(&mut T, f64, usize) -> f64,
    {
        Self::from_map(source, |v, i| f(ctx, v, i))
    }

    /// 按参数顺序创建新数组。
    pub fn of(values: &[f64]) -> Self {
        Self::from_collection(values)
    }

    #[inline]
    fn from_inner(inner: FixedEndianFloat64Array<LittleEndian>) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn buffer(&self) -> ArrayBuffer {
        self.inner.buffer()
    }

    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.inner.byte_offset()
    }

    #[inline]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_length()
    }

    /// 始终为 `ByteOrderTag::LittleEndian`。
    #[inline]
    pub fn byte_order(&self) -> ByteOrderTag {
        self.inner.byte_order()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.inner.get(index)
    }

    #[inline]
    pub fn at(&self, index: isize) -> Option<f64> {
        self.inner.at(index)
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        self.inner.set(index, value)
    }

    pub fn set_from<C: Collection + ?Sized>(&mut self, src: &C, offset: usize) -> Result<()> {
        self.inner.set_from(src, offset)
    }

    pub fn iter(&self) -> Iter<'_, LittleEndian> {
        self.inner.iter()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.inner.to_vec()
    }

    pub fn for_each<F: FnMut(f64, usize)>(&self, f: F) {
        self.inner.for_each(f)
    }

    pub fn map<F: FnMut(f64, usize) -> f64>(&self, f: F) -> Self {
        Self::from_inner(self.inner.map(f))
    }

    pub fn join(&self, separator: &str) -> String {
        self.inner.join(separator)
    }

    pub fn write_to<B: BufMut>(&self, sink: &mut B) {
        self.inner.write_to(sink)
    }

    pub fn to_bytes(&self) -> Bytes {
        self.inner.to_bytes()
    }
}

fn unsupported_source(source: &Source<'_>) -> Error {
    Error::invalid_argument(format!(
        "First argument must be an array-like object or an iterable. Value: `{:?}`.",
        source
    ))
}

impl FromIterator<f64> for Float64ArrayLE {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_inner(iter.into_iter().collect())
    }
}

impl Collection for Float64ArrayLE {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<f64> {
        self.inner.get(index)
    }
}

impl<'a> IntoIterator for &'a Float64ArrayLE {
    type Item = f64;
    type IntoIter = Iter<'a, LittleEndian>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl fmt::Debug for Float64ArrayLE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(NAME)
            .field("byte_offset", &self.byte_offset())
            .field("values", &self.to_vec())
            .finish()
    }
}

impl fmt::Display for Float64ArrayLE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_returns_empty_little_endian_array() {
        let arr = Float64ArrayLE::new();
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.byte_order(), ByteOrderTag::LittleEndian);
        assert_eq!(Float64ArrayLE::BYTES_PER_ELEMENT, 8);
        assert_eq!(Float64ArrayLE::NAME, "Float64ArrayLE");
    }

    #[test]
    fn test_construct_with_overflowing_length_returns_error() {
        let err = Float64ArrayLE::construct(Source::Length(usize::MAX)).unwrap_err();
        assert_eq!(err, Error::InvalidLength { length: usize::MAX });
        assert_eq!(Float64ArrayLE::construct(Source::Length(3)).unwrap().len(), 3);
    }

    #[test]
    fn test_from_buffer_with_offset_returns_remaining_elements() {
        let buf = ArrayBuffer::new(16);
        assert_eq!(Float64ArrayLE::from_buffer(buf.clone()).unwrap().len(), 2);
        assert_eq!(Float64ArrayLE::from_buffer_offset(buf.clone(), 8).unwrap().len(), 1);
        assert_eq!(Float64ArrayLE::from_buffer_view(buf, 0, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_from_source_with_length_returns_invalid_argument() {
        let err = Float64ArrayLE::from_source(42usize).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument { msg } if msg.contains("array-like object or an iterable")
        ));
    }

    #[test]
    fn test_from_source_with_buffer_returns_invalid_argument() {
        let err = Float64ArrayLE::from_map(ArrayBuffer::new(8), |v, _| v).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_from_map_with_collection_applies_callback_with_index() {
        let src = vec![1.0, 2.0, 3.0];
        let arr = Float64ArrayLE::from_map(&src, |v, i| v * 10.0 + i as f64).unwrap();
        assert_eq!(arr.to_vec(), vec![10.0, 21.0, 32.0]);
    }

    #[test]
    fn test_from_map_with_accessor_source_reads_through_getter() {
        let src = Float64ArrayLE::of(&[1.0, -1.0]);
        let arr = Float64ArrayLE::from_map(&src, |v, _| v * 2.0).unwrap();
        assert_eq!(arr.to_vec(), vec![2.0, -2.0]);
        assert!(!arr.buffer().ptr_eq(&src.buffer()));
    }

    #[test]
    fn test_from_map_with_context_threads_state() {
        let mut calls = 0usize;
        let arr = Float64ArrayLE::from_map_with(
            Source::iterable([1.0, 2.0]),
            |calls: &mut usize, v, _| {
                *calls += 1;
                v + 0.5
            },
            &mut calls,
        )
        .unwrap();
        assert_eq!(arr.to_vec(), vec![1.5, 2.5]);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_from_source_with_iterable_drains_in_order() {
        let arr = Float64ArrayLE::from_source(Source::iterable((1..=4).map(|v| v as f64))).unwrap();
        assert_eq!(arr.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_of_with_scenario_values_encodes_little_endian() {
        let arr = Float64ArrayLE::of(&[1.5, -2.25, 0.0]);
        assert_eq!(arr.to_vec(), vec![1.5, -2.25, 0.0]);
        let bytes = arr.to_bytes();
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[..8], &1.5f64.to_le_bytes());
        assert_eq!(&bytes[8..16], &(-2.25f64).to_le_bytes());
    }

    #[test]
    fn test_map_returns_new_little_endian_array() {
        let arr = Float64ArrayLE::of(&[1.0, 2.0]);
        let out = arr.map(|v, _| -v);
        assert_eq!(out.to_vec(), vec![-1.0, -2.0]);
        assert_eq!(out.to_string(), "-1,-2");
    }
}
