use std::fmt;
use std::marker::PhantomData;

use bytes::{BufMut, Bytes};
use log::trace;

use crate::buffer::ArrayBuffer;
use crate::codec::consts::{BYTES_PER_ELEMENT, ByteOrderTag};
use crate::codec::endian::Endianness;
use crate::codec::error::{Error, Result};
use crate::source::{Collection, Getter, Source, from_iterator};

/// 固定字节序的双精度浮点数组。
///
/// 元素以 `E` 指定的字节序存放在 [`ArrayBuffer`] 中，与宿主平台的本机字节序无关。
/// 长度在构造后固定，元素值可以按索引原地修改。
///
/// 从外部缓冲区构造时不复制字节，视图与缓冲区的其他持有者共享内存。
pub struct FixedEndianFloat64Array<E: Endianness> {
    buffer: ArrayBuffer,
    byte_offset: usize,
    length: usize,
    _order: PhantomData<E>,
}

impl<E: Endianness> FixedEndianFloat64Array<E> {
    /// 每个元素占用的字节数。
    pub const BYTES_PER_ELEMENT: usize = BYTES_PER_ELEMENT;

    /// 创建空数组。
    pub fn new() -> Self {
        Self::with_length(0)
    }

    /// 创建 `length` 个元素的数组，所有元素为 0。
    ///
    /// # Panics
    ///
    /// 字节数超过最大可分配大小时 panic；需要错误返回时使用 [`Self::try_with_length`]。
    pub fn with_length(length: usize) -> Self {
        trace!("allocating {} elements ({})", length, E::ORDER);
        Self {
            buffer: ArrayBuffer::new(length.saturating_mul(BYTES_PER_ELEMENT)),
            byte_offset: 0,
            length,
            _order: PhantomData,
        }
    }

    /// 创建 `length` 个元素的数组，所有元素为 0。
    ///
    /// # 错误
    ///
    /// `length * 8` 溢出或超过 `isize::MAX` 时返回 `Error::InvalidLength`.
    pub fn try_with_length(length: usize) -> Result<Self> {
        length
            .checked_mul(BYTES_PER_ELEMENT)
            .filter(|&byte_length| byte_length <= isize::MAX as usize)
            .ok_or(Error::InvalidLength { length })?;
        Ok(Self::with_length(length))
    }

    /// 从类数组复制元素。
    pub fn from_collection<C: Collection + ?Sized>(src: &C) -> Self {
        let length = src.len();
        let getter = Getter::resolve(src);
        let mut out = Self::with_length(length);
        for i in 0..length {
            out.put(i, getter.get(i));
        }
        out
    }

    /// 覆盖整个缓冲区的视图。
    ///
    /// # 错误
    ///
    /// 缓冲区字节数不是 8 的整数倍时返回 `Error::InvalidBufferLength`.
    pub fn from_buffer(buffer: ArrayBuffer) -> Result<Self> {
        Self::view(buffer, 0, None)
    }

    /// 从 `byte_offset` 开始直到缓冲区末尾的视图。
    pub fn from_buffer_offset(buffer: ArrayBuffer, byte_offset: usize) -> Result<Self> {
        Self::view(buffer, byte_offset, None)
    }

    /// 从 `byte_offset` 开始、恰好 `length` 个元素的视图。
    pub fn from_buffer_view(
        buffer: ArrayBuffer,
        byte_offset: usize,
        length: usize,
    ) -> Result<Self> {
        Self::view(buffer, byte_offset, Some(length))
    }

    /// 按来源形态分派到对应的构造函数。
    ///
    /// 可迭代来源会先被完整消耗，再按其长度分配。
    pub fn construct(source: Source<'_>) -> Result<Self> {
        trace!("constructing {} array from {}", E::ORDER, source.kind());
        match source {
            Source::Empty => Ok(Self::new()),
            Source::Length(length) => Self::try_with_length(length),
            Source::Collection(src) => Ok(Self::from_collection(&*src)),
            Source::Iterable(iter) => Ok(Self::from_collection(&from_iterator(iter))),
            Source::Buffer(buffer) => Self::from_buffer(buffer),
            Source::BufferView(buffer, byte_offset) => {
                Self::from_buffer_offset(buffer, byte_offset)
            }
            Source::BufferViewSized(buffer, byte_offset, length) => {
                Self::from_buffer_view(buffer, byte_offset, length)
            }
        }
    }

    fn view(buffer: ArrayBuffer, byte_offset: usize, length: Option<usize>) -> Result<Self> {
        let byte_length = buffer.byte_length();
        if byte_offset % BYTES_PER_ELEMENT != 0 {
            return Err(Error::InvalidByteOffset { byte_offset });
        }
        if byte_offset > byte_length {
            return Err(Error::InsufficientBuffer {
                byte_offset,
                length: length.unwrap_or(0),
                byte_length,
            });
        }
        let available = byte_length - byte_offset;
        let length = match length {
            None => {
                if available % BYTES_PER_ELEMENT != 0 {
                    return Err(Error::InvalidBufferLength { byte_length });
                }
                available / BYTES_PER_ELEMENT
            }
            Some(length) => {
                let fits = length
                    .checked_mul(BYTES_PER_ELEMENT)
                    .is_some_and(|required| required <= available);
                if !fits {
                    return Err(Error::InsufficientBuffer {
                        byte_offset,
                        length,
                        byte_length,
                    });
                }
                length
            }
        };
        trace!(
            "viewing {} elements at byte offset {} of a {} byte buffer",
            length, byte_offset, byte_length
        );
        Ok(Self {
            buffer,
            byte_offset,
            length,
            _order: PhantomData,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// 底层缓冲区的句柄 (共享，不复制)。
    #[inline]
    pub fn buffer(&self) -> ArrayBuffer {
        self.buffer.clone()
    }

    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// 视图覆盖的字节数。
    #[inline]
    pub fn byte_length(&self) -> usize {
        self.length * BYTES_PER_ELEMENT
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrderTag {
        E::ORDER
    }

    #[inline]
    fn start_of(&self, index: usize) -> usize {
        self.byte_offset + index * BYTES_PER_ELEMENT
    }

    /// 读取第 `index` 个元素，越界时返回 `None`。
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        if index >= self.length {
            return None;
        }
        let start = self.start_of(index);
        let bytes = self.buffer.bytes();
        Some(E::read_f64(&bytes[start..start + BYTES_PER_ELEMENT]))
    }

    /// 按相对索引读取，负数从末尾开始计数。
    pub fn at(&self, index: isize) -> Option<f64> {
        let index = if index < 0 {
            self.length.checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        self.get(index)
    }

    /// 写入第 `index` 个元素。
    ///
    /// # 错误
    ///
    /// 越界时返回 `Error::IndexOutOfBounds`.
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        if index >= self.length {
            return Err(Error::IndexOutOfBounds {
                index,
                length: self.length,
            });
        }
        self.put(index, value);
        Ok(())
    }

    /// 从 `offset` 开始写入类数组的全部元素。
    ///
    /// 来源可以与本数组共享缓冲区：元素先被读出，再统一写入。
    pub fn set_from<C: Collection + ?Sized>(&mut self, src: &C, offset: usize) -> Result<()> {
        let count = src.len();
        let end = offset.checked_add(count).filter(|&end| end <= self.length);
        if end.is_none() {
            return Err(Error::IndexOutOfBounds {
                index: offset.saturating_add(count),
                length: self.length,
            });
        }
        let getter = Getter::resolve(src);
        let values: Vec<f64> = (0..count).map(|i| getter.get(i)).collect();
        let start = self.start_of(offset);
        let mut bytes = self.buffer.bytes_mut();
        for (chunk, value) in bytes[start..start + count * BYTES_PER_ELEMENT]
            .chunks_exact_mut(BYTES_PER_ELEMENT)
            .zip(values)
        {
            E::write_f64(chunk, value);
        }
        Ok(())
    }

    /// 写入一个已知在范围内的元素。
    #[inline]
    pub(crate) fn put(&mut self, index: usize, value: f64) {
        let start = self.start_of(index);
        let mut bytes = self.buffer.bytes_mut();
        E::write_f64(&mut bytes[start..start + BYTES_PER_ELEMENT], value);
    }

    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            array: self,
            index: 0,
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    pub fn for_each<F: FnMut(f64, usize)>(&self, mut f: F) {
        for (i, v) in self.iter().enumerate() {
            f(v, i);
        }
    }

    /// 对每个元素调用 `f(value, index)`，结果写入新分配的数组。
    pub fn map<F: FnMut(f64, usize) -> f64>(&self, mut f: F) -> Self {
        let mut out = Self::with_length(self.length);
        for (i, v) in self.iter().enumerate() {
            out.put(i, f(v, i));
        }
        out
    }

    pub fn join(&self, separator: &str) -> String {
        let mut out = String::new();
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(&v.to_string());
        }
        out
    }

    /// 把视图覆盖的原始字节写入 `sink`。
    pub fn write_to<B: BufMut>(&self, sink: &mut B) {
        let bytes = self.buffer.bytes();
        sink.put_slice(&bytes[self.byte_offset..self.byte_offset + self.byte_length()]);
    }

    /// 视图覆盖的原始字节 (复制)。
    pub fn to_bytes(&self) -> Bytes {
        let mut out = Vec::with_capacity(self.byte_length());
        self.write_to(&mut out);
        Bytes::from(out)
    }
}

impl<E: Endianness> Default for FixedEndianFloat64Array<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Endianness> FromIterator<f64> for FixedEndianFloat64Array<E> {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_collection(&from_iterator(iter.into_iter()))
    }
}

impl<E: Endianness> Collection for FixedEndianFloat64Array<E> {
    #[inline]
    fn len(&self) -> usize {
        self.length
    }

    #[inline]
    fn get(&self, index: usize) -> Option<f64> {
        FixedEndianFloat64Array::get(self, index)
    }
}

impl<E: Endianness> PartialEq for FixedEndianFloat64Array<E> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<E: Endianness> fmt::Debug for FixedEndianFloat64Array<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedEndianFloat64Array")
            .field("byte_order", &E::ORDER)
            .field("byte_offset", &self.byte_offset)
            .field("values", &self.to_vec())
            .finish()
    }
}

impl<E: Endianness> fmt::Display for FixedEndianFloat64Array<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(","))
    }
}

impl<'a, E: Endianness> IntoIterator for &'a FixedEndianFloat64Array<E> {
    type Item = f64;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 按索引顺序解码元素的迭代器。
pub struct Iter<'a, E: Endianness> {
    array: &'a FixedEndianFloat64Array<E>,
    index: usize,
}

impl<E: Endianness> Iterator for Iter<'_, E> {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        let value = self.array.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<E: Endianness> ExactSizeIterator for Iter<'_, E> {}
