use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use bytes::{Bytes, BytesMut};

/// 可共享的字节缓冲区。
///
/// 克隆只复制句柄，多个视图可以指向同一段字节。
/// 仅限单线程使用，不提供任何加锁；重叠视图的并发修改由调用方自行协调。
#[derive(Clone, Default)]
pub struct ArrayBuffer {
    data: Rc<RefCell<BytesMut>>,
}

impl ArrayBuffer {
    /// 分配 `byte_length` 个字节，全部初始化为 0。
    pub fn new(byte_length: usize) -> Self {
        Self {
            data: Rc::new(RefCell::new(BytesMut::zeroed(byte_length))),
        }
    }

    #[inline]
    pub fn byte_length(&self) -> usize {
        self.data.borrow().len()
    }

    /// 当前内容的快照 (复制)。
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data.borrow())
    }

    /// 复制 `[begin, end)` 范围到一个新的缓冲区。
    ///
    /// 越界的端点会被截断到缓冲区长度。
    pub fn slice(&self, begin: usize, end: usize) -> Self {
        let data = self.data.borrow();
        let end = end.min(data.len());
        let begin = begin.min(end);
        Self::from(&data[begin..end])
    }

    /// 两个句柄是否指向同一段内存。
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    #[inline]
    pub(crate) fn bytes(&self) -> Ref<'_, BytesMut> {
        self.data.borrow()
    }

    #[inline]
    pub(crate) fn bytes_mut(&self) -> RefMut<'_, BytesMut> {
        self.data.borrow_mut()
    }
}

impl From<Vec<u8>> for ArrayBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(bytes.as_slice())
    }
}

impl From<&[u8]> for ArrayBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            data: Rc::new(RefCell::new(BytesMut::from(bytes))),
        }
    }
}

impl fmt::Debug for ArrayBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayBuffer")
            .field("byte_length", &self.byte_length())
            .finish()
    }
}
