//! 小端序双精度浮点数组。
//!
//! [`Float64ArrayLE`] 中的每个元素都按 IEEE-754 双精度、低位字节在前存放，
//! 与宿主平台的本机字节序无关，适合写入要求固定字节序的文件或网络协议。

pub mod array;
pub mod buffer;
pub mod codec;
pub mod fixed;
mod macros;
pub mod source;

#[cfg(feature = "serde")]
mod serde;

pub use array::Float64ArrayLE;
pub use buffer::ArrayBuffer;
pub use codec::consts::{BYTES_PER_ELEMENT, ByteOrderTag};
pub use codec::endian::Endianness;
pub use codec::error::{Error, Result};
pub use fixed::FixedEndianFloat64Array;
pub use source::{Collection, Element, Source};
