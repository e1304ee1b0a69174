use byteorder::{BigEndian, LittleEndian};

use crate::codec::consts::ByteOrderTag;

/// 字节序特征。
///
/// 定义了元素编解码时使用的字节序 (大端或小端)。
/// 存储类型以此为类型参数，字节序在编译期固定。
pub trait Endianness: byteorder::ByteOrder + Copy + Default + 'static {
    /// 对应的字节序标记。
    const ORDER: ByteOrderTag;
}

impl Endianness for BigEndian {
    const ORDER: ByteOrderTag = ByteOrderTag::BigEndian;
}

impl Endianness for LittleEndian {
    const ORDER: ByteOrderTag = ByteOrderTag::LittleEndian;
}
