use std::fmt;
use std::str::FromStr;

use crate::codec::error::Error;

/// 每个元素占用的字节数 (IEEE-754 双精度)。
pub const BYTES_PER_ELEMENT: usize = 8;

/// 小端数组的类型名称。
pub const NAME: &str = "Float64ArrayLE";

/// 字节序标记。
///
/// 文本形式为 `"little-endian"` / `"big-endian"`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrderTag {
    /// 低位字节在前。
    #[cfg_attr(feature = "serde", serde(rename = "little-endian"))]
    LittleEndian,
    /// 高位字节在前。
    #[cfg_attr(feature = "serde", serde(rename = "big-endian"))]
    BigEndian,
}

impl ByteOrderTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ByteOrderTag::LittleEndian => "little-endian",
            ByteOrderTag::BigEndian => "big-endian",
        }
    }
}

impl fmt::Display for ByteOrderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ByteOrderTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "little-endian" => Ok(ByteOrderTag::LittleEndian),
            "big-endian" => Ok(ByteOrderTag::BigEndian),
            _ => Err(Error::InvalidByteOrder {
                value: s.to_owned(),
            }),
        }
    }
}
