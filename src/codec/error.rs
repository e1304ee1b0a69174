use thiserror::Error;

/// 构造与访问错误枚举。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid argument. {msg}")]
    /// 参数形态不合法 (例如 `from` 的来源既不是类数组也不是可迭代对象)。
    InvalidArgument { msg: String },

    #[error("invalid byte order `{value}`, expected `little-endian` or `big-endian`")]
    /// 未知的字节序字符串。
    InvalidByteOrder { value: String },

    #[error("invalid byte offset {byte_offset}, must be a multiple of 8")]
    /// 字节偏移量未按元素大小对齐。
    InvalidByteOffset { byte_offset: usize },

    #[error("invalid buffer length {byte_length}, must be a multiple of 8")]
    /// 未指定长度时，剩余字节数不是元素大小的整数倍。
    InvalidBufferLength { byte_length: usize },

    #[error(
        "insufficient buffer: byte offset {byte_offset} and length {length} exceed byte length {byte_length}"
    )]
    /// 缓冲区容量不足以容纳偏移量和视图长度。
    InsufficientBuffer {
        byte_offset: usize,
        length: usize,
        byte_length: usize,
    },

    #[error("invalid length {length}, byte length exceeds the maximum allocation size")]
    /// 元素个数对应的字节数溢出或超过最大可分配大小。
    InvalidLength { length: usize },

    #[error("index {index} is out of bounds for length {length}")]
    /// 索引越界。
    IndexOutOfBounds { index: usize, length: usize },
}

impl Error {
    /// 创建一个参数错误。
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument { msg: msg.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
