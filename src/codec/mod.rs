//! 元素编解码底层模块。
//!
//! 提供字节序特征、常量以及错误类型。
//! 通常用户不需要直接使用此模块，而是通过 [`crate::Float64ArrayLE`] 进行操作。

pub mod consts;
pub mod endian;
pub mod error;
