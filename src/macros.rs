/// 按参数顺序创建 [`Float64ArrayLE`](crate::Float64ArrayLE)。
///
/// 每个参数通过 [`Element`](crate::Element) 无损转换为 `f64`，结果长度等于参数个数。
/// 无法无损转换的类型 (如 `u64`、`i64`) 在编译期被拒绝。
///
/// # 示例
///
/// ```
/// use float64_array_le::float64_array_le;
///
/// let arr = float64_array_le![1.5, -2.25, 0];
/// assert_eq!(arr.to_vec(), vec![1.5, -2.25, 0.0]);
///
/// assert!(float64_array_le![].is_empty());
///
/// let ints = float64_array_le![1u8, -2i16, 3u32];
/// assert_eq!(ints.to_vec(), vec![1.0, -2.0, 3.0]);
/// ```
///
/// ```compile_fail
/// use float64_array_le::float64_array_le;
///
/// let _ = float64_array_le![u64::MAX];
/// ```
#[macro_export]
macro_rules! float64_array_le {
    () => {
        $crate::Float64ArrayLE::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Float64ArrayLE::of(&[$($crate::Element::to_f64($value)),+])
    };
}
