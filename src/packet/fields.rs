//! 分隔符字段提取
//!
//! 文本记录以 `|` 分隔字段。这里按“第几个分隔符之后、第几个分隔符之前”
//! 取子串，L2/L3 用它把内层记录原样切出来交给下一层解析。

pub const FIELD_DELIM: char = '|';

/// 提取从第 `start` 个字段开始、到第 `end` 个字段结束（含）的子串。
///
/// 设输入中共有 `n` 个分隔符（即 `n + 1` 个字段）：
/// - `start > n` 时返回 `None`；
/// - `end == None` 表示一直取到字符串末尾（包括其中的分隔符）；
/// - `end < start` 或 `end >= n` 时返回 `None`，也就是说带上界的提取
///   要求第 `end` 个字段后面还有分隔符，最后一个字段只能用 `end == None` 取；
/// - 字段本身可以为空（例如 `"a||b"` 的第 1 个字段是 `""`）。
pub fn extract_between_delimiters(
    input: &str,
    delim: char,
    start: usize,
    end: Option<usize>,
) -> Option<&str> {
    let positions: Vec<usize> = input.match_indices(delim).map(|(i, _)| i).collect();
    let n = positions.len();
    if start > n {
        return None;
    }
    let from = if start == 0 {
        0
    } else {
        positions[start - 1] + delim.len_utf8()
    };

    match end {
        None => Some(&input[from..]),
        Some(end) if end < start || end >= n => None,
        Some(end) => Some(&input[from..positions[end]]),
    }
}
