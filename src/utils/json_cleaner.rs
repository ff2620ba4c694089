use regex::Regex;

/// 清理大模型返回的JSON文本
///
/// 模型经常把JSON包在Markdown代码围栏里（```json ... ```），
/// 这里只剥掉围栏并去除首尾空白，不做任何别的修复。
/// 围栏之外的多余文字会原样保留，交给后续的严格解析去拒绝。
pub fn clean_json_response(raw: &str) -> String {
    let fence = Regex::new(r"```json|```").unwrap();
    fence.replace_all(raw, "").trim().to_string()
}
