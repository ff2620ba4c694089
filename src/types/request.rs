use serde::{Deserialize, Serialize};

/// 规划模式
///
/// 线上前端提交中文值，同时兼容下划线风格的别名。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanMode {
    /// 单城市：生成草稿，或基于选定草稿生成完整行程
    #[serde(rename = "单城市", alias = "single_city")]
    SingleCity,
    /// 多城市：从自由文本里解析城市列表后逐城规划
    #[serde(rename = "多城市", alias = "multi_city")]
    MultiCity,
}

/// POST /plan 请求体
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub mode: PlanMode,
    /// 单城市模式必填
    #[serde(default)]
    pub city: Option<String>,
    /// 单城市模式必填，要求为正且不超过配置上限
    #[serde(default)]
    pub days: Option<u32>,
    /// 用户的原始需求描述
    pub user_input: String,
    /// 用户选定的草稿文本，携带时进入完整规划
    #[serde(default)]
    pub selected_draft: Option<String>,
}

/// 多城市输入解析出的一站
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStop {
    pub name: String,
    pub days: u32,
    pub preferences: String,
}
