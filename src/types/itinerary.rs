use std::borrow::Cow;

use serde::{Deserialize, Serialize, Serializer};

/// 任务拆分产出的四个子需求
///
/// 键名与模型被要求输出的JSON键完全一致，四个键缺一不可。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRequirements {
    /// 景区游览要求
    #[serde(rename = "景区")]
    pub sightseeing: String,
    /// 住宿要求
    #[serde(rename = "住宿")]
    pub lodging: String,
    /// 餐饮要求
    #[serde(rename = "餐饮")]
    pub dining: String,
    /// 出行要求
    #[serde(rename = "出行")]
    pub transport: String,
}

/// 行程规划的四个阶段，按数据依赖排定执行顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sightseeing,
    Dining,
    Lodging,
    Transport,
}

impl Stage {
    /// 失败哨兵和日志里使用的中文名
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Sightseeing => "景点",
            Stage::Dining => "餐饮",
            Stage::Lodging => "住宿",
            Stage::Transport => "交通",
        }
    }
}

/// 单个阶段的结果：成功文本，或带原因的降级
///
/// 进程内的消费方据此区分降级；序列化时只输出叙述文本
/// （降级时为哨兵文本），保持响应里各字段是普通字符串的形状。
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    Ok(String),
    Degraded { stage: Stage, reason: String },
}

impl StageOutcome {
    /// 面向提示词与响应的叙述文本
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            StageOutcome::Ok(text) => Cow::Borrowed(text.as_str()),
            StageOutcome::Degraded { stage, reason } => {
                Cow::Owned(format!("{}规划失败: {}", stage.label(), reason))
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutcome::Degraded { .. })
    }
}

impl Serialize for StageOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text())
    }
}

/// 天气信息：不透明的叙述文本，可能携带失败哨兵
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherInfo(pub String);

impl WeatherInfo {
    /// 重试耗尽后的降级哨兵
    pub fn failed(reason: &str) -> Self {
        WeatherInfo(format!("天气查询失败: {}", reason))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 行程总结的来源，属于对外契约的一部分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    /// 模型生成
    Agent,
    /// 本地兜底模板拼接
    Fallback,
}

/// 一座城市的完整行程
///
/// 字段永远齐全，降级的部分以哨兵文本呈现，字段顺序即响应键顺序。
#[derive(Debug, Clone, Serialize)]
pub struct CityItinerary {
    pub summary: String,
    pub summary_source: SummarySource,
    pub view: StageOutcome,
    pub food: StageOutcome,
    pub accommodation: StageOutcome,
    pub traffic: StageOutcome,
    pub weather: WeatherInfo,
}

/// 草稿的风格偏向，槽位顺序固定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftBias {
    Sport,
    Culture,
    Food,
}

impl DraftBias {
    pub fn label(&self) -> &'static str {
        match self {
            DraftBias::Sport => "运动",
            DraftBias::Culture => "文化",
            DraftBias::Food => "美食",
        }
    }
}

/// 相邻两城之间的交通衔接记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportLink {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransportLink {
    pub fn ok(from: &str, to: &str, details: String) -> Self {
        TransportLink {
            from: from.to_string(),
            to: to.to_string(),
            details: Some(details),
            error: None,
        }
    }

    pub fn failed(from: &str, to: &str, reason: String) -> Self {
        TransportLink {
            from: from.to_string(),
            to: to.to_string(),
            details: None,
            error: Some(reason),
        }
    }
}

/// 多城市结果列表中的一项
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MultiCityPlanItem {
    /// 规划成功的城市
    Itinerary {
        city: String,
        days: u32,
        plan: CityItinerary,
    },
    /// 该城市规划失败（任务拆分等致命错误），整体编排继续
    CityError {
        city: String,
        days: u32,
        error: String,
    },
    /// 相邻城市间的交通衔接
    Transport(TransportLink),
}

/// POST /plan 的三种成功响应
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PlanResponse {
    Drafts { drafts: Vec<String> },
    FinalPlan { final_plan: CityItinerary },
    Cities { cities: Vec<MultiCityPlanItem> },
}
