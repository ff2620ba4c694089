//! 行程总结 - 模型撰写总结，失败时回退到本地模板

use crate::llm::client::AgentMessage;
use crate::types::{SummarySource, WeatherInfo};

use super::context::PlannerContext;
use super::stages::StagePlans;

/// 把四个阶段的结果与天气整理成完整的行程总结
///
/// 模型调用失败时使用本地模板逐段拼接，模板逐字包含各阶段文本
/// （含哨兵），并通过summary_source标记来源。
pub async fn synthesize_summary(
    ctx: &PlannerContext,
    city: &str,
    days: u32,
    preferences: &str,
    plans: &StagePlans,
    weather: &WeatherInfo,
) -> (String, SummarySource) {
    let template = render_template(plans, weather);

    let messages = [
        AgentMessage::system(format!(
            "整理以下内容，为用户撰写详细完整的{city} {days}天旅游计划，内容需包含景点、餐饮、住宿、出行和天气信息：\n\
             - 景区安排：{view}\n\
             - 餐饮安排：{food}\n\
             - 住宿安排：{accommodation}\n\
             - 出行安排：{traffic}\n\
             - 天气信息：{weather}\n\
             输出格式为清晰的文本，按以下结构组织：\n\
             {template}\n\
             确保输出内容忠实反映输入的各部分规划，并包含天气信息。",
            view = plans.view.text(),
            food = plans.food.text(),
            accommodation = plans.accommodation.text(),
            traffic = plans.traffic.text(),
            weather = weather.as_str(),
        )),
        AgentMessage::user(format!("{city} {days}天行程规划，偏好：{preferences}")),
    ];

    match ctx.gateway.invoke(&messages).await {
        Ok(text) => (text, SummarySource::Agent),
        Err(e) => {
            tracing::error!("总结行程失败: {}", e);
            (template, SummarySource::Fallback)
        }
    }
}

/// 本地兜底模板，段落顺序固定
fn render_template(plans: &StagePlans, weather: &WeatherInfo) -> String {
    format!(
        "详细行程规划：\n景区安排：\n{}\n餐饮安排：\n{}\n住宿安排：\n{}\n出行安排：\n{}\n天气信息：\n{}",
        plans.view.text(),
        plans.food.text(),
        plans.accommodation.text(),
        plans.traffic.text(),
        weather.as_str(),
    )
}
