//! 草稿生成 - 三份不同偏向的方案并发生成

use crate::llm::client::AgentMessage;
use crate::types::{DraftBias, WeatherInfo};

use super::context::PlannerContext;
use super::weather;

/// 并发生成运动、文化、美食三份偏向的草稿
///
/// 结果槽位顺序固定为偏向顺序，与完成先后无关；单个槽位失败只影响
/// 该槽位，以哨兵文本占位。未传入天气时先做一次天气查询。
pub async fn generate_drafts(
    ctx: &PlannerContext,
    city: &str,
    days: u32,
    preferences: &str,
    weather: Option<WeatherInfo>,
) -> Vec<String> {
    let weather = match weather {
        Some(w) => w,
        None => weather::lookup_weather(ctx, city).await,
    };

    let (sport, culture, food) = futures::join!(
        run_draft(ctx, city, days, preferences, &weather, DraftBias::Sport, 1),
        run_draft(ctx, city, days, preferences, &weather, DraftBias::Culture, 2),
        run_draft(ctx, city, days, preferences, &weather, DraftBias::Food, 3),
    );

    vec![sport, culture, food]
}

async fn run_draft(
    ctx: &PlannerContext,
    city: &str,
    days: u32,
    preferences: &str,
    weather: &WeatherInfo,
    bias: DraftBias,
    slot: usize,
) -> String {
    let bias_line = format!(
        "你需要为用户希望的旅行提供更加偏{}的方案选择，快速给出笼统的旅行方案，基于用户偏好：{preferences}，城市：{city}，天数：{days}。",
        bias.label(),
    );
    let messages = [
        AgentMessage::system(format!(
            "为{city}的{days}天行程生成一个草稿方案，基于用户偏好：{preferences}。\n\
             {bias_line}\n\
             根据以下天气情况：{weather}，确保推荐的景点、餐饮、住宿和交通安排适合天气条件。\n\
             输出简洁的文本，概述主要景点、餐饮、住宿、交通安排和天气情况。",
            weather = weather.as_str(),
        )),
        AgentMessage::user(format!(
            "草稿 {slot}：{city}，{days}天，偏好：{preferences}"
        )),
    ];

    match ctx.gateway.invoke(&messages).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("生成草稿 {} 失败: {}", slot, e);
            format!("草稿 {slot} 生成失败: {e}")
        }
    }
}
