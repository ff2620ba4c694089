//! 天气查询 - 带重试的工具辅助天气检索

use std::time::Duration;

use crate::llm::client::AgentMessage;
use crate::types::WeatherInfo;

use super::context::PlannerContext;
use super::retry;

/// 查询城市当前及未来数日的天气
///
/// 唯一带重试的外部调用；重试耗尽后降级为哨兵文本而非报错，
/// 下游阶段将哨兵当作普通天气叙述消费。
pub async fn lookup_weather(ctx: &PlannerContext, city: &str) -> WeatherInfo {
    let planner = &ctx.config.planner;

    let result = retry::with_backoff(
        "天气查询",
        planner.weather_retry_attempts,
        Duration::from_millis(planner.retry_backoff_base_ms),
        || async {
            let messages = [
                AgentMessage::system(format!(
                    "使用工具查询{city}的当前及未来数日天气情况，并以简洁的文本形式返回。"
                )),
                AgentMessage::user(format!("查询{city}的天气")),
            ];
            ctx.gateway.invoke(&messages).await
        },
    )
    .await;

    match result {
        Ok(text) => WeatherInfo(text),
        Err(e) => {
            tracing::error!("天气查询重试耗尽，降级为哨兵: {}", e);
            WeatherInfo::failed(&e.to_string())
        }
    }
}
