//! 行程规划器 - 围绕Agent网关编排的分阶段行程生成

use thiserror::Error;

use crate::types::CityItinerary;

pub mod context;
mod decompose;
mod drafts;
mod multi_city;
mod retry;
mod stages;
mod summary;
mod weather;

pub use context::PlannerContext;
pub use drafts::generate_drafts;
pub use multi_city::{parse_city_list, plan_multi_city};
pub use weather::lookup_weather;

/// 规划请求层面的错误
///
/// 除此之外的失败都在各自阶段内降级为哨兵文本，不会传播到这里。
#[derive(Debug, Error)]
pub enum PlanError {
    /// 请求参数不合法，规划未开始
    #[error("{0}")]
    InvalidRequest(String),
    /// 任务拆分失败，该城市的规划无法继续
    #[error("任务拆分失败: {0}")]
    Decomposition(String),
}

/// 为单个城市生成完整行程
///
/// 任务拆分失败是唯一的致命路径；天气、四个阶段与总结各自降级，
/// 返回的行程字段永远齐全。
pub async fn plan_single_city(
    ctx: &PlannerContext,
    city: &str,
    days: u32,
    preferences: &str,
    selected_draft: Option<&str>,
) -> Result<CityItinerary, PlanError> {
    let start = std::time::Instant::now();
    tracing::info!("开始规划 {} {}天行程", city, days);

    let tasks =
        decompose::decompose_requirements(ctx, city, days, preferences, selected_draft).await?;

    let weather = weather::lookup_weather(ctx, city).await;

    let plans = stages::run_pipeline(ctx, city, days, &tasks, &weather).await;
    tracing::info!("分步规划耗时: {:.2}秒", start.elapsed().as_secs_f64());

    let (summary, summary_source) =
        summary::synthesize_summary(ctx, city, days, preferences, &plans, &weather).await;
    tracing::info!("总查询耗时: {:.2}秒", start.elapsed().as_secs_f64());

    Ok(CityItinerary {
        summary,
        summary_source,
        view: plans.view,
        food: plans.food,
        accommodation: plans.accommodation,
        traffic: plans.traffic,
        weather,
    })
}
