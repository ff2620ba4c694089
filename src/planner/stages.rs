//! 分阶段规划 - 景点、餐饮、住宿、交通四个依赖有序的阶段

use crate::llm::client::AgentMessage;
use crate::types::{Stage, StageOutcome, SubRequirements, WeatherInfo};

use super::context::PlannerContext;

/// 四个阶段的规划结果，字段永远齐全
#[derive(Debug, Clone)]
pub struct StagePlans {
    pub view: StageOutcome,
    pub food: StageOutcome,
    pub accommodation: StageOutcome,
    pub traffic: StageOutcome,
}

/// 依次执行四个规划阶段
///
/// 依赖关系：住宿参考景点结果，交通参考景点、住宿结果和天气。
/// 任何阶段降级后，其哨兵文本仍作为后续阶段的输入，流水线本身不会失败。
pub async fn run_pipeline(
    ctx: &PlannerContext,
    city: &str,
    days: u32,
    tasks: &SubRequirements,
    weather: &WeatherInfo,
) -> StagePlans {
    let view = query_view(ctx, city, days, &tasks.sightseeing, weather).await;
    let food = query_food(ctx, city, &tasks.dining).await;
    let accommodation = query_accommodation(ctx, city, &tasks.lodging, &view).await;
    let traffic = query_traffic(
        ctx,
        city,
        days,
        &tasks.transport,
        &view,
        &accommodation,
        weather,
    )
    .await;

    StagePlans {
        view,
        food,
        accommodation,
        traffic,
    }
}

/// 执行单个阶段的一次Agent调用，失败时降级为该阶段的哨兵结果
async fn run_stage(
    ctx: &PlannerContext,
    stage: Stage,
    system_prompt: String,
    user_prompt: String,
) -> StageOutcome {
    let messages = [
        AgentMessage::system(system_prompt),
        AgentMessage::user(user_prompt),
    ];
    match ctx.gateway.invoke(&messages).await {
        Ok(text) => StageOutcome::Ok(text),
        Err(e) => {
            tracing::error!("{}规划失败: {}", stage.label(), e);
            StageOutcome::Degraded {
                stage,
                reason: e.to_string(),
            }
        }
    }
}

async fn query_view(
    ctx: &PlannerContext,
    city: &str,
    days: u32,
    requirement: &str,
    weather: &WeatherInfo,
) -> StageOutcome {
    run_stage(
        ctx,
        Stage::Sightseeing,
        format!(
            "根据以下天气情况：{weather}，参考旅游攻略意见（{requirement}），为用户提出适合{city}未来{days}天的游玩景点。\n\
             输出清晰的文本，列出景点名称、简介、开放时间、门票价格（如果适用）以及适合游览的理由（考虑天气影响）。",
            weather = weather.as_str(),
        ),
        format!("{city} {days}天景点推荐，偏好：{requirement}"),
    )
    .await
}

async fn query_food(ctx: &PlannerContext, city: &str, requirement: &str) -> StageOutcome {
    run_stage(
        ctx,
        Stage::Dining,
        format!(
            "你是一个精确的旅游路线规划者，善于将景点规划与当地美食位置结合，为用户提供交通方便、口碑好的宝藏美食。\n\
             参考旅游攻略意见（{requirement}），结合当地美食评价情况，为用户提出适合的享受当地美食的地点。\n\
             输出清晰的文本，列出餐厅名称、特色菜、地址、价格范围（如果适用）。"
        ),
        format!("{city}餐饮推荐，偏好：{requirement}"),
    )
    .await
}

async fn query_accommodation(
    ctx: &PlannerContext,
    city: &str,
    requirement: &str,
    view_plan: &StageOutcome,
) -> StageOutcome {
    run_stage(
        ctx,
        Stage::Lodging,
        format!(
            "你是一个精确的旅游路线规划者，善于将景点规划与酒店住宿结合起来，为用户提供交通方便、靠近景区的住宿地点。\n\
             参考旅游景点规划：{view_plan}，借鉴旅游攻略意见（{requirement}），结合交通便利程度，为用户推荐合适的酒店住宿。\n\
             输出清晰的文本，列出酒店名称、地址、房型、价格范围（如果适用）。",
            view_plan = view_plan.text(),
        ),
        format!("{city}住宿推荐，偏好：{requirement}"),
    )
    .await
}

async fn query_traffic(
    ctx: &PlannerContext,
    city: &str,
    days: u32,
    requirement: &str,
    view_plan: &StageOutcome,
    accommodation_plan: &StageOutcome,
    weather: &WeatherInfo,
) -> StageOutcome {
    run_stage(
        ctx,
        Stage::Transport,
        format!(
            "你是一个精确的旅游路线规划者，善于将景点规划、住宿安排中涉及的位置用合理的方式联系起来，为用户提供精确详细的出行方案。\n\
             根据以下天气情况：{weather}，参考旅游景点规划：{view_plan}以及住宿安排：{accommodation_plan}，借鉴旅游攻略意见（{requirement}），提供{city}未来{days}天的合理详细出行路线规划。\n\
             输出清晰的文本，包含每段路线的起点、终点、交通方式、预计时间和费用（如果适用），考虑天气对交通的影响。",
            weather = weather.as_str(),
            view_plan = view_plan.text(),
            accommodation_plan = accommodation_plan.text(),
        ),
        format!("{city}交通规划，偏好：{requirement}"),
    )
    .await
}
