//! 多城市编排 - 城市列表解析与逐城串行规划

use crate::llm::client::AgentMessage;
use crate::types::{CityStop, MultiCityPlanItem, TransportLink};
use crate::utils::clean_json_response;

use super::context::PlannerContext;
use super::plan_single_city;

/// 城市列表抽取的指令，要求模型输出严格的JSON列表
const CITY_LIST_PROMPT: &str = r#"你是一个行程规划助手，任务是分析用户的多城市旅行需求，生成一个包含城市名称、停留天数和具体偏好的 JSON 列表。
规则：
1. 输出必须是严格的 JSON 格式，例如：[{"name": "上海", "days": 3, "preferences": "文化景点，当地美食"}, {"name": "北京", "days": 2, "preferences": "历史遗迹"}]
2. 不要包含任何额外文本、解释或 markdown（如 ```json）。
3. 如果用户输入不明确（如缺少城市、天数或偏好），返回空列表：[]
4. 确保每个城市的 'days' 是正整数，且总天数合理分配。
5. 'preferences' 字段包含用户对景点、餐饮、住宿或出行的具体要求（如 "文化景点，当地美食"），如果未指定，留空字符串。
6. 如果无法解析需求，返回空列表：[]"#;

/// 从自由文本中解析多城市行程列表
///
/// 模型回复必须是每个元素都含 name、days、preferences 三个键且
/// days 为正整数的JSON列表；任何违反（包括夹带说明文字）都降级为
/// 空列表，由调用方按无法解析处理。
pub async fn parse_city_list(ctx: &PlannerContext, user_input: &str) -> Vec<CityStop> {
    let messages = [
        AgentMessage::system(CITY_LIST_PROMPT),
        AgentMessage::user(user_input),
    ];

    let raw = match ctx.gateway.invoke(&messages).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("解析多城市输入失败: {}", e);
            return Vec::new();
        }
    };

    let cleaned = clean_json_response(&raw);
    let cities: Vec<CityStop> = match serde_json::from_str(&cleaned) {
        Ok(cities) => cities,
        Err(e) => {
            tracing::warn!("解析多城市输入失败: {}", e);
            return Vec::new();
        }
    };

    if cities.iter().any(|c| c.days == 0) {
        tracing::warn!("解析多城市输入失败: 天数必须为正整数");
        return Vec::new();
    }

    cities
}

/// 按输入顺序逐城规划，并在相邻城市之间插入交通衔接记录
///
/// 串行执行：交通衔接依赖上一座已完成城市的身份。单城失败记为
/// 错误条目，编排继续。两城输入产生 [甲行程, 甲→乙交通, 乙行程]。
pub async fn plan_multi_city(ctx: &PlannerContext, cities: &[CityStop]) -> Vec<MultiCityPlanItem> {
    let mut complete_plan = Vec::new();
    let mut previous_city: Option<&str> = None;

    for stop in cities {
        tracing::info!(
            "规划 {} {}天行程，偏好：{}",
            stop.name,
            stop.days,
            stop.preferences
        );

        if let Some(prev) = previous_city {
            complete_plan.push(query_transport_link(ctx, prev, &stop.name).await);
        }

        match plan_single_city(ctx, &stop.name, stop.days, &stop.preferences, None).await {
            Ok(plan) => complete_plan.push(MultiCityPlanItem::Itinerary {
                city: stop.name.clone(),
                days: stop.days,
                plan,
            }),
            Err(e) => {
                tracing::error!("{} 规划失败: {}", stop.name, e);
                complete_plan.push(MultiCityPlanItem::CityError {
                    city: stop.name.clone(),
                    days: stop.days,
                    error: e.to_string(),
                });
            }
        }

        previous_city = Some(&stop.name);
    }

    complete_plan
}

async fn query_transport_link(ctx: &PlannerContext, from: &str, to: &str) -> MultiCityPlanItem {
    let messages = [
        AgentMessage::system(format!(
            "使用工具查询从{from}到{to}的交通方式（飞机、高铁、汽车等）。\n\
             输出清晰的文本，包含推荐的交通方式、预计时间、费用（如果适用）以及预订建议。"
        )),
        AgentMessage::user(format!("从{from}到{to}的交通方式")),
    ];

    match ctx.gateway.invoke(&messages).await {
        Ok(details) => MultiCityPlanItem::Transport(TransportLink::ok(from, to, details)),
        Err(e) => {
            tracing::error!("城市间交通查询失败: {}", e);
            MultiCityPlanItem::Transport(TransportLink::failed(
                from,
                to,
                format!("交通查询失败: {e}"),
            ))
        }
    }
}
