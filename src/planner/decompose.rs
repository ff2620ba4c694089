//! 任务拆分 - 把自由文本需求拆成景区、住宿、餐饮、出行四个子需求

use crate::llm::client::AgentMessage;
use crate::types::SubRequirements;
use crate::utils::clean_json_response;

use super::PlanError;
use super::context::PlannerContext;

/// 将用户需求拆分为四个子需求
///
/// 模型被要求仅输出含四个固定键的JSON对象；网关失败、JSON解析失败
/// 或键缺失都视为致命错误，该城市的规划无法继续。
pub async fn decompose_requirements(
    ctx: &PlannerContext,
    city: &str,
    days: u32,
    preferences: &str,
    selected_draft: Option<&str>,
) -> Result<SubRequirements, PlanError> {
    let draft_ref = selected_draft.unwrap_or("无");
    let messages = [
        AgentMessage::system(format!(
            "将用户对{city}的旅游需求（{preferences}）拆分为景区、住宿、餐饮、出行四个方面的详细要求，适合{days}天行程。\n\
             参考选定的草稿：{draft_ref}。\n\
             仅输出有效的 JSON 字符串，格式如下：\n\
             {{\"景区\": \"...\", \"住宿\": \"...\", \"餐饮\": \"...\", \"出行\": \"...\"}}"
        )),
        AgentMessage::user(format!(
            "{preferences} 用户希望的行程风格大致如下：{draft_ref}"
        )),
    ];

    let raw = match ctx.gateway.invoke(&messages).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("任务拆分阶段模型调用失败: {}", e);
            return Err(PlanError::Decomposition(e.to_string()));
        }
    };

    let cleaned = clean_json_response(&raw);
    match serde_json::from_str::<SubRequirements>(&cleaned) {
        Ok(tasks) => Ok(tasks),
        Err(e) => {
            tracing::error!("任务拆分失败: {}", e);
            Err(PlanError::Decomposition(e.to_string()))
        }
    }
}
