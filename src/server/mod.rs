//! HTTP服务 - POST /plan 单一路由与错误映射

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use uuid::Uuid;

use crate::config::Config;
use crate::llm::client::AgentClient;
use crate::planner::{self, PlanError, PlannerContext};
use crate::types::{PlanMode, PlanRequest, PlanResponse};

impl IntoResponse for PlanError {
    fn into_response(self) -> Response {
        let status = match &self {
            PlanError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PlanError::Decomposition(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// 构建路由，状态为规划器上下文
pub fn router(ctx: PlannerContext) -> Router {
    Router::new()
        .route("/plan", post(handle_plan))
        .with_state(ctx)
}

/// 处理前端发送的行程规划请求
async fn handle_plan(
    State(ctx): State<PlannerContext>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, PlanError> {
    let request_id = Uuid::new_v4();
    let preview: String = request.user_input.chars().take(50).collect();
    tracing::info!(
        "[{}] 收到请求：mode={:?}, city={:?}, days={:?}, user_input={}...",
        request_id,
        request.mode,
        request.city,
        request.days,
        preview
    );

    let response = match request.mode {
        PlanMode::SingleCity => handle_single_city(&ctx, &request).await?,
        PlanMode::MultiCity => handle_multi_city(&ctx, &request).await?,
    };

    tracing::info!("[{}] 规划完成", request_id);
    Ok(Json(response))
}

async fn handle_single_city(
    ctx: &PlannerContext,
    request: &PlanRequest,
) -> Result<PlanResponse, PlanError> {
    let city = request.city.as_deref().unwrap_or("").trim();
    let days = request.days.unwrap_or(0);
    if city.is_empty() || days == 0 {
        return Err(PlanError::InvalidRequest(
            "单城市模式需要提供城市名称和有效天数".to_string(),
        ));
    }
    let max_days = ctx.config.planner.max_days;
    if days > max_days {
        return Err(PlanError::InvalidRequest(format!(
            "天数需在 1 到 {max_days} 之间"
        )));
    }

    // 空字符串草稿视同未选定
    let selected_draft = request
        .selected_draft
        .as_deref()
        .filter(|d| !d.trim().is_empty());

    match selected_draft {
        Some(draft) => {
            let preferences = format!("{}。选定的草稿：{}", request.user_input, draft);
            let final_plan =
                planner::plan_single_city(ctx, city, days, &preferences, Some(draft)).await?;
            Ok(PlanResponse::FinalPlan { final_plan })
        }
        None => {
            let drafts =
                planner::generate_drafts(ctx, city, days, &request.user_input, None).await;
            Ok(PlanResponse::Drafts { drafts })
        }
    }
}

async fn handle_multi_city(
    ctx: &PlannerContext,
    request: &PlanRequest,
) -> Result<PlanResponse, PlanError> {
    let cities = planner::parse_city_list(ctx, &request.user_input).await;
    if cities.is_empty() {
        return Err(PlanError::InvalidRequest(
            "无法解析多城市输入，请明确指定城市、天数和偏好".to_string(),
        ));
    }

    tracing::info!("解析出 {} 座城市，开始逐城规划", cities.len());
    let items = planner::plan_multi_city(ctx, &cities).await;
    Ok(PlanResponse::Cities { cities: items })
}

/// 启动HTTP服务：建立Agent客户端、检查模型连接、绑定端口并开始服务
pub async fn serve(config: Config) -> Result<()> {
    let client = AgentClient::new(&config)?;
    client.check_connection().await?;

    let addr = config.server.bind_addr();
    let ctx = PlannerContext::new(Arc::new(client), config);
    let app = router(ctx);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 行程规划服务已启动: http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("收到退出信号，服务关闭");
        })
        .await?;

    Ok(())
}
