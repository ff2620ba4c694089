use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use tripflow_rs::config::Config;
use tripflow_rs::llm::client::{AgentError, AgentGateway, AgentMessage};
use tripflow_rs::planner::PlannerContext;
use tripflow_rs::server::router;

const TASKS_JSON: &str = r#"{"景区": "历史景点优先", "住宿": "靠近地铁的三星酒店", "餐饮": "本地特色小吃", "出行": "地铁优先"}"#;
const WEATHER_TEXT: &str = "晴，气温20到26度";
const VIEW_TEXT: &str = "第一天故宫，第二天长城";
const FOOD_TEXT: &str = "全聚德烤鸭，簋街小吃";
const STAY_TEXT: &str = "王府井附近三星酒店";
const ROUTE_TEXT: &str = "地铁为主，景点间步行";
const SUMMARY_TEXT: &str = "这是一份串联所有安排的完整行程";
const SPORT_DRAFT: &str = "奥森公园骑行与长城徒步";
const CULTURE_DRAFT: &str = "故宫与国家博物馆两日";
const FOOD_DRAFT: &str = "簋街与牛街的美食之旅";
const TWO_CITY_JSON: &str = r#"[{"name": "北京", "days": 3, "preferences": "历史文化"}, {"name": "上海", "days": 2, "preferences": "都市风光"}]"#;

/// 按提示词里的标记路由回复的脚本化Agent
struct ScriptedGateway {
    script: Box<dyn Fn(&str) -> Result<String, AgentError> + Send + Sync>,
}

#[async_trait]
impl AgentGateway for ScriptedGateway {
    async fn invoke(&self, messages: &[AgentMessage]) -> Result<String, AgentError> {
        let text = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        (self.script)(&text)
    }
}

/// 针对规划流程中每种提示词的正常回复
fn canned_reply(text: &str) -> Result<String, AgentError> {
    if text.contains("拆分为景区、住宿、餐饮、出行") {
        Ok(TASKS_JSON.to_string())
    } else if text.contains("整理以下内容") {
        Ok(SUMMARY_TEXT.to_string())
    } else if text.contains("当前及未来数日天气情况") {
        Ok(WEATHER_TEXT.to_string())
    } else if text.contains("草稿 1") {
        Ok(SPORT_DRAFT.to_string())
    } else if text.contains("草稿 2") {
        Ok(CULTURE_DRAFT.to_string())
    } else if text.contains("草稿 3") {
        Ok(FOOD_DRAFT.to_string())
    } else if text.contains("景点推荐") {
        Ok(VIEW_TEXT.to_string())
    } else if text.contains("餐饮推荐") {
        Ok(FOOD_TEXT.to_string())
    } else if text.contains("住宿推荐") {
        Ok(STAY_TEXT.to_string())
    } else if text.contains("交通规划") {
        Ok(ROUTE_TEXT.to_string())
    } else if text.contains("多城市旅行需求") {
        Ok(TWO_CITY_JSON.to_string())
    } else if text.contains("的交通方式（飞机、高铁、汽车等）") {
        Ok("高铁约4.5小时，二等座550元".to_string())
    } else {
        panic!("unexpected prompt: {text}");
    }
}

/// 构建挂接脚本化Agent的测试路由
fn test_app<F>(script: F) -> Router
where
    F: Fn(&str) -> Result<String, AgentError> + Send + Sync + 'static,
{
    let gateway = Arc::new(ScriptedGateway {
        script: Box::new(script),
    });
    let mut config = Config::default();
    // Millisecond backoff keeps retry paths from slowing the suite down
    config.planner.retry_backoff_base_ms = 1;
    router(PlannerContext::new(gateway, config))
}

/// 发送 POST /plan 请求并把响应体解析为JSON
async fn post_plan(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/plan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_single_city_without_draft_returns_three_drafts() {
    let app = test_app(canned_reply);

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "单城市",
            "city": "北京",
            "days": 3,
            "user_input": "历史文化"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drafts"], json!([SPORT_DRAFT, CULTURE_DRAFT, FOOD_DRAFT]));
    assert!(body.get("final_plan").is_none());
}

#[tokio::test]
async fn test_single_city_with_selected_draft_returns_final_plan() {
    let app = test_app(canned_reply);

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "单城市",
            "city": "北京",
            "days": 3,
            "user_input": "历史文化",
            "selected_draft": CULTURE_DRAFT
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let plan = body["final_plan"].as_object().unwrap();
    // 完整行程的字段永远齐全
    assert_eq!(plan.len(), 7);
    assert_eq!(plan["summary"], SUMMARY_TEXT);
    assert_eq!(plan["summary_source"], "agent");
    assert_eq!(plan["view"], VIEW_TEXT);
    assert_eq!(plan["food"], FOOD_TEXT);
    assert_eq!(plan["accommodation"], STAY_TEXT);
    assert_eq!(plan["traffic"], ROUTE_TEXT);
    assert_eq!(plan["weather"], WEATHER_TEXT);
}

#[tokio::test]
async fn test_mode_accepts_snake_case_alias() {
    let app = test_app(canned_reply);

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "single_city",
            "city": "北京",
            "days": 3,
            "user_input": "历史文化"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drafts"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_blank_selected_draft_is_treated_as_missing() {
    let app = test_app(canned_reply);

    // 空白草稿等同未选定，回到草稿生成分支
    let (status, body) = post_plan(
        app,
        json!({
            "mode": "单城市",
            "city": "北京",
            "days": 3,
            "user_input": "历史文化",
            "selected_draft": "   "
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("drafts").is_some());
    assert!(body.get("final_plan").is_none());
}

#[tokio::test]
async fn test_missing_city_is_rejected_before_any_model_call() {
    let app = test_app(|_| panic!("validation should reject before any model call"));

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "单城市",
            "days": 3,
            "user_input": "历史文化"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "单城市模式需要提供城市名称和有效天数");
}

#[tokio::test]
async fn test_zero_days_is_rejected() {
    let app = test_app(|_| panic!("validation should reject before any model call"));

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "单城市",
            "city": "北京",
            "days": 0,
            "user_input": "历史文化"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "单城市模式需要提供城市名称和有效天数");
}

#[tokio::test]
async fn test_days_over_limit_is_rejected() {
    let app = test_app(|_| panic!("validation should reject before any model call"));

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "单城市",
            "city": "北京",
            "days": 31,
            "user_input": "历史文化"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "天数需在 1 到 30 之间");
}

#[tokio::test]
async fn test_unknown_mode_is_rejected_by_deserialization() {
    let app = test_app(|_| panic!("request should never reach the planner"));

    let request = Request::builder()
        .method("POST")
        .uri("/plan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "mode": "环游",
                "city": "北京",
                "days": 3,
                "user_input": "历史文化"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_stage_failure_surfaces_as_sentinel_text_in_response() {
    let app = test_app(|text| {
        if text.contains("餐饮推荐") {
            Err(AgentError::Completion("模型超时".to_string()))
        } else {
            canned_reply(text)
        }
    });

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "单城市",
            "city": "北京",
            "days": 3,
            "user_input": "历史文化",
            "selected_draft": CULTURE_DRAFT
        }),
    )
    .await;

    // 单阶段失败不影响整体响应，失败字段以哨兵文本呈现
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["final_plan"]["food"],
        "餐饮规划失败: 模型调用失败: 模型超时"
    );
    assert_eq!(body["final_plan"]["view"], VIEW_TEXT);
}

#[tokio::test]
async fn test_decomposition_failure_maps_to_server_error() {
    let app = test_app(|text| {
        if text.contains("拆分为景区、住宿、餐饮、出行") {
            Ok("这不是JSON".to_string())
        } else {
            canned_reply(text)
        }
    });

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "单城市",
            "city": "北京",
            "days": 3,
            "user_input": "历史文化",
            "selected_draft": CULTURE_DRAFT
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("任务拆分失败: "));
}

#[tokio::test]
async fn test_multi_city_interleaves_itineraries_with_transport() {
    let app = test_app(canned_reply);

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "多城市",
            "user_input": "我想去北京3天看历史，再去上海2天逛外滩"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let cities = body["cities"].as_array().unwrap();
    assert_eq!(cities.len(), 3);

    assert_eq!(cities[0]["city"], "北京");
    assert_eq!(cities[0]["days"], 3);
    assert!(cities[0]["plan"].is_object());

    // 两城之间的交通衔接项只有from/to/details三个字段
    assert_eq!(cities[1]["from"], "北京");
    assert_eq!(cities[1]["to"], "上海");
    assert_eq!(cities[1]["details"], "高铁约4.5小时，二等座550元");
    assert!(cities[1].get("error").is_none());
    assert!(cities[1].get("plan").is_none());

    assert_eq!(cities[2]["city"], "上海");
    assert_eq!(cities[2]["days"], 2);
}

#[tokio::test]
async fn test_multi_city_unparseable_input_is_rejected() {
    let app = test_app(|text| {
        if text.contains("多城市旅行需求") {
            Ok("抱歉，我没有理解您的需求".to_string())
        } else {
            canned_reply(text)
        }
    });

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "多城市",
            "user_input": "随便走走"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "无法解析多城市输入，请明确指定城市、天数和偏好");
}

#[tokio::test]
async fn test_multi_city_one_failed_city_keeps_others() {
    let app = test_app(|text| {
        if text.contains("将用户对上海的旅游需求") {
            Err(AgentError::Completion("模型超时".to_string()))
        } else {
            canned_reply(text)
        }
    });

    let (status, body) = post_plan(
        app,
        json!({
            "mode": "多城市",
            "user_input": "我想去北京3天、上海2天"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let cities = body["cities"].as_array().unwrap();
    assert_eq!(cities.len(), 3);
    assert!(cities[0]["plan"].is_object());
    let error = cities[2]["error"].as_str().unwrap();
    assert!(error.starts_with("任务拆分失败: "));
    assert!(cities[2].get("plan").is_none());
}
