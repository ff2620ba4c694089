//! 路径规划工具

use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::amap::{AmapClient, AmapError, field};

/// 路径规划工具，覆盖步行、公交、驾车、骑行四种出行方式
#[derive(Debug, Clone)]
pub struct AgentToolRoute {
    client: AmapClient,
}

/// 路径规划参数
#[derive(Debug, Deserialize)]
pub struct RouteArgs {
    pub mode: String, // "walking", "transit", "driving", "bicycling"
    /// 出发点坐标，格式"经度,纬度"
    pub origin: String,
    /// 目的地坐标，格式"经度,纬度"
    pub destination: String,
    /// 出发城市（transit必填）
    pub city: Option<String>,
    /// 到达城市（transit跨城时填写）
    pub cityd: Option<String>,
}

/// 路径规划结果
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub mode: String,
    pub route: Value,
}

impl AgentToolRoute {
    pub fn new(client: AmapClient) -> Self {
        Self { client }
    }

    async fn walking(&self, args: &RouteArgs) -> Result<Value, AmapError> {
        let data = self
            .client
            .get(
                "/direction/walking",
                &[
                    ("origin", args.origin.as_str()),
                    ("destination", args.destination.as_str()),
                ],
            )
            .await?;
        field(&data, "route")
    }

    async fn driving(&self, args: &RouteArgs) -> Result<Value, AmapError> {
        let data = self
            .client
            .get(
                "/direction/driving",
                &[
                    ("origin", args.origin.as_str()),
                    ("destination", args.destination.as_str()),
                ],
            )
            .await?;
        field(&data, "route")
    }

    async fn transit(&self, args: &RouteArgs) -> Result<Value, AmapError> {
        let city = args
            .city
            .as_deref()
            .ok_or_else(|| AmapError::Args("transit 需要 city 参数".to_string()))?;
        // 跨城公交未指定到达城市时按同城处理
        let cityd = args.cityd.as_deref().unwrap_or(city);

        let data = self
            .client
            .get(
                "/direction/transit/integrated",
                &[
                    ("origin", args.origin.as_str()),
                    ("destination", args.destination.as_str()),
                    ("city", city),
                    ("cityd", cityd),
                ],
            )
            .await?;
        field(&data, "route")
    }

    async fn bicycling(&self, args: &RouteArgs) -> Result<Value, AmapError> {
        // 骑行规划只有v4接口
        self.client
            .get_v4(
                "/direction/bicycling",
                &[
                    ("origin", args.origin.as_str()),
                    ("destination", args.destination.as_str()),
                ],
            )
            .await
    }
}

impl Tool for AgentToolRoute {
    const NAME: &'static str = "maps_direction";

    type Error = AmapError;
    type Args = RouteArgs;
    type Output = RouteResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "两点之间的路径规划，支持步行(walking)、公共交通(transit)、驾车(driving)、骑行(bicycling)四种方式，返回距离、耗时与分段方案。".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "mode": {
                        "type": "string",
                        "enum": ["walking", "transit", "driving", "bicycling"],
                        "description": "出行方式"
                    },
                    "origin": {
                        "type": "string",
                        "description": "出发点坐标，格式'经度,纬度'"
                    },
                    "destination": {
                        "type": "string",
                        "description": "目的地坐标，格式'经度,纬度'"
                    },
                    "city": {
                        "type": "string",
                        "description": "出发城市名称或citycode（transit必填）"
                    },
                    "cityd": {
                        "type": "string",
                        "description": "到达城市名称或citycode（transit跨城时填写）"
                    }
                },
                "required": ["mode", "origin", "destination"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        tracing::debug!("🔧 调用工具 {}: {:?}", Self::NAME, args);

        let route = match args.mode.as_str() {
            "walking" => self.walking(&args).await?,
            "transit" => self.transit(&args).await?,
            "driving" => self.driving(&args).await?,
            "bicycling" => self.bicycling(&args).await?,
            other => return Err(AmapError::Args(format!("未知的mode: {}", other))),
        };

        Ok(RouteResult {
            mode: args.mode,
            route,
        })
    }
}
