//! 天气查询工具

use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::amap::{AmapClient, AmapError, field};

/// 天气查询工具
#[derive(Debug, Clone)]
pub struct AgentToolWeather {
    client: AmapClient,
}

/// 天气查询参数
#[derive(Debug, Deserialize)]
pub struct WeatherArgs {
    /// 城市名称或adcode
    pub city: String,
    /// "base"返回实况天气，"all"返回未来数日预报（默认base）
    pub extensions: Option<String>,
}

/// 天气查询结果
#[derive(Debug, Serialize)]
pub struct WeatherToolResult {
    pub city: String,
    pub extensions: String,
    pub weather: Value,
}

impl AgentToolWeather {
    pub fn new(client: AmapClient) -> Self {
        Self { client }
    }
}

impl Tool for AgentToolWeather {
    const NAME: &'static str = "maps_weather";

    type Error = AmapError;
    type Args = WeatherArgs;
    type Output = WeatherToolResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "查询城市天气：extensions=base返回实况天气，extensions=all返回未来数日天气预报。".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "城市名称或adcode，如'北京'、'110000'"
                    },
                    "extensions": {
                        "type": "string",
                        "enum": ["base", "all"],
                        "description": "base(实况天气) 或 all(未来数日预报)，默认base"
                    }
                },
                "required": ["city"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        tracing::debug!("🔧 调用工具 {}: {:?}", Self::NAME, args);

        let extensions = args.extensions.as_deref().unwrap_or("base").to_string();
        let data = self
            .client
            .get(
                "/weather/weatherInfo",
                &[
                    ("city", args.city.as_str()),
                    ("extensions", extensions.as_str()),
                ],
            )
            .await?;

        // 实况与预报挂在不同的字段下
        let weather = if extensions == "all" {
            field(&data, "forecasts")?
        } else {
            field(&data, "lives")?
        };

        Ok(WeatherToolResult {
            city: args.city,
            extensions,
            weather,
        })
    }
}
