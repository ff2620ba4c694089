//! POI搜索与输入提示工具

use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::amap::{AmapClient, AmapError, field};

/// POI搜索工具
#[derive(Debug, Clone)]
pub struct AgentToolPlaceSearch {
    client: AmapClient,
}

/// POI搜索参数
#[derive(Debug, Deserialize)]
pub struct PlaceSearchArgs {
    pub action: String, // "keyword", "around"
    /// 搜索关键词（keyword必填，around可选）
    pub keywords: Option<String>,
    /// 搜索城市（keyword模式下限定范围）
    pub city: Option<String>,
    /// 中心点坐标，格式"经度,纬度"（around必填）
    pub location: Option<String>,
    /// 搜索半径，单位米（around可选，默认1000）
    pub radius: Option<u32>,
}

/// POI搜索结果
#[derive(Debug, Serialize)]
pub struct PlaceSearchResult {
    pub action: String,
    pub pois: Value,
}

impl AgentToolPlaceSearch {
    pub fn new(client: AmapClient) -> Self {
        Self { client }
    }

    async fn keyword_search(&self, args: &PlaceSearchArgs) -> Result<Value, AmapError> {
        let keywords = args
            .keywords
            .as_deref()
            .ok_or_else(|| AmapError::Args("keyword 搜索需要 keywords 参数".to_string()))?;

        let mut params = vec![("keywords", keywords)];
        if let Some(city) = args.city.as_deref() {
            params.push(("city", city));
            params.push(("citylimit", "true"));
        }

        let data = self.client.get("/place/text", &params).await?;
        field(&data, "pois")
    }

    async fn around_search(&self, args: &PlaceSearchArgs) -> Result<Value, AmapError> {
        let location = args
            .location
            .as_deref()
            .ok_or_else(|| AmapError::Args("around 搜索需要 location 参数".to_string()))?;

        let radius = args.radius.unwrap_or(1000).to_string();
        let mut params = vec![("location", location), ("radius", radius.as_str())];
        if let Some(keywords) = args.keywords.as_deref() {
            params.push(("keywords", keywords));
        }

        let data = self.client.get("/place/around", &params).await?;
        field(&data, "pois")
    }
}

impl Tool for AgentToolPlaceSearch {
    const NAME: &'static str = "maps_place_search";

    type Error = AmapError;
    type Args = PlaceSearchArgs;
    type Output = PlaceSearchResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "POI搜索：keyword在指定城市内按关键词搜索地点（景点、餐厅、酒店等），around搜索某坐标周边的地点。".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": ["keyword", "around"],
                        "description": "搜索方式：keyword(城市内关键词搜索), around(周边搜索)"
                    },
                    "keywords": {
                        "type": "string",
                        "description": "搜索关键词，如'故宫'、'火锅'、'经济型酒店'"
                    },
                    "city": {
                        "type": "string",
                        "description": "搜索城市（keyword模式下限定范围）"
                    },
                    "location": {
                        "type": "string",
                        "description": "中心点坐标，格式'经度,纬度'（around必填）"
                    },
                    "radius": {
                        "type": "integer",
                        "description": "搜索半径，单位米（around可选，默认1000）"
                    }
                },
                "required": ["action"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        tracing::debug!("🔧 调用工具 {}: {:?}", Self::NAME, args);

        let pois = match args.action.as_str() {
            "keyword" => self.keyword_search(&args).await?,
            "around" => self.around_search(&args).await?,
            other => return Err(AmapError::Args(format!("未知的action: {}", other))),
        };

        Ok(PlaceSearchResult {
            action: args.action,
            pois,
        })
    }
}

/// 输入提示工具
#[derive(Debug, Clone)]
pub struct AgentToolInputTips {
    client: AmapClient,
}

/// 输入提示参数
#[derive(Debug, Deserialize)]
pub struct InputTipsArgs {
    pub keywords: String,
    pub city: Option<String>,
}

/// 输入提示结果
#[derive(Debug, Serialize)]
pub struct InputTipsResult {
    pub tips: Value,
}

impl AgentToolInputTips {
    pub fn new(client: AmapClient) -> Self {
        Self { client }
    }
}

impl Tool for AgentToolInputTips {
    const NAME: &'static str = "maps_input_tips";

    type Error = AmapError;
    type Args = InputTipsArgs;
    type Output = InputTipsResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "根据关键词返回地点联想建议，适合在地名不完整或存在歧义时先行确认。"
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "keywords": {
                        "type": "string",
                        "description": "查询关键词"
                    },
                    "city": {
                        "type": "string",
                        "description": "限定提示范围的城市（可选）"
                    }
                },
                "required": ["keywords"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        tracing::debug!("🔧 调用工具 {}: {:?}", Self::NAME, args);

        let mut params = vec![("keywords", args.keywords.as_str())];
        if let Some(city) = args.city.as_deref() {
            params.push(("city", city));
        }

        let data = self.client.get("/assistant/inputtips", &params).await?;
        let tips = field(&data, "tips")?;

        Ok(InputTipsResult { tips })
    }
}
