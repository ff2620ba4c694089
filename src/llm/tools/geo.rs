//! 地理编码与逆地理编码工具

use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::amap::{AmapClient, AmapError, field};

/// 地理编码工具
#[derive(Debug, Clone)]
pub struct AgentToolGeo {
    client: AmapClient,
}

/// 地理编码参数
#[derive(Debug, Deserialize)]
pub struct GeoArgs {
    pub action: String, // "geocode", "regeocode"
    /// 结构化地址（geocode必填）
    pub address: Option<String>,
    /// 地址所在城市，可缩小解析范围
    pub city: Option<String>,
    /// "经度,纬度" 坐标（regeocode必填）
    pub location: Option<String>,
}

/// 地理编码结果
#[derive(Debug, Serialize)]
pub struct GeoResult {
    pub action: String,
    pub result: Value,
}

impl AgentToolGeo {
    pub fn new(client: AmapClient) -> Self {
        Self { client }
    }

    async fn geocode(&self, args: &GeoArgs) -> Result<Value, AmapError> {
        let address = args
            .address
            .as_deref()
            .ok_or_else(|| AmapError::Args("geocode 需要 address 参数".to_string()))?;

        let mut params = vec![("address", address)];
        if let Some(city) = args.city.as_deref() {
            params.push(("city", city));
        }

        let data = self.client.get("/geocode/geo", &params).await?;
        field(&data, "geocodes")
    }

    async fn regeocode(&self, args: &GeoArgs) -> Result<Value, AmapError> {
        let location = args
            .location
            .as_deref()
            .ok_or_else(|| AmapError::Args("regeocode 需要 location 参数".to_string()))?;

        let data = self
            .client
            .get("/geocode/regeo", &[("location", location)])
            .await?;
        field(&data, "regeocode")
    }
}

impl Tool for AgentToolGeo {
    const NAME: &'static str = "maps_geo";

    type Error = AmapError;
    type Args = GeoArgs;
    type Output = GeoResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "地址与坐标互转：geocode将结构化地址解析为经纬度坐标，regeocode将经纬度坐标转换为地址描述。".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": ["geocode", "regeocode"],
                        "description": "要执行的操作：geocode(地址转坐标), regeocode(坐标转地址)"
                    },
                    "address": {
                        "type": "string",
                        "description": "结构化地址，如'北京市朝阳区阜通东大街6号'（geocode必填）"
                    },
                    "city": {
                        "type": "string",
                        "description": "地址所在城市（可选，用于缩小解析范围）"
                    },
                    "location": {
                        "type": "string",
                        "description": "经纬度坐标，格式'经度,纬度'（regeocode必填）"
                    }
                },
                "required": ["action"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        tracing::debug!("🔧 调用工具 {}: {:?}", Self::NAME, args);

        let result = match args.action.as_str() {
            "geocode" => self.geocode(&args).await?,
            "regeocode" => self.regeocode(&args).await?,
            other => return Err(AmapError::Args(format!("未知的action: {}", other))),
        };

        Ok(GeoResult {
            action: args.action,
            result,
        })
    }
}
