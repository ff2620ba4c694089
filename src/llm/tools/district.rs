//! 行政区划查询工具

use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::amap::{AmapClient, AmapError, field};

/// 行政区划查询工具
#[derive(Debug, Clone)]
pub struct AgentToolDistrict {
    client: AmapClient,
}

/// 行政区划查询参数
#[derive(Debug, Deserialize)]
pub struct DistrictArgs {
    /// 行政区名称、citycode或adcode
    pub keywords: String,
    /// 返回下级行政区的层数，0-3（默认1）
    pub subdistrict: Option<u8>,
}

/// 行政区划查询结果
#[derive(Debug, Serialize)]
pub struct DistrictResult {
    pub districts: Value,
}

impl AgentToolDistrict {
    pub fn new(client: AmapClient) -> Self {
        Self { client }
    }
}

impl Tool for AgentToolDistrict {
    const NAME: &'static str = "maps_district";

    type Error = AmapError;
    type Args = DistrictArgs;
    type Output = DistrictResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description:
                "行政区划查询：根据城市或区县名称返回其adcode、中心坐标与下级行政区列表。"
                    .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "keywords": {
                        "type": "string",
                        "description": "行政区名称、citycode或adcode，如'北京'、'110000'"
                    },
                    "subdistrict": {
                        "type": "integer",
                        "description": "返回下级行政区的层数，0-3（默认1）"
                    }
                },
                "required": ["keywords"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        tracing::debug!("🔧 调用工具 {}: {:?}", Self::NAME, args);

        let subdistrict = args.subdistrict.unwrap_or(1).to_string();
        let data = self
            .client
            .get(
                "/config/district",
                &[
                    ("keywords", args.keywords.as_str()),
                    ("subdistrict", subdistrict.as_str()),
                    ("extensions", "base"),
                ],
            )
            .await?;
        let districts = field(&data, "districts")?;

        Ok(DistrictResult { districts })
    }
}
