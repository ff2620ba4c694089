//! 高德Web服务REST客户端

use std::time::Duration;

use serde_json::Value;

use crate::config::AmapConfig;

/// 高德工具错误
#[derive(Debug, thiserror::Error)]
pub enum AmapError {
    /// 网络层失败
    #[error("高德请求失败: {0}")]
    Http(String),

    /// 业务层失败（status != "1"），携带接口返回的info信息
    #[error("高德接口返回错误: {0}")]
    Api(String),

    /// 工具参数不满足要求
    #[error("工具参数错误: {0}")]
    Args(String),

    /// 成功响应里缺少预期字段
    #[error("高德响应缺少字段: {0}")]
    MissingField(&'static str),
}

/// 高德REST客户端
///
/// 每次智能体调用构建一个新实例，同一次调用内的全部工具共享它。
#[derive(Debug, Clone)]
pub struct AmapClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AmapClient {
    pub fn new(config: &AmapConfig) -> Result<Self, AmapError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AmapError::Http(e.to_string()))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// 调用v3接口，status == "1" 视为成功，否则取info作为错误信息
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, AmapError> {
        let url = format!("{}{}", self.base_url, path);
        let mut query: Vec<(&str, &str)> = vec![("key", self.api_key.as_str())];
        query.extend_from_slice(params);

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AmapError::Http(e.to_string()))?;

        let data: Value = response
            .json()
            .await
            .map_err(|e| AmapError::Http(e.to_string()))?;

        if data.get("status").and_then(|s| s.as_str()) == Some("1") {
            Ok(data)
        } else {
            let info = data
                .get("info")
                .and_then(|i| i.as_str())
                .unwrap_or("unknown error");
            Err(AmapError::Api(info.to_string()))
        }
    }

    /// 调用v4接口（骑行等），errcode == 0 视为成功，直接返回data子树
    pub async fn get_v4(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, AmapError> {
        let url = format!("{}{}", self.base_url.replace("/v3", "/v4"), path);
        let mut query: Vec<(&str, &str)> = vec![("key", self.api_key.as_str())];
        query.extend_from_slice(params);

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AmapError::Http(e.to_string()))?;

        let data: Value = response
            .json()
            .await
            .map_err(|e| AmapError::Http(e.to_string()))?;

        if data.get("errcode").and_then(|c| c.as_i64()) == Some(0) {
            data.get("data")
                .cloned()
                .ok_or(AmapError::MissingField("data"))
        } else {
            let errmsg = data
                .get("errmsg")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error");
            Err(AmapError::Api(errmsg.to_string()))
        }
    }
}

/// 提取成功响应里的字段子树
pub fn field(data: &Value, name: &'static str) -> Result<Value, AmapError> {
    data.get(name).cloned().ok_or(AmapError::MissingField(name))
}
