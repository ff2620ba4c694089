//! Agent客户端 - 提供统一的大模型调用接口

use anyhow::Result;
use async_trait::async_trait;
use rig::completion::{AssistantContent, Message, PromptError};
use thiserror::Error;

use crate::{
    config::{AmapConfig, Config, LLMConfig},
    llm::tools::AmapToolset,
};

mod providers;

use providers::ProviderClient;

/// 对话消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

/// 发送给Agent的单条消息
#[derive(Debug, Clone)]
pub struct AgentMessage {
    pub role: Role,
    pub content: String,
}

impl AgentMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Agent调用过程中可能出现的错误
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("模型连接失败: {0}")]
    Connection(String),
    #[error("模型调用失败: {0}")]
    Completion(String),
    #[error("工具初始化失败: {0}")]
    Tool(String),
}

/// 规划器依赖的推理能力抽象
///
/// 生产环境由[`AgentClient`]实现，测试中可以用脚本化的mock替换。
#[async_trait]
pub trait AgentGateway: Send + Sync {
    /// 发送一组消息，返回模型的文本回复
    async fn invoke(&self, messages: &[AgentMessage]) -> Result<String, AgentError>;
}

/// 基于rig的Agent客户端
///
/// 每次invoke都会挂载一套新的高德工具连接，调用结束即释放。
pub struct AgentClient {
    client: ProviderClient,
    llm: LLMConfig,
    amap: AmapConfig,
}

impl AgentClient {
    /// 创建新的Agent客户端
    pub fn new(config: &Config) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        Ok(Self {
            client,
            llm: config.llm.clone(),
            amap: config.amap.clone(),
        })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        tracing::info!("🔄 正在检查模型连接...");
        let agent =
            self.client
                .create_agent(&self.llm.model, "You are a helpful assistant.", &self.llm);
        match agent.prompt("Hello").await {
            Ok(_) => {
                tracing::info!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }

    /// 从聊天历史中提取最后一条助手文本，作为中断时的部分结果
    fn extract_partial_text(chat_history: &[Message]) -> Option<String> {
        chat_history.iter().rev().find_map(|msg| {
            if let Message::Assistant { content, .. } = msg {
                let text = content
                    .iter()
                    .filter_map(|c| {
                        if let AssistantContent::Text(text) = c {
                            Some(text.text.clone())
                        } else {
                            None
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");

                if text.is_empty() { None } else { Some(text) }
            } else {
                None
            }
        })
    }
}

#[async_trait]
impl AgentGateway for AgentClient {
    async fn invoke(&self, messages: &[AgentMessage]) -> Result<String, AgentError> {
        let system_prompt = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let user_prompt = messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let toolset = AmapToolset::new(&self.amap).map_err(|e| AgentError::Tool(e.to_string()))?;
        let agent = self.client.create_agent_with_tools(
            &self.llm.model,
            &system_prompt,
            &self.llm,
            &toolset,
        );

        match agent
            .multi_turn(&user_prompt, self.llm.max_iterations as usize)
            .await
        {
            Ok(response) => Ok(response),
            Err(PromptError::MaxDepthError {
                max_depth,
                chat_history,
                prompt: _,
            }) => {
                tracing::warn!("⚠️ 达到最大迭代次数 ({})，尝试提取部分结果", max_depth);
                Self::extract_partial_text(&chat_history).ok_or_else(|| {
                    AgentError::Completion(format!(
                        "达到最大迭代次数({})且未获得可用回复",
                        max_depth
                    ))
                })
            }
            Err(e) => Err(AgentError::Completion(e.to_string())),
        }
    }
}
