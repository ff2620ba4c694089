//! 规划器上下文

use std::sync::Arc;

use crate::{config::Config, llm::client::AgentGateway};

/// 贯穿一次规划流程的共享上下文
///
/// 网关以trait对象持有，测试中可以换成脚本化实现。
#[derive(Clone)]
pub struct PlannerContext {
    pub gateway: Arc<dyn AgentGateway>,
    pub config: Config,
}

impl PlannerContext {
    pub fn new(gateway: Arc<dyn AgentGateway>, config: Config) -> Self {
        Self { gateway, config }
    }
}
