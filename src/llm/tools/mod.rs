//! 面向智能体开放的高德工具集

pub mod amap;
pub mod district;
pub mod geo;
pub mod place;
pub mod route;
pub mod weather;

pub use amap::{AmapClient, AmapError};
pub use district::AgentToolDistrict;
pub use geo::AgentToolGeo;
pub use place::{AgentToolInputTips, AgentToolPlaceSearch};
pub use route::AgentToolRoute;
pub use weather::AgentToolWeather;

use crate::config::AmapConfig;

/// 一次智能体调用所挂载的全套高德工具
///
/// 每次调用构建新实例，调用结束随智能体一起释放。
#[derive(Debug, Clone)]
pub struct AmapToolset {
    pub geo: AgentToolGeo,
    pub route: AgentToolRoute,
    pub place: AgentToolPlaceSearch,
    pub input_tips: AgentToolInputTips,
    pub district: AgentToolDistrict,
    pub weather: AgentToolWeather,
}

impl AmapToolset {
    pub fn new(config: &AmapConfig) -> Result<Self, AmapError> {
        let client = AmapClient::new(config)?;

        Ok(Self {
            geo: AgentToolGeo::new(client.clone()),
            route: AgentToolRoute::new(client.clone()),
            place: AgentToolPlaceSearch::new(client.clone()),
            input_tips: AgentToolInputTips::new(client.clone()),
            district: AgentToolDistrict::new(client.clone()),
            weather: AgentToolWeather::new(client),
        })
    }
}
