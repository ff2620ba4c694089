//! 大模型接入层 - Agent客户端与高德地图工具集

pub mod client;
pub mod tools;
