use crate::config::{Config, LLMProvider};
use clap::Parser;
use std::path::PathBuf;

/// TripFlow - 由Rust与AI驱动的多智能体旅行行程规划服务
#[derive(Parser, Debug)]
#[command(name = "tripflow-rs")]
#[command(
    about = "AI-based travel itinerary planning service. It decomposes free-form travel requests with LLM agents, consults AMap tools for weather, routes and POIs, and produces complete single-city and multi-city itineraries."
)]
#[command(author = "Sopaco")]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// HTTP服务监听地址
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP服务监听端口
    #[arg(short, long)]
    pub port: Option<u16>,

    /// LLM Provider (openai, moonshot, deepseek, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 规划使用的模型
    #[arg(long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 单次调用中智能体与工具交互的最大轮数
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// 高德Web服务API KEY
    #[arg(long)]
    pub amap_api_key: Option<String>,

    /// 高德REST API基地址
    #[arg(long)]
    pub amap_base_url: Option<String>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    ///
    /// 优先级：命令行参数 > 配置文件 > 默认值（含环境变量兜底）。
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path)
                .unwrap_or_else(|_| panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path))
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("tripflow.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!("⚠️ 警告: 无法读取默认配置文件 {:?}", default_config_path)
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 覆盖服务配置
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.llm.max_iterations = max_iterations;
        }

        // 覆盖高德配置
        if let Some(amap_api_key) = self.amap_api_key {
            config.amap.api_key = amap_api_key;
        }
        if let Some(amap_base_url) = self.amap_base_url {
            config.amap.base_url = amap_base_url;
        }

        // 其他配置
        if self.verbose {
            config.verbose = true;
        }

        config
    }
}

// Include tests
#[cfg(test)]
mod tests;
