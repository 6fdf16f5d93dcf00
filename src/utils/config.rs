//! 配置管理模块

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::distribution::{ConfidenceBand, EmpiricalCdf};
use crate::moments::Ewma;
use crate::random::default_random_source;
use crate::{Result, StatsError};

/// 统计工具默认参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// EWMA 衰减系数 (历史权重)
    #[serde(default = "default_ewma_decay")]
    pub ewma_decay: f64,

    /// 置信带的 α (0.05 → 95% 置信带)
    #[serde(default = "default_confidence_alpha")]
    pub confidence_alpha: f64,

    /// Bootstrap 重采样轮数
    #[serde(default = "default_bootstrap_rounds")]
    pub bootstrap_rounds: usize,

    /// 滞后配对默认步数
    #[serde(default = "default_lag")]
    pub default_lag: usize,

    /// 随机数种子；为空时从系统熵初始化
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            ewma_decay: default_ewma_decay(),
            confidence_alpha: default_confidence_alpha(),
            bootstrap_rounds: default_bootstrap_rounds(),
            default_lag: default_lag(),
            random_seed: None,
        }
    }
}

// 默认值函数
fn default_ewma_decay() -> f64 {
    0.7
}
fn default_confidence_alpha() -> f64 {
    0.05
}
fn default_bootstrap_rounds() -> usize {
    1000
}
fn default_lag() -> usize {
    1
}

impl StatsConfig {
    /// 从 TOML 字符串解析并校验
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StatsConfig = toml::from_str(content)
            .map_err(|e| StatsError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StatsError::IOError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded stats config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// 加载默认配置文件
    pub fn load_default() -> Result<Self> {
        Self::load_from_file("config/stats.toml")
    }

    /// 序列化为 TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| StatsError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// 参数校验
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.ewma_decay) {
            return Err(StatsError::ConfigError(format!(
                "ewma_decay must be in [0, 1], got {}",
                self.ewma_decay
            )));
        }
        if !(self.confidence_alpha > 0.0 && self.confidence_alpha < 1.0) {
            return Err(StatsError::ConfigError(format!(
                "confidence_alpha must be in (0, 1), got {}",
                self.confidence_alpha
            )));
        }
        if self.bootstrap_rounds == 0 {
            return Err(StatsError::ConfigError(
                "bootstrap_rounds must be at least 1".to_string(),
            ));
        }
        if self.default_lag == 0 {
            return Err(StatsError::ConfigError(
                "default_lag must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// 按配置构造随机数源
    pub fn rng(&self) -> StdRng {
        default_random_source(self.random_seed)
    }

    /// 按配置构造 EWMA 算子
    pub fn ewma(&self) -> Result<Ewma> {
        Ewma::new(self.ewma_decay)
    }

    /// 按配置的 confidence_alpha 计算 cdf(x) 的置信带
    pub fn confidence_band(&self, ecdf: &EmpiricalCdf, x: f64) -> Result<ConfidenceBand> {
        ecdf.cdf_with_band(x, self.confidence_alpha)
    }
}
