//! 对局设置
//!
//! 设置文件为 JSON，所有字段可省略；命令行参数优先于设置文件。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use horses_ai::{AiConfig, DEFAULT_STALL_BIAS};
use horses_core::Difficulty;
use serde::{Deserialize, Serialize};

/// 黑方由谁来走
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    /// 终端输入
    #[default]
    Human,
    /// 随机走法
    Random,
    /// 总是收集眼前分值最高的格子
    Greedy,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// 转换为 tracing 过滤指令
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// 对局设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// AI 难度
    pub difficulty: Difficulty,
    /// 覆盖难度对应的搜索深度
    pub depth: Option<u8>,
    /// 搜索中无路可走的偏置
    pub stall_bias: f64,
    /// 黑方
    pub opponent: OpponentKind,
    /// 随机种子（棋盘与兜底走法）
    pub seed: Option<u64>,
    /// 每步后打印棋盘
    pub show_board: bool,
    /// 日志级别
    pub log_level: LogLevel,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            depth: None,
            stall_bias: DEFAULT_STALL_BIAS,
            opponent: OpponentKind::default(),
            seed: None,
            show_board: true,
            log_level: LogLevel::default(),
        }
    }
}

impl MatchSettings {
    /// 默认设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("smart-horses");
            path.push("settings.json");
            path
        })
    }

    /// 从指定文件加载设置
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取设置文件: {:?}", path))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("设置文件格式无效: {:?}", path))?;
        tracing::info!("已加载设置: {:?}", path);
        Ok(settings)
    }

    /// 从默认位置加载设置，不存在或无效时使用默认值
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("无法获取配置目录，使用默认设置");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("设置文件不存在，使用默认设置");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("{:#}，使用默认设置", e);
                Self::default()
            }
        }
    }

    /// 保存设置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self).context("序列化设置失败")?;
        std::fs::write(path, content)
            .with_context(|| format!("写入设置文件失败: {:?}", path))?;
        Ok(())
    }

    /// 生成 AI 配置
    pub fn ai_config(&self) -> AiConfig {
        let config = AiConfig {
            stall_bias: self.stall_bias,
            ..AiConfig::from_difficulty(self.difficulty)
        };
        match self.depth {
            Some(depth) => config.with_depth(depth),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "difficulty": "Expert", "opponent": "greedy" }"#).unwrap();

        let settings = MatchSettings::load_from(&path).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Expert);
        assert_eq!(settings.opponent, OpponentKind::Greedy);
        assert_eq!(settings.depth, None);
        assert!(settings.show_board);
        assert_eq!(settings.ai_config().max_depth, 6);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = MatchSettings {
            depth: Some(3),
            seed: Some(9),
            log_level: LogLevel::Debug,
            ..MatchSettings::default()
        };

        settings.save_to(&path).unwrap();
        assert_eq!(MatchSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(MatchSettings::load_from(&path).is_err());
        assert!(MatchSettings::load_from(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_ai_config_depth_override() {
        let settings = MatchSettings {
            difficulty: Difficulty::Beginner,
            depth: Some(5),
            stall_bias: 50.0,
            ..MatchSettings::default()
        };
        let config = settings.ai_config();
        assert_eq!(config.difficulty, Difficulty::Beginner);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.stall_bias, 50.0);
    }
}
