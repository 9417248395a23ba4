//! 命令行设置
//!
//! 设置以 JSON 保存在 `<config_dir>/janggi/config.json`。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 棋子显示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MarkerStyle {
    /// 三字符 ASCII 标记（" S "、"CHT" 等）
    #[default]
    Ascii,
    /// 汉字，不使用颜色时前缀 `r`/`b` 标明所属方
    Hanja,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// 作为 `EnvFilter` 指令使用的名称
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

/// 命令行设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// 是否使用 ANSI 颜色区分双方
    pub color: bool,
    /// 棋子显示方式
    pub markers: MarkerStyle,
    /// 默认日志级别（RUST_LOG 优先）
    pub log_level: LogLevel,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            color: true,
            markers: MarkerStyle::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl CliConfig {
    /// 获取设置文件路径
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("janggi");
            path.push("config.json");
            path
        })
    }

    /// 从默认位置加载设置
    ///
    /// 失败时由调用方决定是否退回默认设置，此时日志可能尚未初始化。
    pub fn load() -> Result<Self> {
        let path = Self::config_path().context("无法获取配置目录")?;
        Self::load_from(&path)
    }

    /// 从指定文件加载设置，文件不存在时返回默认设置
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取设置文件: {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("设置文件格式无效: {:?}", path))
    }

    /// 保存到默认位置
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("无法获取配置目录")?;
        self.save_to(&path)
    }

    /// 保存到指定文件，必要时创建目录
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化设置失败")?;
        std::fs::write(path, content).with_context(|| format!("写入设置文件失败: {:?}", path))?;

        tracing::info!("设置已保存: {:?}", path);
        Ok(())
    }
}
