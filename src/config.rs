//! 配置模块：定义全量 Config 及其子配置结构
//!
//! 本模块是用户意图的**单一事实来源**（Single Source of Truth）。
//! 所有命令行参数经 CLI 层解析后，统一转换为 `Config` 结构，
//! 后续扫描、渲染、输出各层仅依赖此配置，不再直接访问原始参数。
//!
//! File: src/config.rs
//! Date: 2026-10-16

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// 错误类型
// ============================================================================

/// 配置验证错误
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use treeex::config::ConfigError;
///
/// let err = ConfigError::InvalidPath {
///     path: PathBuf::from("src/"),
///     reason: "must not end with a path separator".to_string(),
/// };
/// assert!(err.to_string().contains("src/"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 路径参数格式不合法
    #[error("Invalid path: {path} ({reason})")]
    InvalidPath {
        /// 路径
        path: PathBuf,
        /// 原因
        reason: String,
    },
}

/// 配置验证结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

// ============================================================================
// 子配置结构
// ============================================================================

/// 输出选项
///
/// # Examples
///
/// ```
/// use treeex::config::OutputOptions;
///
/// let opts = OutputOptions::default();
/// assert!(opts.output_path.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputOptions {
    /// 输出文件路径（None 表示输出到终端）
    pub output_path: Option<PathBuf>,
}

// ============================================================================
// 主配置结构
// ============================================================================

/// 全量配置
///
/// CLI 解析后生成此结构，扫描、渲染、输出均依赖此配置运行。
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use treeex::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.root_path, PathBuf::from("."));
/// assert!(config.output.output_path.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 根路径（按用户输入原样保留，作为输出首行）
    pub root_path: PathBuf,
    /// 根路径是否由用户显式指定
    pub path_explicitly_set: bool,
    /// 是否显示帮助信息
    pub show_help: bool,
    /// 是否显示版本信息
    pub show_version: bool,
    /// 输出选项
    pub output: OutputOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            path_explicitly_set: false,
            show_help: false,
            show_version: false,
            output: OutputOptions::default(),
        }
    }
}

impl Config {
    /// 创建具有指定根路径的配置
    #[cfg(test)]
    #[must_use]
    pub fn with_root(root_path: PathBuf) -> Self {
        Self {
            root_path,
            path_explicitly_set: true,
            ..Self::default()
        }
    }

    /// 验证配置
    ///
    /// 只检查参数形态：根路径非空、不以路径分隔符结尾（文件系统根除外）、
    /// 输出路径非空。根路径是否存在、是否为目录由扫描层在打开输出前检查，
    /// 根路径本身不做规范化，首行按原样显示。
    ///
    /// # Errors
    ///
    /// 返回 `ConfigError::InvalidPath` 如果路径参数形态不合法。
    pub fn validate(self) -> ConfigResult<Self> {
        if self.root_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidPath {
                path: self.root_path.clone(),
                reason: "path must not be empty".to_string(),
            });
        }

        if ends_with_separator(&self.root_path) && !is_filesystem_root(&self.root_path) {
            return Err(ConfigError::InvalidPath {
                path: self.root_path.clone(),
                reason: "path must not end with a path separator".to_string(),
            });
        }

        if let Some(ref out) = self.output.output_path {
            if out.as_os_str().is_empty() {
                return Err(ConfigError::InvalidPath {
                    path: out.clone(),
                    reason: "output path must not be empty".to_string(),
                });
            }
        }

        Ok(self)
    }
}

/// 路径字符串是否以分隔符结尾
fn ends_with_separator(path: &Path) -> bool {
    path.to_string_lossy()
        .chars()
        .last()
        .is_some_and(std::path::is_separator)
}

/// 路径是否为裸文件系统根（`/`、`C:\`）
fn is_filesystem_root(path: &Path) -> bool {
    path.has_root() && path.parent().is_none()
}

// ============================================================================
// 单元测试
// ============================================================================
