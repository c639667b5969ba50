//! 命令行参数解析模块
//!
//! 本模块实现 `treeex` 命令行工具的参数解析功能，支持三种参数风格混用：
//!
//! - Windows CMD 风格 (`/O`)，大小写不敏感
//! - Unix 短参数风格 (`-o`)，`-o` 与 `-O` 等价
//! - GNU 长参数风格 (`--output`)，大小写敏感，支持 `--output=FILE`
//!
//! 以 `/` 开头但不匹配任何选项的参数视为路径（Unix 绝对路径）。
//! 解析完成后产出 [`Config`] 结构体，供后续扫描、渲染、输出模块使用。
//!
//! File: src/cli.rs
//! Date: 2026-10-16

#![forbid(unsafe_code)]

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use crate::config::Config;
pub(crate) use crate::error::CliError;

// ============================================================================
// 解析结果枚举
// ============================================================================

/// 解析结果
#[derive(Debug)]
pub enum ParseResult {
    /// 正常配置，需要执行渲染
    Config(Config),
    /// 用户请求显示帮助信息
    Help,
    /// 用户请求显示版本信息
    Version,
}

// ============================================================================
// 参数定义
// ============================================================================

/// 参数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgKind {
    /// 标志型参数（无需值）
    Flag,
    /// 带值型参数（需要后跟一个值）
    Value,
}

/// 参数定义结构体
struct ArgDef {
    /// 规范名称（用于重复检测和错误消息）
    canonical: &'static str,
    /// 参数类型
    kind: ArgKind,
    /// Windows CMD 风格 (`/X`)，大小写不敏感
    cmd_patterns: &'static [&'static str],
    /// Unix 短参数 (`-x`)，大小写敏感
    short_patterns: &'static [&'static str],
    /// GNU 长参数 (`--xxx`)，大小写敏感
    long_patterns: &'static [&'static str],
}

/// 所有支持的参数定义
const ARG_DEFINITIONS: &[ArgDef] = &[
    ArgDef {
        canonical: "help",
        kind: ArgKind::Flag,
        cmd_patterns: &["/?"],
        short_patterns: &["-h"],
        long_patterns: &["--help"],
    },
    ArgDef {
        canonical: "version",
        kind: ArgKind::Flag,
        cmd_patterns: &["/V"],
        short_patterns: &["-v"],
        long_patterns: &["--version"],
    },
    ArgDef {
        canonical: "output",
        kind: ArgKind::Value,
        cmd_patterns: &["/O"],
        short_patterns: &["-o", "-O"],
        long_patterns: &["--output"],
    },
];

// ============================================================================
// 参数匹配结果
// ============================================================================

/// 参数匹配结果
struct MatchedArg {
    /// 匹配到的参数定义
    definition: &'static ArgDef,
    /// 参数值（如果是带值参数）
    value: Option<String>,
}

// ============================================================================
// 命令行解析器
// ============================================================================

/// 命令行参数解析器
///
/// 路径参数可以出现在任意位置，包括选项之前、之后或之间。
///
/// # Examples
///
/// ```no_run
/// use treeex::cli::{CliParser, ParseResult};
///
/// let parser = CliParser::new(vec!["docs".to_string(), "/O".to_string(), "tree.txt".to_string()]);
/// match parser.parse() {
///     Ok(ParseResult::Config(config)) => println!("{:?}", config),
///     Ok(ParseResult::Help) => println!("help"),
///     Ok(ParseResult::Version) => println!("version"),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub struct CliParser {
    /// 待解析的参数列表
    args: Vec<String>,
    /// 当前解析位置
    position: usize,
    /// 已使用的规范名称集合（用于重复检测）
    seen_canonical_names: HashSet<&'static str>,
}

impl CliParser {
    /// 从参数列表创建解析器
    ///
    /// # 参数
    ///
    /// * `args` - 命令行参数列表（不包含程序名）
    #[must_use]
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            position: 0,
            seen_canonical_names: HashSet::new(),
        }
    }

    /// 从环境参数创建解析器
    ///
    /// 自动跳过程序名（第一个参数）。非 UTF-8 参数有损转换。
    #[must_use]
    pub fn from_env() -> Self {
        let args: Vec<String> = env::args_os()
            .skip(1)
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        Self::new(args)
    }

    /// 解析命令行参数
    ///
    /// 只做语法层面的解析；路径形态由调用方通过 `Config::validate()` 检查。
    ///
    /// # Errors
    ///
    /// - `CliError::UnknownOption` - 遇到未知的 `-` 开头参数
    /// - `CliError::MissingValue` - `/O` 等缺少文件路径
    /// - `CliError::DuplicateOption` - 参数重复
    /// - `CliError::MultiplePaths` - 指定了多个路径
    pub fn parse(mut self) -> Result<ParseResult, CliError> {
        let mut config = Config::default();
        let mut collected_paths: Vec<String> = Vec::new();

        while self.position < self.args.len() {
            let current_arg = self.args[self.position].clone();

            if let Some(def) = Self::find_definition(&current_arg) {
                let matched = self.match_argument(&current_arg, def)?;
                self.register_canonical_name(matched.definition.canonical)?;
                Self::apply_to_config(&mut config, &matched);

                // 帮助和版本信息立即返回
                if config.show_help {
                    return Ok(ParseResult::Help);
                }
                if config.show_version {
                    return Ok(ParseResult::Version);
                }
            } else if current_arg.starts_with('-') && current_arg.len() > 1 {
                return Err(CliError::UnknownOption {
                    option: current_arg,
                });
            } else {
                // 非选项参数视为路径，直接收集
                collected_paths.push(current_arg);
            }

            self.position += 1;
        }

        Self::validate_paths(&collected_paths, &mut config)?;

        Ok(ParseResult::Config(config))
    }

    /// 查找参数对应的定义
    fn find_definition(arg: &str) -> Option<&'static ArgDef> {
        ARG_DEFINITIONS
            .iter()
            .find(|def| Self::definition_matches(arg, def))
    }

    /// 判断参数是否匹配定义的任一模式
    fn definition_matches(arg: &str, def: &ArgDef) -> bool {
        // CMD 风格匹配（大小写不敏感）
        if def.cmd_patterns.iter().any(|p| arg.eq_ignore_ascii_case(p)) {
            return true;
        }

        // Unix 短参数匹配（大小写敏感）
        if def.short_patterns.contains(&arg) {
            return true;
        }

        // GNU 长参数匹配（大小写敏感），支持 --option=value
        def.long_patterns.iter().any(|p| {
            arg == *p
                || (def.kind == ArgKind::Value
                    && arg
                        .strip_prefix(p)
                        .is_some_and(|rest| rest.starts_with('=')))
        })
    }

    /// 构造匹配结果，按需消费值
    fn match_argument(
        &mut self,
        arg: &str,
        def: &'static ArgDef,
    ) -> Result<MatchedArg, CliError> {
        // --option=value 语法
        if let Some((_, value)) = arg.split_once('=') {
            if value.is_empty() {
                return Err(CliError::MissingValue {
                    option: arg.trim_end_matches('=').to_string(),
                });
            }
            return Ok(MatchedArg {
                definition: def,
                value: Some(value.to_string()),
            });
        }

        let value = self.consume_value_if_required(def, arg)?;
        Ok(MatchedArg {
            definition: def,
            value,
        })
    }

    /// 如果参数需要值，消费下一个参数作为值
    ///
    /// 下一个参数若本身是已知选项则视为缺值；以 `/` 开头的普通路径可作为值。
    fn consume_value_if_required(
        &mut self,
        def: &ArgDef,
        arg: &str,
    ) -> Result<Option<String>, CliError> {
        if def.kind == ArgKind::Flag {
            return Ok(None);
        }

        let next_position = self.position + 1;
        let Some(next_arg) = self.args.get(next_position) else {
            return Err(CliError::MissingValue {
                option: arg.to_string(),
            });
        };

        if Self::find_definition(next_arg).is_some() {
            return Err(CliError::MissingValue {
                option: arg.to_string(),
            });
        }

        let value = next_arg.clone();
        self.position = next_position;
        Ok(Some(value))
    }

    /// 注册已使用的规范名称，检测重复
    fn register_canonical_name(&mut self, canonical: &'static str) -> Result<(), CliError> {
        if !self.seen_canonical_names.insert(canonical) {
            return Err(CliError::DuplicateOption {
                option: canonical.to_string(),
            });
        }
        Ok(())
    }

    /// 将匹配的参数应用到配置
    fn apply_to_config(config: &mut Config, matched: &MatchedArg) {
        match matched.definition.canonical {
            "help" => config.show_help = true,
            "version" => config.show_version = true,
            "output" => {
                if let Some(value) = matched.value.as_ref() {
                    config.output.output_path = Some(PathBuf::from(value));
                }
            }
            _ => {}
        }
    }

    /// 验证路径参数
    fn validate_paths(paths: &[String], config: &mut Config) -> Result<(), CliError> {
        match paths {
            [] => {
                // 未指定路径，使用默认值 "."
                config.path_explicitly_set = false;
                Ok(())
            }
            [path] => {
                config.root_path = PathBuf::from(path);
                config.path_explicitly_set = true;
                Ok(())
            }
            _ => Err(CliError::MultiplePaths {
                paths: paths.to_vec(),
            }),
        }
    }
}

// ============================================================================
// 帮助与版本信息
// ============================================================================

/// 获取帮助信息字符串
#[must_use]
pub fn help_text() -> &'static str {
    r#"treeex: Render a directory as a tree, hidden entries included.

Usage:
  treeex [<PATH>] [<OPTIONS>...]

Arguments:
  <PATH>                      Root directory (default: current directory).
                              Must not end with a path separator.

Options:
  --help, -h, /?              Show help information
  --version, -v, /V           Show version information
  --output, -o, /O <FILE>     Write output to a file (UTF-8 with BOM),
                              overwriting it if it exists"#
}

/// 获取版本信息字符串
#[must_use]
pub fn version_text() -> String {
    format!(
        "treeex version {}\n\n{}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}

/// 打印帮助信息到标准输出
pub fn print_help() {
    println!("{}", help_text());
}

/// 打印版本信息到标准输出
pub fn print_version() {
    println!("{}", version_text());
}

// ============================================================================
// 单元测试
// ============================================================================
