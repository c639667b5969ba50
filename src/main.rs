//! treeex 主程序入口
//!
//! 本模块实现 `treeex` 命令行工具的主入口，串联以下流程：
//!
//! 1. **CLI 解析**：解析命令行参数，产出 `ParseResult`
//! 2. **根路径校验**：存在且为目录，失败时不创建输出文件
//! 3. **打开输出**：终端，或写入 BOM 的 UTF-8 文件
//! 4. **树形渲染**：输出根路径首行，再深度优先渲染整棵树
//! 5. **收尾**：刷新输出，文件输出时在终端提示结果位置
//!
//! # 退出码
//!
//! - `0`：成功
//! - `1`：参数错误
//! - `2`：根路径错误
//! - `3`：输出错误
//!
//! File: src/main.rs
//! Date: 2026-10-16

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cli;
mod config;
mod error;
mod output;
mod render;
mod scan;

use std::error::Error as _;
use std::process::ExitCode;

use log::info;

use cli::{CliError, CliParser, ParseResult};
use config::Config;
use error::{TreeexError, TreeexResult};
use output::Destination;
use render::TreeRenderer;

/// 退出码：成功
const EXIT_SUCCESS: u8 = 0;

/// 退出码：参数错误
const EXIT_CLI_ERROR: u8 = 1;

/// 退出码：根路径错误
const EXIT_SCAN_ERROR: u8 = 2;

/// 退出码：输出错误
const EXIT_OUTPUT_ERROR: u8 = 3;

/// 程序主入口
fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            let code = error_to_exit_code(&e);
            print_error(&e);
            ExitCode::from(code)
        }
    }
}

/// 初始化日志
///
/// 日志写入 stderr，默认关闭，不影响 stdout 与输出文件内容。
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
        .format_timestamp(None)
        .init();
}

/// 执行主流程
fn run() -> TreeexResult<()> {
    let parser = CliParser::from_env();

    match parser.parse()? {
        ParseResult::Help => {
            cli::print_help();
            Ok(())
        }
        ParseResult::Version => {
            cli::print_version();
            Ok(())
        }
        ParseResult::Config(config) => {
            let config = config.validate()?;
            render_tree(&config)
        }
    }
}

/// 校验根路径、打开输出并渲染整棵树
fn render_tree(config: &Config) -> TreeexResult<()> {
    // 先校验根路径，失败时不创建、不截断输出文件
    scan::validate_root(&config.root_path)?;
    info!(
        "rendering {} (explicit: {})",
        config.root_path.display(),
        config.path_explicitly_set
    );

    let mut sink = output::open_destination(Destination::from_config(config))?;

    sink.write_line(&config.root_path.to_string_lossy())?;
    let stats = TreeRenderer::new(&mut sink).render(&config.root_path)?;
    info!(
        "{} directories, {} files, {} access errors, {} lines",
        stats.directory_count,
        stats.file_count,
        stats.access_errors,
        sink.lines_written()
    );

    let destination = sink.destination().clone();
    sink.finish()?;

    if let Destination::File(path) = destination {
        println!("{}", output::file_written_notice(&path));
    }

    Ok(())
}

/// 将错误映射为退出码
fn error_to_exit_code(err: &TreeexError) -> u8 {
    match err {
        TreeexError::Cli(_) | TreeexError::Config(_) => EXIT_CLI_ERROR,
        TreeexError::Scan(_) => EXIT_SCAN_ERROR,
        TreeexError::Output(_) => EXIT_OUTPUT_ERROR,
    }
}

/// 打印错误信息到 stderr
///
/// 附带底层错误链（系统错误消息）与特定错误的提示。
fn print_error(err: &TreeexError) {
    let prefix = match err {
        TreeexError::Cli(_) => "CLI error",
        TreeexError::Config(_) => "Config error",
        TreeexError::Scan(_) => "Scan error",
        TreeexError::Output(_) => "Output error",
    };

    eprintln!("treeex: {}: {}", prefix, err);

    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }

    match err {
        TreeexError::Cli(CliError::UnknownOption { .. }) => {
            eprintln!("Hint: run `treeex --help` to list available options");
        }
        TreeexError::Cli(CliError::MultiplePaths { .. }) => {
            eprintln!("Hint: only one target path can be specified.");
        }
        _ => {}
    }
}
