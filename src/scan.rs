//! 扫描模块：单层目录列举与确定性排序
//!
//! 本模块负责目录树遍历中与文件系统打交道的部分：
//!
//! - **根路径校验**：存在性与目录性，失败即为致命错误
//! - **单层列举**：`list_directory` 列出一个目录的全部直接条目（含隐藏条目）
//! - **分区**：文件（含一切非目录条目）与目录分开
//! - **自然排序**：`compare_natural` 大小写不敏感，数字段按数值比较
//!
//! 列举是一次性的：条目在返回前全部收集，调用方递归时不持有目录句柄。
//!
//! File: src/scan.rs
//! Date: 2026-10-16

#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::fs;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use log::{debug, trace};
use walkdir::WalkDir;

use crate::error::ScanError;

// ============================================================================
// 类型定义
// ============================================================================

/// 文件系统条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// 目录（包括指向目录的符号链接）
    Directory,
    /// 文件及其他一切非目录条目
    File,
}

/// 目录条目
///
/// 列举目录时产生，只在一个遍历帧内使用。
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use treeex::scan::{DirectoryEntry, EntryKind};
///
/// let entry = DirectoryEntry::new(PathBuf::from("src/main.rs"), EntryKind::File);
/// assert_eq!(entry.name, "main.rs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// 条目名称（不含路径）
    pub name: String,
    /// 完整路径
    pub path: PathBuf,
    /// 条目类型
    pub kind: EntryKind,
}

impl DirectoryEntry {
    /// 从路径与类型创建条目，名称取最后一个路径分量
    #[must_use]
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        let name = display_name(&path);
        Self { name, path, kind }
    }

    /// 是否为目录
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// 单个目录的列举结果
///
/// 文件与目录两个分区各自已按自然顺序排好。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// 文件分区
    pub files: Vec<DirectoryEntry>,
    /// 目录分区
    pub directories: Vec<DirectoryEntry>,
}

impl DirectoryListing {
    /// 将条目分区并排序
    #[must_use]
    pub fn from_entries(entries: Vec<DirectoryEntry>) -> Self {
        let (mut directories, mut files): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(DirectoryEntry::is_dir);

        sort_entries(&mut files);
        sort_entries(&mut directories);

        Self { files, directories }
    }

    /// 是否包含子目录
    #[must_use]
    pub fn has_directories(&self) -> bool {
        !self.directories.is_empty()
    }
}

// ============================================================================
// 根路径校验
// ============================================================================

/// 校验根路径存在且为目录
///
/// 符号链接按其目标判断。
///
/// # Errors
///
/// - `ScanError::PathNotFound` - 路径不存在
/// - `ScanError::NotADirectory` - 路径不是目录
/// - `ScanError::MetadataFailed` - 无法读取元数据
pub fn validate_root(path: &Path) -> Result<(), ScanError> {
    let meta =
        fs::metadata(path).map_err(|e| ScanError::from_io_error(e, path.to_path_buf()))?;

    if !meta.is_dir() {
        return Err(ScanError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

// ============================================================================
// 单层列举
// ============================================================================

/// 列举目录的全部直接条目
///
/// 不按隐藏属性或 `.` 前缀过滤。walkdir 本身不跟随链接；
/// 符号链接的类型由其目标决定，悬空链接视为文件。
///
/// # Errors
///
/// 目录无法打开或列举过程中出错时返回 `ScanError`，
/// 已收集的部分条目被丢弃。
pub fn list_directory(path: &Path) -> Result<DirectoryListing, ScanError> {
    let mut entries = Vec::new();

    for item in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = item?;
        let kind = classify(entry.path(), entry.file_type().is_dir(), entry.path_is_symlink());
        trace!("listed {:?} as {:?}", entry.path(), kind);
        entries.push(DirectoryEntry::new(entry.into_path(), kind));
    }

    debug!("listed {} entries in {}", entries.len(), path.display());
    Ok(DirectoryListing::from_entries(entries))
}

/// 判断条目类型
fn classify(path: &Path, is_dir: bool, is_symlink: bool) -> EntryKind {
    let is_dir = if is_symlink {
        fs::metadata(path).is_ok_and(|m| m.is_dir())
    } else {
        is_dir
    };

    if is_dir {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

/// 取路径最后一个分量作为显示名
///
/// 无最后分量（如 `.`、`/`）时退回整条路径。非 UTF-8 名称有损转换。
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

// ============================================================================
// 排序
// ============================================================================

/// 按名称自然顺序排序
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| compare_natural(&a.name, &b.name));
}

/// 自然顺序比较
///
/// 非数字字符大小写不敏感比较；连续 ASCII 数字按数值比较（忽略前导零，
/// 任意长度不溢出）。两者在此意义下相等时，退回原字符串的字典序，
/// 保证全序。
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use treeex::scan::compare_natural;
///
/// assert_eq!(compare_natural("file2", "file10"), Ordering::Less);
/// assert_eq!(compare_natural("File1", "file2"), Ordering::Less);
/// assert_eq!(compare_natural("a", "A"), Ordering::Greater);
/// ```
#[must_use]
pub fn compare_natural(a: &str, b: &str) -> Ordering {
    compare_natural_key(a, b).then_with(|| a.cmp(b))
}

/// 不含最终平局裁决的自然顺序比较
fn compare_natural_key(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = compare_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// 取出一段连续的 ASCII 数字
fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// 按数值比较两段数字，不做整数转换
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

// ============================================================================
// 单元测试
// ============================================================================
