//! # 源目录枚举
//!
//! 非递归地列出源目录中的全部条目名称，顺序为底层目录读取顺序（不排序）。
//! 不按文件类型过滤：子目录同样计入进度总数。
//! 名称保持操作系统原始形式，非 UTF-8 文件名也能原样回到文件系统。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `commands/check.rs` 调用
//! - 使用 `walkdir` 遍历目录（深度固定为 1）

use crate::error::{DeadAirError, Result};

use clap::ValueEnum;
use std::ffi::OsString;
use std::path::Path;
use walkdir::WalkDir;

/// 进度总数的计算方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ListingMode {
    /// List once at start; the total stays fixed for the whole run
    #[default]
    Snapshot,
    /// Re-count the directory after every file (total may change mid-run)
    Live,
}

/// 列出目录条目名称
pub fn list_entries(dir: &Path) -> Result<Vec<OsString>> {
    if !dir.is_dir() {
        return Err(DeadAirError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| DeadAirError::ListingFailed {
            path: dir.display().to_string(),
            source: e,
        })?;
        names.push(entry.file_name().to_os_string());
    }

    log::debug!("Listed {} entries in '{}'", names.len(), dir.display());
    Ok(names)
}

/// 统计目录条目数量
pub fn count_entries(dir: &Path) -> Result<usize> {
    list_entries(dir).map(|names| names.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lists_files_and_dirs_non_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.m4a"), b"").unwrap();
        fs::write(tmp.path().join("b.txt"), b"").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested").join("deep.m4a"), b"").unwrap();

        let mut names = list_entries(tmp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a.m4a", "b.txt", "nested"]);
        assert_eq!(count_entries(tmp.path()).unwrap(), 3);
    }

    #[test]
    fn test_empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(list_entries(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_enumeration_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = list_entries(&tmp.path().join("missing")).unwrap_err();
        assert!(err.is_enumeration());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_not_lossy() {
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempfile::tempdir().unwrap();
        let name = std::ffi::OsStr::from_bytes(b"take\xff.m4a");
        fs::write(tmp.path().join(name), b"").unwrap();

        let names = list_entries(tmp.path()).unwrap();
        assert_eq!(names, vec![name.to_os_string()]);
        assert!(tmp.path().join(&names[0]).exists());
    }

    #[test]
    fn test_file_instead_of_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.m4a");
        fs::write(&file, b"").unwrap();
        assert!(list_entries(&file).unwrap_err().is_enumeration());
    }
}
