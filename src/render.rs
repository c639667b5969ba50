//! Rendering module: walks a directory tree and writes it as text lines.
//!
//! The renderer owns the traversal policy:
//!
//! - **Ordering**: files first, then directories, each natural-sorted
//! - **Connectors**: `├─` for directories followed by a sibling directory,
//!   `└─` for the last one; files hang off `│  ` while directories follow
//! - **Ancestry**: one flag per ancestor level, copied on every branch, so
//!   sibling subtrees never share indentation state
//! - **Best-effort**: a directory that cannot be listed becomes an inline
//!   `[Access error : ...]` annotation and traversal moves on
//!
//! All output goes through a [`LineSink`]; sink failures are fatal.
//!
//! File: src/render.rs
//! Date: 2026-10-16

#![forbid(unsafe_code)]

use std::io::Write;
use std::path::Path;

use log::{debug, trace, warn};

use crate::error::{OutputError, ScanError};
use crate::output::LineSink;
use crate::scan::{self, DirectoryListing};

// ============================================================================
// Tree Characters
// ============================================================================

/// Tree branch connector character set.
///
/// # Examples
///
/// ```
/// use treeex::render::TREE_CHARS;
///
/// assert_eq!(TREE_CHARS.branch, "├─");
/// assert_eq!(TREE_CHARS.last_branch, "└─");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeChars {
    /// Connector for a directory with a following sibling directory.
    pub branch: &'static str,
    /// Connector for the last directory of a level.
    pub last_branch: &'static str,
    /// Continuation under an ancestor that has following siblings.
    pub vertical: &'static str,
    /// Blank indentation under an ancestor that was last.
    pub space: &'static str,
    /// Lead-in for files when no subdirectory follows at their level.
    pub file_gap: &'static str,
    /// Indentation of the detail line under an access error.
    pub error_detail_indent: &'static str,
}

/// The connector set used by the renderer.
pub const TREE_CHARS: TreeChars = TreeChars {
    branch: "├─",
    last_branch: "└─",
    vertical: "│  ",
    space: "    ",
    file_gap: "  ",
    error_detail_indent: "        ",
};

// ============================================================================
// Ancestry
// ============================================================================

/// Per-depth record of whether each ancestor was the last sibling.
///
/// Immutable from the renderer's point of view: descending creates a new
/// value with [`Ancestry::child`], the parent's copy is never touched.
///
/// # Examples
///
/// ```
/// use treeex::render::Ancestry;
///
/// let root = Ancestry::root();
/// let inner = root.child(false).child(true);
/// assert_eq!(inner.depth(), 2);
/// assert_eq!(inner.prefix(), "│      ");
/// assert_eq!(root.depth(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestry {
    /// One flag per ancestor level, outermost first.
    last_flags: Vec<bool>,
}

impl Ancestry {
    /// The empty ancestry of the root level.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the ancestry for a child directory.
    #[must_use]
    pub fn child(&self, is_last: bool) -> Self {
        let mut last_flags = Vec::with_capacity(self.last_flags.len() + 1);
        last_flags.extend_from_slice(&self.last_flags);
        last_flags.push(is_last);
        Self { last_flags }
    }

    /// Recursion depth (number of ancestor levels).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.last_flags.len()
    }

    /// Builds the shared line prefix for entries at this depth.
    #[must_use]
    pub fn prefix(&self) -> String {
        self.last_flags
            .iter()
            .map(|&is_last| {
                if is_last {
                    TREE_CHARS.space
                } else {
                    TREE_CHARS.vertical
                }
            })
            .collect()
    }
}

// ============================================================================
// Render Stats
// ============================================================================

/// Counters collected during one render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Directories rendered (the root is not counted).
    pub directory_count: usize,
    /// Files rendered.
    pub file_count: usize,
    /// Directories that could not be listed.
    pub access_errors: usize,
}

// ============================================================================
// Line Formatting
// ============================================================================

/// Formats a file line.
#[must_use]
pub fn format_file_line(prefix: &str, has_directories: bool, name: &str) -> String {
    let lead = if has_directories {
        TREE_CHARS.vertical
    } else {
        TREE_CHARS.file_gap
    };
    format!("{prefix}{lead}{name}")
}

/// Formats a directory line.
#[must_use]
pub fn format_directory_line(prefix: &str, is_last: bool, name: &str) -> String {
    let connector = if is_last {
        TREE_CHARS.last_branch
    } else {
        TREE_CHARS.branch
    };
    format!("{prefix}{connector}{name}")
}

/// Formats the two lines reporting a directory that could not be listed.
///
/// The annotation starts at column zero regardless of depth.
#[must_use]
pub fn format_access_error(dir_name: &str, detail: &str) -> [String; 2] {
    [
        format!("{}[Access error : {}]", TREE_CHARS.last_branch, dir_name),
        format!("{}{}", TREE_CHARS.error_detail_indent, detail),
    ]
}

// ============================================================================
// Tree Renderer
// ============================================================================

/// Depth-first directory tree renderer.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use treeex::output::LineSink;
/// use treeex::render::TreeRenderer;
///
/// let mut sink = LineSink::new(Vec::new());
/// let stats = TreeRenderer::new(&mut sink).render(Path::new(".")).unwrap();
/// println!("{} directories", stats.directory_count);
/// ```
pub struct TreeRenderer<'a, W: Write> {
    /// Destination of every rendered line.
    sink: &'a mut LineSink<W>,
    /// Counters.
    stats: RenderStats,
}

impl<'a, W: Write> TreeRenderer<'a, W> {
    /// Creates a renderer writing into `sink`.
    pub fn new(sink: &'a mut LineSink<W>) -> Self {
        Self {
            sink,
            stats: RenderStats::default(),
        }
    }

    /// Renders the subtree below `root` (the header line is the caller's).
    ///
    /// `root` is expected to be a validated directory.
    ///
    /// # Errors
    ///
    /// Only sink failures are returned; unreadable directories are
    /// reported inline.
    pub fn render(mut self, root: &Path) -> Result<RenderStats, OutputError> {
        self.render_directory(root, &Ancestry::root())?;
        debug!(
            "rendered {} directories, {} files, {} access errors",
            self.stats.directory_count, self.stats.file_count, self.stats.access_errors
        );
        Ok(self.stats)
    }

    /// Renders one directory level and recurses into its subdirectories.
    fn render_directory(&mut self, path: &Path, ancestry: &Ancestry) -> Result<(), OutputError> {
        trace!("entering {} at depth {}", path.display(), ancestry.depth());
        let listing = match scan::list_directory(path) {
            Ok(listing) => listing,
            Err(e) => return self.render_access_error(path, &e),
        };

        self.render_listing(&listing, ancestry)
    }

    /// Writes the lines of one listing, then recurses.
    fn render_listing(
        &mut self,
        listing: &DirectoryListing,
        ancestry: &Ancestry,
    ) -> Result<(), OutputError> {
        let prefix = ancestry.prefix();
        let has_directories = listing.has_directories();

        for file in &listing.files {
            self.sink
                .write_line(&format_file_line(&prefix, has_directories, &file.name))?;
            self.stats.file_count += 1;
        }

        let dir_count = listing.directories.len();
        for (i, dir) in listing.directories.iter().enumerate() {
            let is_last = i + 1 == dir_count;
            self.sink
                .write_line(&format_directory_line(&prefix, is_last, &dir.name))?;
            self.stats.directory_count += 1;

            self.render_directory(&dir.path, &ancestry.child(is_last))?;
        }

        Ok(())
    }

    /// Writes the inline annotation for a directory that cannot be listed.
    fn render_access_error(&mut self, path: &Path, err: &ScanError) -> Result<(), OutputError> {
        warn!("cannot list {}: {}", path.display(), err.detail());
        self.stats.access_errors += 1;

        let name = scan::display_name(path);
        for line in format_access_error(&name, &err.detail()) {
            self.sink.write_line(&line)?;
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
