//! Prerender route discovery.
//!
//! Lists every page a static build must render, straight from the content
//! directory and without parsing any frontmatter. Files and directories
//! whose name starts with `_` or `.` are skipped, so drafts never get a
//! route.

use crate::naming;
use crate::types::ContentKind;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Routes that exist regardless of content.
pub const STATIC_ROUTES: [&str; 3] = ["/", "/blog", "/case-studies"];

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('_') || name.starts_with('.'))
}

/// Every route under `root/content/`, static routes first, then blog posts
/// and case studies in sorted path order. Duplicates are dropped.
///
/// Unreadable directories are logged and skipped; this never fails.
pub fn prerender_routes(root: &Path) -> Vec<String> {
    let content = root.join("content");
    let mut routes: Vec<String> = STATIC_ROUTES.iter().map(|r| r.to_string()).collect();

    for kind in ContentKind::ALL {
        let dir = content.join(kind.dir_name());
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "no content directory");
            continue;
        }
        let walker = WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable content entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&dir) else {
                continue;
            };
            if let Some(route) = naming::route_for_content_file(kind, rel)
                && !routes.contains(&route.route)
            {
                routes.push(route.route);
            }
        }
    }
    routes
}
