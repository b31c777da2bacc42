//! Grouping for files at or below the small-file threshold.
//!
//! Small files are keyed by their entire content. Holding a few dozen bytes
//! per distinct content is cheap, and map-key equality is exact, so two
//! paths share a set if and only if their contents are byte-identical. No
//! digest is ever computed here.

use std::collections::BTreeMap;
use std::path::Path;

use super::index::{add_to_group, ContentKey, PathSet};

/// Add a small file whose full content has already been read.
pub(crate) fn add_small_file(
    by_content: &mut BTreeMap<ContentKey, PathSet>,
    path: &Path,
    content: ContentKey,
) {
    if add_to_group(by_content, content, path.to_path_buf()) {
        log::trace!("Small file grouped by content: {}", path.display());
    }
}
