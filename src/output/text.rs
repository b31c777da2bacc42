//! Plain-text report.
//!
//! One header line per group, then one line per member path, with a blank
//! line between groups:
//!
//! ```text
//! Empty files (2):
//! /data/a.empty
//! /data/b.empty
//!
//! Duplicate files (3 x 1000 bytes):
//! /data/x.bin
//! /data/y.bin
//! /data/z.bin
//! ```
//!
//! Nothing at all is written when there are no groups.

use std::io::{self, Write};

use yansi::Paint;

use crate::duplicates::DuplicateGroup;

/// Text rendering of a list of duplicate groups.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    groups: &'a [DuplicateGroup],
    color: bool,
}

impl<'a> TextReport<'a> {
    /// Create an uncolored report.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self {
            groups,
            color: false,
        }
    }

    /// Render headers in bold.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The header line for `group`, without styling.
    #[must_use]
    pub fn header(group: &DuplicateGroup) -> String {
        if group.is_empty_files() {
            format!("Empty files ({}):", group.len())
        } else {
            format!(
                "Duplicate files ({} x {} bytes):",
                group.len(),
                group.size
            )
        }
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                writeln!(writer)?;
            }

            let header = Self::header(group);
            if self.color {
                writeln!(writer, "{}", header.bold())?;
            } else {
                writeln!(writer, "{header}")?;
            }

            for path in &group.paths {
                writeln!(writer, "{}", path.display())?;
            }
        }
        Ok(())
    }
}
