//! Rendering of catalog listings and course details
//!
//! Shared by the interactive shell and the one-shot commands so both print
//! the same text.

use std::io::{self, Write};

use crate::domain::{Catalog, Course};

/// Message printed when a lookup misses.
pub const COURSE_NOT_FOUND: &str = "Course not found.";

/// Write every course as `number, title`, in ascending number order.
pub fn write_course_list<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    for course in catalog {
        writeln!(out, "{}", course)?;
    }
    Ok(())
}

/// Write one course followed by its prerequisites.
///
/// ```text
/// CS201, Data Structures
/// Prerequisites:
///   CS101
/// ```
pub fn write_course_detail<W: Write>(out: &mut W, course: &Course, indent: usize) -> io::Result<()> {
    writeln!(out, "{}", course)?;
    if course.prerequisites().is_empty() {
        writeln!(out, "Prerequisites: None")?;
    } else {
        writeln!(out, "Prerequisites:")?;
        for prereq in course.prerequisites() {
            writeln!(out, "{:indent$}{}", "", prereq, indent = indent)?;
        }
    }
    Ok(())
}
