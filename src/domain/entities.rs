//! Domain entities: core data structures

use std::fmt;

use crate::domain::DomainError;

/// Characters stripped from both ends of a prerequisite field.
const PREREQ_TRIM: &[char] = &[' ', '\t', '\r', '\n'];

/// A catalog record: course number, title and prerequisite course numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Unique key, compared exactly as written in the source file
    number: String,
    /// Display text
    title: String,
    /// Prerequisite course numbers, in source order, not validated
    prerequisites: Vec<String>,
}

impl Course {
    /// Create a course. The number must be non-empty; nothing else is validated.
    pub fn new(
        number: impl Into<String>,
        title: impl Into<String>,
        prerequisites: Vec<String>,
    ) -> Result<Self, DomainError> {
        let number = number.into();
        if number.is_empty() {
            return Err(DomainError::EmptyCourseNumber);
        }
        Ok(Self {
            number,
            title: title.into(),
            prerequisites,
        })
    }

    /// Parse one line of a catalog file: `number,title[,prereq,...]`.
    ///
    /// Number and title are taken as written. Prerequisites are trimmed and
    /// empty ones dropped. A single trailing comma does not count as a field,
    /// so `CS999,` has one field and is rejected.
    pub fn from_line(line: &str) -> Result<Self, LineRejection> {
        if line.trim().is_empty() {
            return Err(LineRejection::Blank);
        }

        let body = line.strip_suffix(',').unwrap_or(line);
        let mut fields = body.split(',');

        let (number, title) = match (fields.next(), fields.next()) {
            (Some(number), Some(title)) => (number, title),
            _ => return Err(LineRejection::TooFewFields),
        };

        let prerequisites = fields
            .map(|field| field.trim_matches(PREREQ_TRIM))
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect();

        Course::new(number, title, prerequisites).map_err(|_| LineRejection::EmptyNumber)
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.number, self.title)
    }
}

/// Why a catalog line did not produce a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRejection {
    /// Empty or whitespace-only line
    Blank,
    /// Fewer than two comma-separated fields
    TooFewFields,
    /// First field is empty
    EmptyNumber,
}

impl fmt::Display for LineRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            LineRejection::Blank => "blank line",
            LineRejection::TooFewFields => "fewer than two fields",
            LineRejection::EmptyNumber => "empty course number",
        };
        f.write_str(reason)
    }
}
