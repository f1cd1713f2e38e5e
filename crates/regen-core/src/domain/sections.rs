//! Marked sections in structured output files.
//!
//! A section is a run of whole lines:
//!
//! ```text
//! //template:begin model
//! ...generated...
//! //template:end model
//! ```
//!
//! The generator owns everything between and including the two marker
//! lines; everything else in the file belongs to whoever edits it.

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, SectionOrigin};

/// Characters that can never appear in a section name.
const NAME_DELIMITER: char = ':';

/// The literal tokens that open and close a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSyntax {
    pub begin: String,
    pub end: String,
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self {
            begin: "//template:begin".into(),
            end: "//template:end".into(),
        }
    }
}

/// What a single line means to the section scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent<'a> {
    Plain,
    Begin(&'a str),
    End(&'a str),
}

impl MarkerSyntax {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Classify one line. Lines whose name would be invalid are plain.
    pub fn classify<'a>(&self, line: &'a str) -> LineEvent<'a> {
        let line = line.trim();
        if let Some(name) = marker_name(line, &self.begin) {
            LineEvent::Begin(name)
        } else if let Some(name) = marker_name(line, &self.end) {
            LineEvent::End(name)
        } else {
            LineEvent::Plain
        }
    }

    /// Full block for section `name` in `content`, markers included, each
    /// line newline-terminated. Empty when the section is absent; when the
    /// name repeats, only the first block is returned.
    pub fn extract(&self, content: &str, name: &str) -> Result<String, DomainError> {
        validate_section_name(name)?;

        let mut lines = content.lines().enumerate();
        while let Some((index, line)) = lines.next() {
            if self.classify(line) != LineEvent::Begin(name) {
                continue;
            }

            let mut block = String::new();
            block.push_str(line);
            block.push('\n');
            for (_, inner) in lines.by_ref() {
                block.push_str(inner);
                block.push('\n');
                if self.classify(inner) == LineEvent::End(name) {
                    return Ok(block);
                }
            }

            return Err(DomainError::UnterminatedSection {
                name: name.to_string(),
                line: index + 1,
                origin: SectionOrigin::Rendered,
            });
        }

        Ok(String::new())
    }

    /// Names of every begin marker in `content`, in order of appearance,
    /// without duplicates.
    pub fn section_names<'a>(&self, content: &'a str) -> Vec<&'a str> {
        let mut names: Vec<&str> = Vec::new();
        for line in content.lines() {
            if let LineEvent::Begin(name) = self.classify(line) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

fn marker_name<'a>(line: &'a str, token: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(token)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let name = rest.trim_start();
    is_valid_section_name(name).then_some(name)
}

fn is_valid_section_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c == NAME_DELIMITER)
}

pub fn validate_section_name(name: &str) -> Result<(), DomainError> {
    if is_valid_section_name(name) {
        Ok(())
    } else {
        Err(DomainError::InvalidSectionName {
            name: name.to_string(),
        })
    }
}
