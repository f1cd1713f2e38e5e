//! Reconcile freshly rendered text with the file a previous run left behind.
//!
//! The prior file is walked line by line with a two-state machine:
//!
//! ```text
//!            begin(name)
//!   Outside ─────────────► InSection(name)
//!      ▲                        │
//!      └────────────────────────┘
//!        end(name): emit rendered block for `name`
//! ```
//!
//! In `Outside` lines are copied; in `InSection` they are dropped. When the
//! section closes, the rendered text's version of that section is emitted
//! in its place (possibly nothing at all). Sections that only exist in the
//! rendered text are not inserted anywhere; they are reported back in
//! [`MergeOutcome::skipped_sections`].

use tracing::{debug, warn};

use crate::domain::{
    error::{DomainError, SectionOrigin},
    sections::{LineEvent, MarkerSyntax},
};

/// How the final content of a destination was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// No prior file; rendered text written as is.
    Fresh,
    /// Output kind does not merge; rendered text replaced the prior file.
    Overwrite,
    /// Prior file patched section by section.
    Merged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub content: String,
    pub strategy: MergeStrategy,
    /// Sections in the prior file that were replaced, in file order.
    pub replaced_sections: Vec<String>,
    /// Sections in the rendered text with no counterpart in the prior file.
    pub skipped_sections: Vec<String>,
}

impl MergeOutcome {
    fn verbatim(rendered: &str, strategy: MergeStrategy) -> Self {
        Self {
            content: rendered.to_string(),
            strategy,
            replaced_sections: Vec::new(),
            skipped_sections: Vec::new(),
        }
    }
}

enum ScanState<'a> {
    Outside,
    InSection { name: &'a str, opened_at: usize },
}

#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    markers: MarkerSyntax,
}

impl MergeEngine {
    pub fn new(markers: MarkerSyntax) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &MarkerSyntax {
        &self.markers
    }

    /// Produce the content to write for one destination.
    ///
    /// `prior` is the current file content, if there is one. `structured`
    /// says whether this output kind opts into section merging at all.
    pub fn merge(
        &self,
        rendered: &str,
        prior: Option<&str>,
        structured: bool,
    ) -> Result<MergeOutcome, DomainError> {
        match prior {
            None => Ok(MergeOutcome::verbatim(rendered, MergeStrategy::Fresh)),
            Some(_) if !structured => Ok(MergeOutcome::verbatim(rendered, MergeStrategy::Overwrite)),
            Some(prior) => self.patch(rendered, prior),
        }
    }

    fn patch(&self, rendered: &str, prior: &str) -> Result<MergeOutcome, DomainError> {
        let mut content = String::with_capacity(prior.len().max(rendered.len()));
        let mut replaced: Vec<String> = Vec::new();
        let mut state = ScanState::Outside;

        for (index, line) in prior.lines().enumerate() {
            state = match (state, self.markers.classify(line)) {
                (ScanState::Outside, LineEvent::Begin(name)) => ScanState::InSection {
                    name,
                    opened_at: index + 1,
                },
                (ScanState::Outside, _) => {
                    content.push_str(line);
                    content.push('\n');
                    ScanState::Outside
                }
                (ScanState::InSection { name, .. }, LineEvent::End(end)) if end == name => {
                    content.push_str(&self.markers.extract(rendered, name)?);
                    replaced.push(name.to_string());
                    ScanState::Outside
                }
                (in_section @ ScanState::InSection { .. }, _) => in_section,
            };
        }

        if let ScanState::InSection { name, opened_at } = state {
            return Err(DomainError::UnterminatedSection {
                name: name.to_string(),
                line: opened_at,
                origin: SectionOrigin::PriorFile,
            });
        }

        let skipped: Vec<String> = self
            .markers
            .section_names(rendered)
            .into_iter()
            .filter(|name| !replaced.iter().any(|r| r == name))
            .map(str::to_string)
            .collect();

        if !skipped.is_empty() {
            warn!(
                sections = ?skipped,
                "Rendered sections have no counterpart in the existing file and were not inserted"
            );
        }
        debug!(replaced = replaced.len(), "Merged into existing file");

        Ok(MergeOutcome {
            content,
            strategy: MergeStrategy::Merged,
            replaced_sections: replaced,
            skipped_sections: skipped,
        })
    }
}
