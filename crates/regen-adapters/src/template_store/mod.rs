//! Template store adapters.

mod file;
mod memory;

pub use file::FileTemplateStore;
pub use memory::InMemoryTemplateStore;

/// Drop the first `skip_lines` lines, keeping the rest byte-for-byte.
pub(crate) fn strip_directive_lines(body: &str, skip_lines: usize) -> String {
    body.split_inclusive('\n').skip(skip_lines).collect()
}
