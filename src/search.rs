//! Search index records: one `{"name" : "path"},` line per documented
//! symbol, consumed by the client-side search script.
//!
//! Records are appended as given: no escaping, no enclosing array, and the
//! trailing comma is kept on every line.

use crate::render::nav::PAGE_EXTENSION;
use crate::text::join_dotted;
use anyhow::{Context, Result};
use std::io::Write;

/// Output path of a symbol's page: `<base>/<Outer.Inner>.html`, or
/// `<base>.html` for the module itself.
pub fn page_path<S: AsRef<str>>(base_path: &str, module_len: usize, stack: &[S]) -> String {
    let decl = join_dotted(&stack[module_len..]);
    if decl.is_empty() {
        format!("{}.{}", base_path, PAGE_EXTENSION)
    } else {
        format!("{}/{}.{}", base_path, decl, PAGE_EXTENSION)
    }
}

/// Append the record for `stack` to `index`.
///
/// # Panics
///
/// If `module_len` exceeds the stack depth.
pub fn write_search_entry<W: Write, S: AsRef<str>>(
    index: &mut W,
    base_path: &str,
    module_len: usize,
    stack: &[S],
) -> Result<()> {
    assert!(
        module_len <= stack.len(),
        "module name length {} exceeds symbol stack depth {}",
        module_len,
        stack.len()
    );

    let name = join_dotted(stack);
    let path = page_path(base_path, module_len, stack);
    tracing::debug!(symbol = %name, path = %path, "search index record");

    writeln!(index, "{{\"{}\" : \"{}\"}},", name, path)
        .with_context(|| format!("failed to write search index record for {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(base: &str, module_len: usize, stack: &[&str]) -> String {
        let mut out = Vec::new();
        write_search_entry(&mut out, base, module_len, stack).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn nested_symbol() {
        assert_eq!(
            record("std/io", 2, &["std", "io", "File", "open"]),
            "{\"std.io.File.open\" : \"std/io/File.open.html\"},\n"
        );
    }

    #[test]
    fn module_symbol() {
        assert_eq!(record("std/io", 2, &["std", "io"]), "{\"std.io\" : \"std/io.html\"},\n");
    }

    #[test]
    fn records_accumulate_without_dedup() {
        let mut out = Vec::new();
        let stack = ["std", "io", "File"];
        write_search_entry(&mut out, "std/io", 2, &stack).unwrap();
        write_search_entry(&mut out, "std/io", 2, &stack).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"std.io.File\" : \"std/io/File.html\"},\n{\"std.io.File\" : \"std/io/File.html\"},\n"
        );
    }

    #[test]
    fn quotes_are_not_escaped() {
        assert_eq!(
            record("m", 1, &["m", "a\"b"]),
            "{\"m.a\"b\" : \"m/a\"b.html\"},\n"
        );
    }

    #[test]
    #[should_panic(expected = "exceeds symbol stack depth")]
    fn module_length_past_stack_panics() {
        record("std", 3, &["std"]);
    }
}
