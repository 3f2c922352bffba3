//! Renderer module: HTML fragments for comments, contracts and navigation.

pub mod comment;
pub mod contract;
pub mod nav;

pub use comment::CommentRenderer;
pub use contract::{Contract, Statement};

/// Append a code block. `code` must already be HTML-safe.
fn write_code_block(out: &mut String, code: &str) {
    out.push_str("<pre><code>");
    out.push_str(code);
    out.push_str("</code></pre>\n");
}
