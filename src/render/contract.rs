//! Contract block: precondition/postcondition code shown after the opening
//! prose of a function's documentation.

use crate::render::write_code_block;
use crate::text::html_escape;

/// A contract statement that knows how to print itself as HTML-safe code.
pub trait Statement {
    fn format(&self, out: &mut String);
}

impl Statement for str {
    fn format(&self, out: &mut String) {
        out.push_str(&html_escape(self.trim()));
    }
}

impl Statement for String {
    fn format(&self, out: &mut String) {
        self.as_str().format(out);
    }
}

/// The `in`/`out` contracts of a declaration.
#[derive(Clone, Copy, Default)]
pub struct Contract<'a> {
    pub precondition: Option<&'a dyn Statement>,
    pub postcondition: Option<&'a dyn Statement>,
}

impl Contract<'_> {
    pub fn is_empty(&self) -> bool {
        self.precondition.is_none() && self.postcondition.is_none()
    }
}

/// Write the contract block; nothing when both statements are absent.
pub fn write_contracts(out: &mut String, contract: &Contract<'_>) {
    if contract.is_empty() {
        return;
    }

    let mut code = String::new();
    if let Some(pre) = contract.precondition {
        pre.format(&mut code);
    }
    if contract.precondition.is_some() && contract.postcondition.is_some() {
        code.push('\n');
    }
    if let Some(post) = contract.postcondition {
        post.format(&mut code);
    }

    out.push_str("<div class=\"section\"><h2>Contracts</h2>\n");
    write_code_block(out, &code);
    out.push_str("</div>\n");
}
