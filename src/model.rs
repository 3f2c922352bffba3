//! Data model for parsed doc comments: format-agnostic.

/// Spellings accepted for the "see also" section. All of them merge into a
/// single block when rendered.
pub const SEE_ALSO_ALIASES: &[&str] = &["See_also", "See_Also", "see also", "See Also"];

/// A parsed doc comment attached to one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub sections: Vec<Section>,
    /// The comment only says "same as the previous declaration".
    pub is_ditto: bool,
}

/// A named block within a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Raw section name as written in the comment (e.g. "See Also")
    pub name: String,
    /// HTML-safe text
    pub content: String,
    /// `(parameter, description)` pairs, only populated for `Params`
    pub mapping: Vec<(String, String)>,
}

/// Classification of a section name.
///
/// Well-known names get their own variant; everything else is `Custom` and
/// renders verbatim under its own heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind<'a> {
    Summary,
    Description,
    Params,
    Returns,
    Note,
    SeeAlso,
    Macros,
    Custom(&'a str),
}

impl Section {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            mapping: Vec::new(),
        }
    }

    pub fn params(mapping: Vec<(String, String)>) -> Self {
        Self {
            name: "Params".to_string(),
            content: String::new(),
            mapping,
        }
    }

    pub fn kind(&self) -> SectionKind<'_> {
        SectionKind::from_name(&self.name)
    }
}

impl<'a> SectionKind<'a> {
    pub fn from_name(name: &'a str) -> Self {
        match name {
            "Summary" => SectionKind::Summary,
            "Description" | "description" => SectionKind::Description,
            "Params" => SectionKind::Params,
            "Returns" => SectionKind::Returns,
            "Note" => SectionKind::Note,
            "Macros" => SectionKind::Macros,
            _ if SEE_ALSO_ALIASES.contains(&name) => SectionKind::SeeAlso,
            _ => SectionKind::Custom(name),
        }
    }

    /// Opening prose: rendered without a heading.
    pub fn is_prose(self) -> bool {
        matches!(self, SectionKind::Summary | SectionKind::Description)
    }

    /// Heading text shown above the section.
    pub fn display_name(self) -> &'a str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::Description => "Description",
            SectionKind::Params => "Parameters",
            SectionKind::Returns => "Returns",
            SectionKind::Note => "Note:",
            SectionKind::SeeAlso => "See Also:",
            SectionKind::Macros => "Macros",
            SectionKind::Custom(name) => name,
        }
    }
}

/// One documented usage example: the code body and its own doc comment.
#[derive(Debug, Clone, Copy)]
pub struct Example<'a> {
    pub body: &'a str,
    pub comment: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn see_also_spellings_share_a_kind() {
        for name in SEE_ALSO_ALIASES {
            assert_eq!(SectionKind::from_name(name), SectionKind::SeeAlso);
        }
        assert_eq!(
            SectionKind::from_name("see_also"),
            SectionKind::Custom("see_also")
        );
    }

    #[test]
    fn description_either_case() {
        assert_eq!(SectionKind::from_name("description"), SectionKind::Description);
        assert_eq!(SectionKind::from_name("Description"), SectionKind::Description);
    }

    #[test]
    fn display_names() {
        assert_eq!(SectionKind::Params.display_name(), "Parameters");
        assert_eq!(SectionKind::Note.display_name(), "Note:");
        assert_eq!(SectionKind::SeeAlso.display_name(), "See Also:");
        assert_eq!(SectionKind::from_name("Throws").display_name(), "Throws");
    }
}
