use serde::{Deserialize, Serialize};
use std::fmt;

/// The three section kinds a document may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Markup,
    Logic,
    Styling,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [SectionKind::Markup, SectionKind::Logic, SectionKind::Styling];

    /// Top-level element name that introduces this section
    pub fn tag_name(self) -> &'static str {
        match self {
            SectionKind::Markup => "template",
            SectionKind::Logic => "script",
            SectionKind::Styling => "style",
        }
    }

    pub fn from_tag_name(name: &str) -> Option<Self> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.tag_name().eq_ignore_ascii_case(name))
    }

    /// Language used when a section has no `lang` attribute.
    /// Markup has none: un-`lang`ed markup is passed through.
    pub fn default_language(self) -> Option<&'static str> {
        match self {
            SectionKind::Markup => None,
            SectionKind::Logic => Some("js"),
            SectionKind::Styling => Some("css"),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Markup => write!(f, "markup"),
            SectionKind::Logic => write!(f, "logic"),
            SectionKind::Styling => write!(f, "styling"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_tag_name(kind.tag_name()), Some(kind));
        }
        assert_eq!(SectionKind::from_tag_name("STYLE"), Some(SectionKind::Styling));
        assert_eq!(SectionKind::from_tag_name("docs"), None);
    }

    #[test]
    fn test_default_languages() {
        assert_eq!(SectionKind::Markup.default_language(), None);
        assert_eq!(SectionKind::Logic.default_language(), Some("js"));
        assert_eq!(SectionKind::Styling.default_language(), Some("css"));
    }
}
