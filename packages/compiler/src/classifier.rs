use tracing::debug;
use weave_common::SectionKind;
use weave_parser::ast::{SectionNode, SectionTree};

/// One slot per section kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionSlots {
    pub markup: Option<SectionNode>,
    pub logic: Option<SectionNode>,
    pub styling: Option<SectionNode>,
}

impl SectionSlots {
    pub fn get(&self, kind: SectionKind) -> Option<&SectionNode> {
        match kind {
            SectionKind::Markup => self.markup.as_ref(),
            SectionKind::Logic => self.logic.as_ref(),
            SectionKind::Styling => self.styling.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: SectionKind) -> &mut Option<SectionNode> {
        match kind {
            SectionKind::Markup => &mut self.markup,
            SectionKind::Logic => &mut self.logic,
            SectionKind::Styling => &mut self.styling,
        }
    }
}

/// Assign sections to slots in document order.
///
/// Last wins: a section replaces any earlier section of the same kind.
/// Sections with unrecognised names are ignored.
pub fn classify(tree: SectionTree) -> SectionSlots {
    let mut slots = SectionSlots::default();

    for node in tree.nodes {
        let Some(kind) = SectionKind::from_tag_name(&node.name) else {
            debug!(name = %node.name, line = node.location.line, "Ignoring unknown top-level section");
            continue;
        };

        let line = node.location.line;
        if let Some(previous) = slots.slot_mut(kind).replace(node) {
            debug!(
                kind = %kind,
                discarded_line = previous.location.line,
                kept_line = line,
                "Later section replaces earlier one"
            );
        }
    }

    slots
}
