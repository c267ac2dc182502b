//! One builder per slide type. Every builder appends its slides to the deck, prints the page
//! numbers it reads from the shared [`SlidePlan`] and returns how many slides it appended.

use crate::configuration::{DeckConfiguration, Geometry, Palette, Theme};
use crate::deck::{Deck, Slide};
use crate::lesson::Lesson;
use crate::localization::Labels;
use crate::pagination::{Section, SlidePlan};

pub mod activities;
pub mod agenda;
pub mod closing;
pub mod content;
pub mod discussion;
pub mod facilitation;
pub mod key_terms;
pub mod learning_outcomes;
pub mod quiz;
pub mod readings;
pub mod title;

/// Everything a builder reads. The language travels with the label table, nothing is global.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub lesson: &'a Lesson,
    pub labels: &'static Labels,
    pub configuration: &'a DeckConfiguration,
    pub plan: &'a SlidePlan,
}

impl<'a> BuildContext<'a> {
    pub fn geometry(&self) -> &'a Geometry {
        &self.configuration.geometry
    }

    pub fn theme(&self) -> &'a Theme {
        &self.configuration.theme
    }

    pub fn palette(&self) -> &'a Palette {
        &self.configuration.theme.palette
    }

    /// The title printed in every footer.
    pub fn presentation_title(&self) -> &'a str {
        self.labels.presentation_title(&self.lesson.title)
    }

    /// The page number of the `offset`-th slide (0-based) of the section.
    pub fn page_number(&self, section: Section, offset: usize) -> usize {
        self.plan.first_page(section) + offset
    }

    pub fn add_footer(&self, slide: &mut Slide, page_number: usize) {
        slide.add_footer(self.presentation_title(), page_number, self.configuration);
    }
}

/// The signature shared by all the section builders.
pub type SectionBuilder = fn(&mut Deck, &BuildContext) -> usize;

pub fn builder_for(section: Section) -> SectionBuilder {
    match section {
        Section::Title => title::build,
        Section::Agenda => agenda::build,
        Section::LearningOutcomes => learning_outcomes::build,
        Section::KeyTerms => key_terms::build,
        Section::Content => content::build,
        Section::Activities => activities::build,
        Section::Quiz => quiz::build,
        Section::Discussion => discussion::build,
        Section::Readings => readings::build,
        Section::Facilitation => facilitation::build,
        Section::Closing => closing::build,
    }
}
