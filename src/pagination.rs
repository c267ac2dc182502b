use serde::{Deserialize, Serialize};

use crate::configuration::Geometry;
use crate::lesson::Lesson;
use crate::localization::{Labels, Language};
use crate::text::{clean_title, has_facilitation_marker, TitleKeyword};

/// Height of an agenda section header, in inches.
pub const AGENDA_HEADER_HEIGHT: f64 = 0.5;
/// Height of a single agenda item, in inches.
pub const AGENDA_ITEM_HEIGHT: f64 = 0.35;
pub const KEY_TERMS_PER_SLIDE: usize = 4;
pub const READINGS_PER_SLIDE: usize = 2;

/// Slack used when comparing accumulated heights, so that summing e.g. `0.35` several
/// times does not push an exactly fitting item onto the next slide.
const HEIGHT_TOLERANCE: f64 = 1e-9;

/// The groups of slides of a deck, listed in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Title,
    Agenda,
    LearningOutcomes,
    KeyTerms,
    Content,
    Activities,
    Quiz,
    Discussion,
    Readings,
    Facilitation,
    Closing,
}

impl Section {
    pub const RENDERING_ORDER: [Section; 11] = [
        Section::Title,
        Section::Agenda,
        Section::LearningOutcomes,
        Section::KeyTerms,
        Section::Content,
        Section::Activities,
        Section::Quiz,
        Section::Discussion,
        Section::Readings,
        Section::Facilitation,
        Section::Closing,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// A titled group of agenda entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaSection {
    pub title: String,
    pub items: Vec<String>,
}

impl AgendaSection {
    pub fn height(&self) -> f64 {
        AGENDA_HEADER_HEIGHT + self.items.len() as f64 * AGENDA_ITEM_HEIGHT
    }
}

/// Derives the agenda of a lesson. Introduction is always listed, the other categories
/// only when the lesson has something to put in them.
pub fn agenda_sections(lesson: &Lesson, labels: &Labels) -> Vec<AgendaSection> {
    let mut sections = vec![AgendaSection {
        title: labels.introduction.to_string(),
        items: vec![
            labels.learning_outcomes.to_string(),
            labels.key_terms.to_string(),
        ],
    }];

    let content_titles: Vec<String> = lesson
        .slides
        .iter()
        .map(|slide| clean_title(&slide.title, TitleKeyword::Slide))
        .filter(|title| !title.is_empty())
        .collect();
    if !content_titles.is_empty() {
        sections.push(AgendaSection {
            title: labels.main_content.to_string(),
            items: content_titles,
        });
    }

    if !lesson.activities.is_empty() {
        sections.push(AgendaSection {
            title: labels.activities.to_string(),
            items: lesson
                .activities
                .iter()
                .map(|activity| activity.title.clone())
                .collect(),
        });
    }

    let mut knowledge_items = Vec::new();
    let quiz_count = lesson.quiz_questions().count();
    if quiz_count > 0 {
        knowledge_items.push(labels.quiz_questions(quiz_count));
    }
    let discussion_count = lesson.discussion_questions().count();
    if discussion_count > 0 {
        knowledge_items.push(labels.discussion_questions(discussion_count));
    }
    if !knowledge_items.is_empty() {
        sections.push(AgendaSection {
            title: labels.test_your_knowledge.to_string(),
            items: knowledge_items,
        });
    }

    if !lesson.further_readings.is_empty() {
        sections.push(AgendaSection {
            title: labels.additional_resources.to_string(),
            items: vec![labels.further_readings.to_string()],
        });
    }

    sections
}

/// One entry drawn on an agenda slide, referring back into the agenda sections by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaPlacement {
    Header { section: usize },
    Item { section: usize, item: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgendaPage {
    pub placements: Vec<AgendaPlacement>,
}

/// The distribution of the agenda over slides. The same plan provides the slide count used
/// for numbering and the layout drawn by the agenda builder, so the two always agree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgendaPlan {
    pub pages: Vec<AgendaPage>,
}

impl AgendaPlan {
    /// Greedily fills slides top to bottom. A header is placed together with the first item
    /// of its section, and the remaining items of a section that does not fit continue at
    /// the top of the next slide. An entry taller than a whole slide still gets a slide of its own.
    pub fn plan(sections: &[AgendaSection], available_height: f64) -> AgendaPlan {
        let mut pages = Vec::new();
        let mut current_page = AgendaPage::default();
        let mut used_height = 0.0;

        for (section_index, section) in sections.iter().enumerate() {
            let mut header_placed = false;
            // A section without items still shows its header
            let item_count = section.items.len().max(1);
            for item_index in 0..item_count {
                let has_item = item_index < section.items.len();
                let mut needed_height = if has_item { AGENDA_ITEM_HEIGHT } else { 0.0 };
                if !header_placed {
                    needed_height += AGENDA_HEADER_HEIGHT;
                }
                if used_height + needed_height > available_height + HEIGHT_TOLERANCE
                    && !current_page.placements.is_empty()
                {
                    pages.push(std::mem::take(&mut current_page));
                    used_height = 0.0;
                }
                if !header_placed {
                    current_page.placements.push(AgendaPlacement::Header {
                        section: section_index,
                    });
                    header_placed = true;
                }
                if has_item {
                    current_page.placements.push(AgendaPlacement::Item {
                        section: section_index,
                        item: item_index,
                    });
                }
                used_height += needed_height;
            }
        }
        if !current_page.placements.is_empty() {
            pages.push(current_page);
        }

        AgendaPlan { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// The number of slides every section renders and the page number each one starts at,
/// computed once from the defaulted lesson and shared by all the section builders.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidePlan {
    slide_counts: [usize; 11],
    first_pages: [usize; 11],
    counted_total: usize,
    agenda_sections: Vec<AgendaSection>,
    agenda: AgendaPlan,
}

impl SlidePlan {
    pub fn new(lesson: &Lesson, labels: &Labels, geometry: &Geometry) -> SlidePlan {
        let agenda_sections = agenda_sections(lesson, labels);
        let agenda = AgendaPlan::plan(&agenda_sections, geometry.agenda_available_height());

        let content_slides = lesson.slides.len();
        // The second content slide is never rendered, it is still part of the counted total
        let rendered_content_slides = if content_slides >= 2 {
            content_slides - 1
        } else {
            content_slides
        };
        let has_facilitation = lesson
            .activities
            .iter()
            .any(|activity| has_facilitation_marker(&activity.description));

        let mut slide_counts = [0; 11];
        for section in Section::RENDERING_ORDER {
            slide_counts[section.index()] = match section {
                Section::Title | Section::LearningOutcomes | Section::Closing => 1,
                Section::Agenda => agenda.page_count(),
                Section::KeyTerms => lesson.key_terms.len().div_ceil(KEY_TERMS_PER_SLIDE),
                Section::Content => rendered_content_slides,
                Section::Activities => lesson.activities.len() * 2,
                Section::Quiz => lesson.quiz_questions().count() * 2,
                Section::Discussion => lesson.discussion_questions().count() * 2,
                Section::Readings => lesson.further_readings.len().div_ceil(READINGS_PER_SLIDE),
                Section::Facilitation => usize::from(has_facilitation),
            };
        }

        let mut first_pages = [0; 11];
        let mut next_page = 1;
        for section in Section::RENDERING_ORDER {
            first_pages[section.index()] = next_page;
            next_page += slide_counts[section.index()];
        }

        let counted_total = slide_counts.iter().sum::<usize>() + content_slides
            - rendered_content_slides;

        log::debug!(
            "Planned {} slides ({} counted), agenda on {} slides, section counts {:?}",
            next_page - 1,
            counted_total,
            agenda.page_count(),
            slide_counts
        );

        SlidePlan {
            slide_counts,
            first_pages,
            counted_total,
            agenda_sections,
            agenda,
        }
    }

    /// The number of slides the section renders, facilitation overflow not included.
    pub fn slide_count(&self, section: Section) -> usize {
        self.slide_counts[section.index()]
    }

    /// The page number printed on the first slide of the section: one plus the slide
    /// counts of every section rendered before it.
    pub fn first_page(&self, section: Section) -> usize {
        self.first_pages[section.index()]
    }

    /// The total slide count of the lesson, which includes the content slide that is skipped
    /// while rendering.
    pub fn counted_total(&self) -> usize {
        self.counted_total
    }

    /// The number of slides a build appends, before any facilitation overflow slides.
    pub fn rendered_total(&self) -> usize {
        self.slide_counts.iter().sum()
    }

    pub fn has_facilitation(&self) -> bool {
        self.slide_count(Section::Facilitation) > 0
    }

    pub fn agenda_sections(&self) -> &[AgendaSection] {
        &self.agenda_sections
    }

    pub fn agenda(&self) -> &AgendaPlan {
        &self.agenda
    }
}

/// The total number of slides of the lesson with the default geometry.
pub fn count_total_slides(lesson: &Lesson) -> usize {
    count_total_slides_with(lesson, &Geometry::default())
}

pub fn count_total_slides_with(lesson: &Lesson, geometry: &Geometry) -> usize {
    SlidePlan::new(lesson, Language::En.labels(), geometry).counted_total()
}
