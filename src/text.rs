//! Pure text helpers shared by the slide counter and the section builders.

/// The keyword a numbered title prefix starts with, e.g. "Slide 3" or "Activity 2".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleKeyword {
    Slide,
    Activity,
}

impl TitleKeyword {
    fn as_str(self) -> &'static str {
        match self {
            TitleKeyword::Slide => "slide",
            TitleKeyword::Activity => "activity",
        }
    }
}

/// Strips a leading "Slide N:"-like prefix from a title. Text after the first colon wins,
/// otherwise a leading `<keyword> <digits>` pair of tokens is dropped.
pub fn clean_title(raw: &str, keyword: TitleKeyword) -> String {
    if let Some((_, after)) = raw.split_once(':') {
        return after.trim().to_string();
    }
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() > 1
        && parts[0].to_lowercase() == keyword.as_str()
        && !parts[1].is_empty()
        && parts[1].chars().all(|character| character.is_ascii_digit())
    {
        return parts[2..].join(" ");
    }
    raw.trim().to_string()
}

/// The two kinds of annotation an activity description may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerCategory {
    FacilitationNotes,
    LearningObjective,
}

/// Marker phrases introducing facilitation notes, tried in this order.
pub const FACILITATION_MARKERS: [&str; 9] = [
    "Facilitation notes:",
    "Facilitation Notes:",
    "FACILITATION NOTES:",
    "Facilitator notes:",
    "Facilitator guidance:",
    "Facilitation tip:",
    "Catatan fasilitasi:",
    "Catatan Fasilitasi:",
    "Panduan Fasilitator:",
];

/// Marker phrases introducing a learning objective, tried in this order.
pub const LEARNING_OBJECTIVE_MARKERS: [&str; 6] = [
    "Learning Objective:",
    "Learning Objectives:",
    "LEARNING OBJECTIVES:",
    "Success criteria:",
    "Tujuan Pembelajaran:",
    "Kriteria keberhasilan:",
];

impl MarkerCategory {
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            MarkerCategory::FacilitationNotes => &FACILITATION_MARKERS,
            MarkerCategory::LearningObjective => &LEARNING_OBJECTIVE_MARKERS,
        }
    }
}

/// The result of splitting free text around a marker phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedSections {
    pub before: String,
    pub after: String,
    /// The marker the text was split on, `None` when no marker of the category occurs.
    pub marker: Option<&'static str>,
}

/// Splits the text around the first marker of the category (in table order) found in it.
/// Without any marker the text is returned untouched as `before`.
pub fn extract_marked_sections(text: &str, category: MarkerCategory) -> MarkedSections {
    for marker in category.markers() {
        if let Some(position) = text.find(marker) {
            return MarkedSections {
                before: text[..position].trim().to_string(),
                after: text[position + marker.len()..].trim().to_string(),
                marker: Some(marker),
            };
        }
    }
    MarkedSections {
        before: text.to_string(),
        after: String::new(),
        marker: None,
    }
}

/// Whether the text carries any facilitation-notes marker phrase.
pub fn has_facilitation_marker(text: &str) -> bool {
    FACILITATION_MARKERS.iter().any(|marker| text.contains(marker))
}

/// An activity description split into its displayed part and its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivityNotes {
    pub description: String,
    pub facilitation_notes: String,
    pub learning_objectives: String,
    pub has_facilitation_marker: bool,
}

/// Extracts facilitation notes and then a learning objective from an activity description.
/// The learning objective is searched in what remains before the facilitation marker, or in
/// the whole description when the marker is followed by no notes.
pub fn extract_facilitation_content(description: &str) -> ActivityNotes {
    let facilitation = extract_marked_sections(description, MarkerCategory::FacilitationNotes);
    let has_facilitation_marker = facilitation.marker.is_some();
    let source = if !facilitation.after.is_empty() {
        facilitation.before.as_str()
    } else {
        description
    };
    let learning = extract_marked_sections(source, MarkerCategory::LearningObjective);
    let remaining_description = if learning.marker.is_some() {
        learning.before
    } else {
        facilitation.before.clone()
    };

    ActivityNotes {
        description: remaining_description,
        facilitation_notes: facilitation.after,
        learning_objectives: learning.after,
        has_facilitation_marker,
    }
}

/// How many characters fit on a line of the given width (in inches) at the font size (in points).
pub fn characters_per_line(font_size: f64, width: f64) -> usize {
    let characters_per_inch = 120.0 / (font_size / 10.0);
    ((characters_per_inch * width).floor() as usize).max(1)
}

/// Crude estimate, in inches, of the height the text takes once wrapped in a box of the given width.
pub fn estimate_text_height(text: &str, font_size: f64, width: f64) -> f64 {
    let characters = text.chars().count();
    let lines = characters.div_ceil(characters_per_line(font_size, width));
    let line_height = (font_size / 72.0) * 1.2;
    (lines as f64 * line_height).max(0.2)
}

/// Whether a block of height `height` placed at `y` would run into the footer band.
pub fn check_content_overflow(y: f64, height: f64, footer_y: f64) -> bool {
    (y + height) > (footer_y - 0.2)
}

const BULLET_MARKERS: [&str; 3] = ["•", "*", "▪"];
const SUB_BULLET_MARKERS: [&str; 3] = ["-", "◦", "–"];

/// A content line with its bullet markers interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletLine {
    pub is_bullet: bool,
    pub level: u8,
    pub text: String,
}

/// Detects the nesting level encoded by a line's leading marker characters or indentation.
pub fn detect_bullet_level(line: &str) -> BulletLine {
    let indented = line.starts_with("  ") || line.starts_with('\t');
    let trimmed = line.trim();
    for marker in BULLET_MARKERS {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return BulletLine {
                is_bullet: true,
                level: if indented { 1 } else { 0 },
                text: rest.trim().to_string(),
            };
        }
    }
    for marker in SUB_BULLET_MARKERS {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return BulletLine {
                is_bullet: true,
                level: 1,
                text: rest.trim().to_string(),
            };
        }
    }
    BulletLine {
        is_bullet: indented,
        level: if indented { 1 } else { 0 },
        text: trimmed.to_string(),
    }
}

/// Removes a leading "3." style enumeration from a learning outcome.
pub fn strip_outcome_numbering(outcome: &str) -> &str {
    let digits = outcome
        .char_indices()
        .take_while(|(_, character)| character.is_ascii_digit())
        .count();
    if digits > 0 && outcome[digits..].starts_with('.') {
        outcome[digits + 1..].trim_start()
    } else {
        outcome
    }
}

/// Greedily wraps the text on word boundaries so that no line exceeds the number of characters
/// `estimate_text_height` assumes. Words longer than a line are split. Explicit newlines are kept.
pub fn wrap_text(text: &str, font_size: f64, width: f64) -> Vec<String> {
    let maximum_characters = characters_per_line(font_size, width);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_length = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > maximum_characters {
                if current_length > 0 {
                    lines.push(std::mem::take(&mut current_line));
                    current_length = 0;
                }
                let rest = word.split_off(maximum_characters);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let separator = usize::from(current_length > 0);
            if current_length + separator + word.len() > maximum_characters {
                lines.push(std::mem::take(&mut current_line));
                current_length = 0;
            }
            if current_length > 0 {
                current_line.push(' ');
                current_length += 1;
            }
            current_length += word.len();
            current_line.extend(word);
        }
        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_lose_their_numbered_prefix() {
        assert_eq!(clean_title("Slide 1: Overview", TitleKeyword::Slide), "Overview");
        assert_eq!(clean_title("Slide 12 Wrap up", TitleKeyword::Slide), "Wrap up");
        assert_eq!(
            clean_title("activity 3 Group work", TitleKeyword::Activity),
            "Group work"
        );
        assert_eq!(clean_title("  Plain title ", TitleKeyword::Slide), "Plain title");
        assert_eq!(clean_title("Slide one", TitleKeyword::Slide), "Slide one");
    }

    #[test]
    fn degenerate_titles_do_not_panic() {
        assert_eq!(clean_title("", TitleKeyword::Slide), "");
        assert_eq!(clean_title("Slide", TitleKeyword::Slide), "Slide");
        assert_eq!(clean_title("Activity 4", TitleKeyword::Activity), "");
        assert_eq!(clean_title(":", TitleKeyword::Slide), "");
    }

    #[test]
    fn text_without_markers_is_returned_as_is() {
        let sections = extract_marked_sections("  Just a description ", MarkerCategory::FacilitationNotes);

        assert_eq!(sections.before, "  Just a description ");
        assert_eq!(sections.after, "");
        assert_eq!(sections.marker, None);
    }

    #[test]
    fn text_is_split_around_the_marker() {
        let text = "Work in pairs. Facilitation notes: walk around the room ";
        let sections = extract_marked_sections(text, MarkerCategory::FacilitationNotes);
        let position = text.find("Facilitation notes:").unwrap();

        assert_eq!(sections.before, text[..position].trim());
        assert_eq!(sections.after, "walk around the room");
        assert_eq!(sections.marker, Some("Facilitation notes:"));
    }

    #[test]
    fn markers_are_tried_in_table_order() {
        let text = "Intro Facilitator notes: first Facilitation Notes: second";
        let sections = extract_marked_sections(text, MarkerCategory::FacilitationNotes);

        assert_eq!(sections.marker, Some("Facilitation Notes:"));
        assert_eq!(sections.before, "Intro Facilitator notes: first");
        assert_eq!(sections.after, "second");
    }

    #[test]
    fn both_annotations_are_extracted() {
        let notes = extract_facilitation_content(
            "Sort the cards. Learning Objective: classify shapes Facilitation notes: give hints",
        );

        assert_eq!(notes.description, "Sort the cards.");
        assert_eq!(notes.learning_objectives, "classify shapes");
        assert_eq!(notes.facilitation_notes, "give hints");
        assert!(notes.has_facilitation_marker);

        let notes = extract_facilitation_content("Explore. Success criteria: three examples");
        assert_eq!(notes.description, "Explore.");
        assert_eq!(notes.learning_objectives, "three examples");
        assert_eq!(notes.facilitation_notes, "");
        assert!(!notes.has_facilitation_marker);
    }

    #[test]
    fn empty_notes_search_the_objective_in_the_whole_description() {
        let notes = extract_facilitation_content(
            "Sort. Learning Objective: classify Facilitation notes:",
        );
        assert_eq!(notes.description, "Sort.");
        assert_eq!(notes.learning_objectives, "classify Facilitation notes:");
        assert_eq!(notes.facilitation_notes, "");
        assert!(notes.has_facilitation_marker);

        let notes = extract_facilitation_content("Sort. Facilitation notes:");
        assert_eq!(notes.description, "Sort.");
        assert_eq!(notes.learning_objectives, "");
        assert!(notes.has_facilitation_marker);
    }

    #[test]
    fn facilitation_presence_uses_the_full_marker_table() {
        assert!(has_facilitation_marker("Do it. Facilitator guidance: be kind"));
        assert!(has_facilitation_marker("Catatan Fasilitasi: pelan-pelan"));
        assert!(!has_facilitation_marker("facilitation notes without colon"));
    }

    #[test]
    fn text_height_grows_with_length() {
        let short = estimate_text_height("short", 20.0, 8.6);
        let long = estimate_text_height(&"word ".repeat(200), 20.0, 8.6);

        assert!((short - 20.0 / 72.0 * 1.2).abs() < 1e-9);
        assert!(long > short);
        assert!((estimate_text_height("", 16.0, 8.3) - 0.2).abs() < 1e-9);
        // A very narrow box still wraps one character per line
        assert!(estimate_text_height("abc", 200.0, 0.01) > 0.2);
    }

    #[test]
    fn bullet_levels_follow_the_markers() {
        assert_eq!(
            detect_bullet_level("• Point"),
            BulletLine { is_bullet: true, level: 0, text: "Point".into() }
        );
        assert_eq!(
            detect_bullet_level("- Sub B"),
            BulletLine { is_bullet: true, level: 1, text: "Sub B".into() }
        );
        assert_eq!(
            detect_bullet_level("  indented"),
            BulletLine { is_bullet: true, level: 1, text: "indented".into() }
        );
        assert_eq!(
            detect_bullet_level("Point A"),
            BulletLine { is_bullet: false, level: 0, text: "Point A".into() }
        );
    }

    #[test]
    fn outcome_numbering_is_stripped() {
        assert_eq!(strip_outcome_numbering("1. Explain"), "Explain");
        assert_eq!(strip_outcome_numbering("12.Compare"), "Compare");
        assert_eq!(strip_outcome_numbering("2020 was a year"), "2020 was a year");
    }

    #[test]
    fn wrapped_lines_respect_the_line_budget() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(10);
        let maximum = characters_per_line(18.0, 2.0);
        let lines = wrap_text(&text, 18.0, 2.0);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.chars().count() <= maximum));
        assert_eq!(lines.join(" ").split_whitespace().count(), 90);
        assert_eq!(wrap_text("a\nb", 18.0, 2.0), vec!["a", "b"]);
    }
}
