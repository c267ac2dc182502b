use serde::{Deserialize, Serialize};

use crate::error::ContextError;
use crate::lesson::{ContentType, DifficultyLevel};

/// The languages generated headings and captions can be rendered in. Lesson content
/// itself is never translated and passes through verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Id,
}

impl std::str::FromStr for Language {
    type Err = ContextError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "id" => Ok(Language::Id),
            _ => Err(ContextError::validation(format!(
                "The language {:?} is not supported, expected one of \"en\" or \"id\"",
                code
            ))),
        }
    }
}

impl Language {
    pub fn labels(self) -> &'static Labels {
        match self {
            Language::En => &ENGLISH_LABELS,
            Language::Id => &INDONESIAN_LABELS,
        }
    }
}

/// The label table of a language. Templated labels carry `{name}` placeholders
/// which are filled in by the accessor methods below.
#[derive(Debug)]
pub struct Labels {
    pub agenda: &'static str,
    agenda_continued: &'static str,
    pub continued: &'static str,
    pub introduction: &'static str,
    pub learning_outcomes: &'static str,
    pub key_terms: &'static str,
    pub main_content: &'static str,
    pub activities: &'static str,
    pub test_your_knowledge: &'static str,
    quiz_questions: &'static str,
    discussion_questions: &'static str,
    pub additional_resources: &'static str,
    pub further_readings: &'static str,
    pub untitled_presentation: &'static str,
    pub untitled_activity: &'static str,
    pub untitled_reading: &'static str,
    pub unknown_author: &'static str,
    by_the_end: &'static str,
    pub term: &'static str,
    pub definition: &'static str,
    activity: &'static str,
    pub materials_suffix: &'static str,
    pub activity_type: &'static str,
    pub duration: &'static str,
    pub facilitation_notes_label: &'static str,
    pub learning_objective_label: &'static str,
    pub notes_available: &'static str,
    pub instructions: &'static str,
    pub materials_needed: &'static str,
    quiz_question: &'static str,
    quiz_answer: &'static str,
    question: &'static str,
    pub correct_answer: &'static str,
    pub explanation: &'static str,
    discussion_question: &'static str,
    pub group_discussion: &'static str,
    pub group_instruction: &'static str,
    facilitator_guidance: &'static str,
    pub author: &'static str,
    pub facilitation_notes_summary: &'static str,
    pub continued_next_slide: &'static str,
    pub thank_you: &'static str,
    pub presentation: &'static str,
    content_type_names: [&'static str; 3],
    difficulty_names: [&'static str; 3],
}

pub static ENGLISH_LABELS: Labels = Labels {
    agenda: "Agenda",
    agenda_continued: " (continued {idx}/{total})",
    continued: " (continued)",
    introduction: "Introduction",
    learning_outcomes: "Learning Outcomes",
    key_terms: "Key Terms & Concepts",
    main_content: "Main Content",
    activities: "Activities",
    test_your_knowledge: "Test Your Knowledge",
    quiz_questions: "Quiz Questions ({count})",
    discussion_questions: "Discussion Questions ({count})",
    additional_resources: "Additional Resources",
    further_readings: "Further Readings & Resources",
    untitled_presentation: "Untitled Presentation",
    untitled_activity: "Untitled Activity",
    untitled_reading: "Untitled Reading",
    unknown_author: "Unknown Author",
    by_the_end: "By the end of this {contentType}, you will be able to:",
    term: "Term",
    definition: "Definition",
    activity: "Activity {num}: {title}",
    materials_suffix: "(Materials)",
    activity_type: "Type",
    duration: "Duration",
    facilitation_notes_label: "Facilitation Notes:",
    learning_objective_label: "Learning Objective:",
    notes_available: "Notes",
    instructions: "Instructions",
    materials_needed: "Materials Needed",
    quiz_question: "Quiz Question {num}",
    quiz_answer: "Answer {num}",
    question: "Question: {text}",
    correct_answer: "Correct Answer:",
    explanation: "Explanation",
    discussion_question: "Discussion Question {num}",
    group_discussion: "Group Discussion",
    group_instruction: "Discuss this question in small groups and share your ideas.",
    facilitator_guidance: "Facilitator Guidance: Question {num}",
    author: "Author:",
    facilitation_notes_summary: "Facilitation Notes Summary",
    continued_next_slide: "Continued on next slide...",
    thank_you: "Thank You",
    presentation: "Presentation:",
    content_type_names: ["Lecture", "Tutorial", "Workshop"],
    difficulty_names: [
        "Introductory Level",
        "Intermediate Level",
        "Advanced Level",
    ],
};

pub static INDONESIAN_LABELS: Labels = Labels {
    agenda: "Agenda",
    agenda_continued: " (lanjutan {idx}/{total})",
    continued: " (lanjutan)",
    introduction: "Pendahuluan",
    learning_outcomes: "Capaian Pembelajaran",
    key_terms: "Istilah & Konsep Kunci",
    main_content: "Materi Utama",
    activities: "Aktivitas",
    test_your_knowledge: "Uji Pengetahuan Anda",
    quiz_questions: "Soal Kuis ({count})",
    discussion_questions: "Pertanyaan Diskusi ({count})",
    additional_resources: "Sumber Tambahan",
    further_readings: "Bacaan & Sumber Lanjutan",
    untitled_presentation: "Presentasi Tanpa Judul",
    untitled_activity: "Aktivitas Tanpa Judul",
    untitled_reading: "Bacaan Tanpa Judul",
    unknown_author: "Penulis Tidak Diketahui",
    by_the_end: "Di akhir {contentType} ini, Anda akan dapat:",
    term: "Istilah",
    definition: "Definisi",
    activity: "Aktivitas {num}: {title}",
    materials_suffix: "(Bahan)",
    activity_type: "Jenis",
    duration: "Durasi",
    facilitation_notes_label: "Catatan Fasilitasi:",
    learning_objective_label: "Tujuan Pembelajaran:",
    notes_available: "Catatan",
    instructions: "Instruksi",
    materials_needed: "Bahan yang Dibutuhkan",
    quiz_question: "Soal Kuis {num}",
    quiz_answer: "Jawaban {num}",
    question: "Pertanyaan: {text}",
    correct_answer: "Jawaban Benar:",
    explanation: "Penjelasan",
    discussion_question: "Pertanyaan Diskusi {num}",
    group_discussion: "Diskusi Kelompok",
    group_instruction: "Diskusikan pertanyaan ini dalam kelompok kecil dan bagikan ide Anda.",
    facilitator_guidance: "Panduan Fasilitator: Pertanyaan {num}",
    author: "Penulis:",
    facilitation_notes_summary: "Ringkasan Catatan Fasilitasi",
    continued_next_slide: "Berlanjut di slide berikutnya...",
    thank_you: "Terima Kasih",
    presentation: "Presentasi:",
    content_type_names: ["Kuliah", "Tutorial", "Lokakarya"],
    difficulty_names: ["Tingkat Pengantar", "Tingkat Menengah", "Tingkat Lanjut"],
};

/// Replaces every `{name}` placeholder of the template with the associated value.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |filled, (name, value)| {
            filled.replace(&format!("{{{}}}", name), value)
        })
}

impl Labels {
    pub fn agenda_continued(&self, index: usize, total: usize) -> String {
        fill(
            self.agenda_continued,
            &[("idx", &index.to_string()), ("total", &total.to_string())],
        )
    }

    pub fn quiz_questions(&self, count: usize) -> String {
        fill(self.quiz_questions, &[("count", &count.to_string())])
    }

    pub fn discussion_questions(&self, count: usize) -> String {
        fill(self.discussion_questions, &[("count", &count.to_string())])
    }

    pub fn by_the_end(&self, content_type: ContentType) -> String {
        fill(
            self.by_the_end,
            &[(
                "contentType",
                &self.content_type_name(content_type).to_lowercase(),
            )],
        )
    }

    pub fn activity(&self, number: usize, title: &str) -> String {
        fill(
            self.activity,
            &[("num", &number.to_string()), ("title", title)],
        )
    }

    pub fn quiz_question(&self, number: usize) -> String {
        fill(self.quiz_question, &[("num", &number.to_string())])
    }

    pub fn quiz_answer(&self, number: usize) -> String {
        fill(self.quiz_answer, &[("num", &number.to_string())])
    }

    pub fn question(&self, text: &str) -> String {
        fill(self.question, &[("text", text)])
    }

    pub fn discussion_question(&self, number: usize) -> String {
        fill(self.discussion_question, &[("num", &number.to_string())])
    }

    pub fn facilitator_guidance(&self, number: usize) -> String {
        fill(self.facilitator_guidance, &[("num", &number.to_string())])
    }

    /// The caption heading the guidance block, i.e. the guidance title up to its first colon.
    pub fn facilitator_guidance_caption(&self) -> String {
        let title = self.facilitator_guidance(0);
        let caption = title.split(':').next().unwrap_or_default();
        format!("{}:", caption)
    }

    pub fn content_type_name(&self, content_type: ContentType) -> &'static str {
        match content_type {
            ContentType::Lecture => self.content_type_names[0],
            ContentType::Tutorial => self.content_type_names[1],
            ContentType::Workshop => self.content_type_names[2],
        }
    }

    pub fn difficulty_name(&self, difficulty_level: DifficultyLevel) -> &'static str {
        match difficulty_level {
            DifficultyLevel::Introductory => self.difficulty_names[0],
            DifficultyLevel::Intermediate => self.difficulty_names[1],
            DifficultyLevel::Advanced => self.difficulty_names[2],
        }
    }

    /// The lesson title as printed in footers, falling back to the localized placeholder.
    pub fn presentation_title<'a>(&self, title: &'a str) -> &'a str {
        if title.trim().is_empty() {
            self.untitled_presentation
        } else {
            title
        }
    }
}
