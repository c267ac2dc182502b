use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use unicode_normalization::UnicodeNormalization as _;

use crate::error::{ContextError, ErrorKind};

/// The root of a lesson description. All collections default to empty and the scalar fields
/// default to fixed literals, so that every pass over the lesson observes the same defaulted view.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(default = "default_lesson_title", deserialize_with = "text_or_json")]
    pub title: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub difficulty_level: DifficultyLevel,
    #[serde(default)]
    pub slides: Vec<ContentSlide>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub assessment_ideas: Vec<AssessmentIdea>,
    #[serde(default)]
    pub key_terms: Vec<KeyTerm>,
    #[serde(default)]
    pub further_readings: Vec<FurtherReading>,
    #[serde(default, deserialize_with = "texts_or_json")]
    pub learning_outcomes: Vec<String>,
}

impl Default for Lesson {
    fn default() -> Self {
        Lesson {
            title: default_lesson_title(),
            content_type: ContentType::default(),
            difficulty_level: DifficultyLevel::default(),
            slides: Vec::new(),
            activities: Vec::new(),
            assessment_ideas: Vec::new(),
            key_terms: Vec::new(),
            further_readings: Vec::new(),
            learning_outcomes: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Lecture,
    Tutorial,
    Workshop,
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "lecture" => Ok(ContentType::Lecture),
            "tutorial" => Ok(ContentType::Tutorial),
            "workshop" => Ok(ContentType::Workshop),
            _ => Err(format!(
                "unknown content type {:?}, expected one of lecture, tutorial or workshop",
                value
            )),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Introductory,
    #[default]
    Intermediate,
    Advanced,
}

impl std::str::FromStr for DifficultyLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "introductory" => Ok(DifficultyLevel::Introductory),
            "intermediate" => Ok(DifficultyLevel::Intermediate),
            "advanced" => Ok(DifficultyLevel::Advanced),
            _ => Err(format!(
                "unknown difficulty level {:?}, expected one of introductory, intermediate or advanced",
                value
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_case_insensitively(deserializer)
    }
}

impl<'de> Deserialize<'de> for DifficultyLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_case_insensitively(deserializer)
    }
}

/// Reads a string and parses it with `FromStr`, which ignores the letter case.
fn parse_case_insensitively<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr<Err = String>,
{
    let value = String::deserialize(deserializer)?;
    value.parse().map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentSlide {
    #[serde(default = "default_slide_title", deserialize_with = "text_or_json")]
    pub title: String,
    #[serde(default)]
    pub content: Vec<ContentItem>,
    /// Speaker notes, routed to the notes channel and never printed on the slide.
    #[serde(default, deserialize_with = "text_or_json")]
    pub notes: String,
}

/// A line of slide content, either plain text carrying its bullet markers or
/// a structured value which is printed in its compact JSON form.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ContentItem {
    Text(String),
    Structured(serde_json::Value),
}

impl ContentItem {
    pub fn to_text(&self) -> String {
        match self {
            ContentItem::Text(text) => text.clone(),
            ContentItem::Structured(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default = "default_activity_title", deserialize_with = "text_or_json")]
    pub title: String,
    /// Free text which may embed facilitation notes and a learning objective after marker phrases.
    #[serde(default, deserialize_with = "text_or_json")]
    pub description: String,
    #[serde(
        rename = "type",
        default = "default_activity_type",
        deserialize_with = "text_or_json"
    )]
    pub activity_type: String,
    #[serde(default = "default_activity_duration", deserialize_with = "text_or_json")]
    pub duration: String,
    #[serde(default, deserialize_with = "texts_or_json")]
    pub instructions: Vec<String>,
    #[serde(default, deserialize_with = "texts_or_json")]
    pub materials: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentIdea {
    #[serde(
        rename = "type",
        default = "default_assessment_type",
        deserialize_with = "text_or_json"
    )]
    pub idea_type: String,
    #[serde(default)]
    pub example_questions: Vec<Question>,
}

/// The closed set of assessment flavours the deck knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentKind {
    Quiz,
    Discussion,
    Unclassified,
}

impl AssessmentIdea {
    /// Classifies the free-form type, "quiz" takes precedence over "discussion".
    pub fn kind(&self) -> AssessmentKind {
        let idea_type = self.idea_type.to_lowercase();
        if idea_type.contains("quiz") {
            AssessmentKind::Quiz
        } else if idea_type.contains("discussion") {
            AssessmentKind::Discussion
        } else {
            AssessmentKind::Unclassified
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default = "default_question", deserialize_with = "text_or_json")]
    pub question: String,
    #[serde(default, deserialize_with = "texts_or_json")]
    pub options: Vec<String>,
    /// The quiz answer, or the facilitator guidance of a discussion question.
    #[serde(default, deserialize_with = "text_or_json")]
    pub correct_answer: String,
    #[serde(default, deserialize_with = "text_or_json")]
    pub explanation: String,
}

impl Question {
    /// Only questions offering options are rendered as quiz questions.
    pub fn is_quiz_question(&self) -> bool {
        !self.options.is_empty()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyTerm {
    #[serde(default = "default_term", deserialize_with = "text_or_json")]
    pub term: String,
    #[serde(default = "default_definition", deserialize_with = "text_or_json")]
    pub definition: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FurtherReading {
    #[serde(default = "default_reading_title", deserialize_with = "text_or_json")]
    pub title: String,
    #[serde(default = "default_author", deserialize_with = "text_or_json")]
    pub author: String,
    #[serde(default, deserialize_with = "text_or_json")]
    pub reading_description: String,
}

fn default_lesson_title() -> String {
    "Untitled Presentation".into()
}

fn default_slide_title() -> String {
    "Untitled Slide".into()
}

fn default_activity_title() -> String {
    "Untitled Activity".into()
}

fn default_activity_type() -> String {
    "Exercise".into()
}

fn default_activity_duration() -> String {
    "20 minutes".into()
}

fn default_assessment_type() -> String {
    "Assessment".into()
}

fn default_question() -> String {
    "Example question".into()
}

fn default_term() -> String {
    "Untitled Term".into()
}

fn default_definition() -> String {
    "No definition provided.".into()
}

fn default_reading_title() -> String {
    "Untitled Reading".into()
}

fn default_author() -> String {
    "Unknown Author".into()
}

/// Accepts any JSON value for a free-text field, strings are taken as they are
/// while every other value is kept in its compact JSON form.
fn text_or_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_text(value))
}

fn texts_or_json<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values.into_iter().map(value_to_text).collect())
}

fn value_to_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

impl Lesson {
    pub fn from_path(lesson_path: &Path) -> Result<Lesson, ContextError> {
        let lesson_content = std::fs::read_to_string(lesson_path).map_err(|error| {
            ContextError::with_error(
                ErrorKind::Io,
                format!("Unable to read the lesson {:?}", lesson_path),
                &error,
            )
        })?;
        Lesson::from_json_str(&lesson_content)
    }

    pub fn from_json_str(lesson_content: &str) -> Result<Lesson, ContextError> {
        let value: serde_json::Value = serde_json::from_str(lesson_content).map_err(|error| {
            ContextError::with_error(
                ErrorKind::ContentValidation,
                "Unable to parse the lesson JSON",
                &error,
            )
        })?;
        Lesson::from_value(value)
    }

    /// Validates and defaults a raw JSON lesson. Null-valued keys count as absent, a value
    /// of the wrong shape fails with an error naming the offending field.
    pub fn from_value(mut value: serde_json::Value) -> Result<Lesson, ContextError> {
        remove_null_keys(&mut value);
        validate_structure(&value)?;
        let lesson: Lesson = serde_json::from_value(value).map_err(|error| {
            ContextError::with_error(
                ErrorKind::ContentValidation,
                "Unable to interpret the lesson content",
                &error,
            )
        })?;

        Ok(lesson.normalized())
    }

    /// Returns the lesson with every piece of text in Unicode NFC form.
    pub fn normalized(mut self) -> Lesson {
        normalize(&mut self.title);
        for slide in self.slides.iter_mut() {
            normalize(&mut slide.title);
            normalize(&mut slide.notes);
            for item in slide.content.iter_mut() {
                if let ContentItem::Text(text) = item {
                    normalize(text);
                }
            }
        }
        for activity in self.activities.iter_mut() {
            normalize(&mut activity.title);
            normalize(&mut activity.description);
            normalize(&mut activity.activity_type);
            normalize(&mut activity.duration);
            activity.instructions.iter_mut().for_each(normalize);
            activity.materials.iter_mut().for_each(normalize);
        }
        for idea in self.assessment_ideas.iter_mut() {
            normalize(&mut idea.idea_type);
            for question in idea.example_questions.iter_mut() {
                normalize(&mut question.question);
                normalize(&mut question.correct_answer);
                normalize(&mut question.explanation);
                question.options.iter_mut().for_each(normalize);
            }
        }
        for key_term in self.key_terms.iter_mut() {
            normalize(&mut key_term.term);
            normalize(&mut key_term.definition);
        }
        for reading in self.further_readings.iter_mut() {
            normalize(&mut reading.title);
            normalize(&mut reading.author);
            normalize(&mut reading.reading_description);
        }
        self.learning_outcomes.iter_mut().for_each(normalize);
        self
    }

    /// The questions of every quiz-typed idea which offer options, in input order.
    pub fn quiz_questions(&self) -> impl Iterator<Item = (usize, &Question)> {
        self.assessment_ideas
            .iter()
            .filter(|idea| idea.kind() == AssessmentKind::Quiz)
            .flat_map(|idea| {
                idea.example_questions
                    .iter()
                    .enumerate()
                    .filter(|(_, question)| question.is_quiz_question())
            })
    }

    /// The questions of every discussion-typed idea, in input order.
    pub fn discussion_questions(&self) -> impl Iterator<Item = (usize, &Question)> {
        self.assessment_ideas
            .iter()
            .filter(|idea| idea.kind() == AssessmentKind::Discussion)
            .flat_map(|idea| idea.example_questions.iter().enumerate())
    }
}

fn normalize(text: &mut String) {
    *text = text.nfc().collect();
}

fn remove_null_keys(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, value| !value.is_null());
            map.values_mut().for_each(remove_null_keys);
        }
        serde_json::Value::Array(values) => values.iter_mut().for_each(remove_null_keys),
        _ => (),
    }
}

/// The JSON shape a field is expected to have.
#[derive(Clone, Copy)]
enum Shape {
    Object,
    Array,
    String,
}

impl Shape {
    fn matches(self, value: &serde_json::Value) -> bool {
        match self {
            Shape::Object => value.is_object(),
            Shape::Array => value.is_array(),
            Shape::String => value.is_string(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Shape::Object => "an object",
            Shape::Array => "an array",
            Shape::String => "a string",
        }
    }
}

fn describe_value(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn expect_shape(value: &serde_json::Value, shape: Shape, path: &str) -> Result<(), ContextError> {
    if shape.matches(value) {
        Ok(())
    } else {
        Err(ContextError::validation(format!(
            "The field `{}` must be {}, found {}",
            path,
            shape.describe(),
            describe_value(value)
        )))
    }
}

/// Checks the field (if present) of an object against the expected shape.
fn expect_field(
    object: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    shape: Shape,
    parent_path: &str,
) -> Result<(), ContextError> {
    match object.get(field) {
        Some(value) => expect_shape(value, shape, &join_path(parent_path, field)),
        None => Ok(()),
    }
}

fn join_path(parent_path: &str, field: &str) -> String {
    if parent_path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent_path, field)
    }
}

/// Applies the check to every element of the array field, if the field is present.
fn for_each_element(
    object: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    parent_path: &str,
    mut check: impl FnMut(&serde_json::Value, &str) -> Result<(), ContextError>,
) -> Result<(), ContextError> {
    expect_field(object, field, Shape::Array, parent_path)?;
    if let Some(serde_json::Value::Array(elements)) = object.get(field) {
        for (index, element) in elements.iter().enumerate() {
            let element_path = format!("{}[{}]", join_path(parent_path, field), index);
            check(element, &element_path)?;
        }
    }
    Ok(())
}

fn validate_structure(value: &serde_json::Value) -> Result<(), ContextError> {
    let root = value.as_object().ok_or_else(|| {
        ContextError::validation(format!(
            "The lesson must be an object, found {}",
            describe_value(value)
        ))
    })?;
    for enumeration in ["contentType", "difficultyLevel"] {
        expect_field(root, enumeration, Shape::String, "")?;
    }
    expect_field(root, "learningOutcomes", Shape::Array, "")?;

    for_each_element(root, "slides", "", |slide, path| {
        expect_shape(slide, Shape::Object, path)?;
        if let Some(slide) = slide.as_object() {
            expect_field(slide, "content", Shape::Array, path)?;
        }
        Ok(())
    })?;
    for_each_element(root, "activities", "", |activity, path| {
        expect_shape(activity, Shape::Object, path)?;
        if let Some(activity) = activity.as_object() {
            expect_field(activity, "instructions", Shape::Array, path)?;
            expect_field(activity, "materials", Shape::Array, path)?;
        }
        Ok(())
    })?;
    for_each_element(root, "assessmentIdeas", "", |idea, path| {
        expect_shape(idea, Shape::Object, path)?;
        if let Some(idea) = idea.as_object() {
            for_each_element(idea, "exampleQuestions", path, |question, path| {
                expect_shape(question, Shape::Object, path)?;
                if let Some(question) = question.as_object() {
                    expect_field(question, "options", Shape::Array, path)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    })?;
    for_each_element(root, "keyTerms", "", |key_term, path| {
        expect_shape(key_term, Shape::Object, path)
    })?;
    for_each_element(root, "furtherReadings", "", |reading, path| {
        expect_shape(reading, Shape::Object, path)
    })?;

    Ok(())
}
