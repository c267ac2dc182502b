use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::deck::Color;
use crate::error::{ContextError, ErrorKind};

/// Everything about a deck which is not lesson content: slide geometry, the theme,
/// where the output is allowed to be written and how the PDF metadata is stamped.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DeckConfiguration {
    pub geometry: Geometry,
    pub theme: Theme,
    pub output: OutputPolicy,
    /// Unix timestamp (in seconds) used for the PDF creation date, if absent the current time is used.
    pub creation_timestamp: Option<i64>,
}

/// Slide geometry, every length is expressed in inches.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Geometry {
    pub slide_width: f64,
    pub slide_height: f64,
    /// Vertical position of the footer band, content must stay above it.
    pub footer_y: f64,
    pub content_start_y: f64,
    pub main_bullet_indent: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            slide_width: 10.0,
            slide_height: 5.625,
            footer_y: 5.2,
            content_start_y: 1.0,
            main_bullet_indent: 0.5,
        }
    }
}

impl Geometry {
    /// The vertical space an agenda slide offers to its sections and items.
    pub fn agenda_available_height(&self) -> f64 {
        self.footer_y - 1.2
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FooterStyle {
    #[default]
    Modern,
    Classic,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub use_gradients: bool,
    pub corner_accent: bool,
    pub content_box_shadow: bool,
    pub modern_bullets: bool,
    pub footer_style: FooterStyle,
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            use_gradients: true,
            corner_accent: true,
            content_box_shadow: true,
            modern_bullets: true,
            footer_style: FooterStyle::Modern,
            palette: Palette::default(),
        }
    }
}

/// The named colors used by the section builders.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    pub primary: Color,
    pub primary_dark: Color,
    pub primary_light: Color,
    pub text: Color,
    pub text_light: Color,
    pub text_muted: Color,
    pub dark: Color,
    pub dark_alt: Color,
    pub light: Color,
    pub light_alt: Color,
    pub background: Color,
    pub accent1: Color,
    pub accent2: Color,
    pub accent3: Color,
    pub royal_blue: Color,
    pub emerald: Color,
    pub medium_purple: Color,
    pub activity_blue: Color,
    pub activity_purple: Color,
    pub activity_green: Color,
    pub activity_orange: Color,
    pub success: Color,
    pub warning: Color,
    pub gradient_start: Color,
    pub gradient_end: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            primary: Color::rgb(0x00, 0x71, 0xC5),
            primary_dark: Color::rgb(0x00, 0x3C, 0x71),
            primary_light: Color::rgb(0x7F, 0xB8, 0xE6),
            text: Color::rgb(0x2D, 0x37, 0x48),
            text_light: Color::rgb(0xFF, 0xFF, 0xFF),
            text_muted: Color::rgb(0x71, 0x80, 0x96),
            dark: Color::rgb(0x1A, 0x20, 0x2C),
            dark_alt: Color::rgb(0x2D, 0x37, 0x48),
            light: Color::rgb(0xED, 0xF2, 0xF7),
            light_alt: Color::rgb(0xF7, 0xFA, 0xFC),
            background: Color::rgb(0xFF, 0xFF, 0xFF),
            accent1: Color::rgb(0x00, 0xC7, 0xFD),
            accent2: Color::rgb(0xFF, 0xA5, 0x00),
            accent3: Color::rgb(0x8B, 0xC3, 0x4A),
            royal_blue: Color::rgb(0x41, 0x69, 0xE1),
            emerald: Color::rgb(0x10, 0xB9, 0x81),
            medium_purple: Color::rgb(0x93, 0x70, 0xDB),
            activity_blue: Color::rgb(0x25, 0x63, 0xEB),
            activity_purple: Color::rgb(0x7C, 0x3A, 0xED),
            activity_green: Color::rgb(0x05, 0x96, 0x69),
            activity_orange: Color::rgb(0xF9, 0x73, 0x16),
            success: Color::rgb(0x22, 0xC5, 0x5E),
            warning: Color::rgb(0xFA, 0xCC, 0x15),
            gradient_start: Color::rgb(0x00, 0x3C, 0x71),
            gradient_end: Color::rgb(0x00, 0x71, 0xC5),
        }
    }
}

/// The directories a deck may be written to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputPolicy {
    /// Designated output directory, relative paths are resolved against the working directory.
    pub output_directory: PathBuf,
    /// Whether the platform temporary directory is also an accepted destination.
    pub allow_temp_directory: bool,
}

impl Default for OutputPolicy {
    fn default() -> Self {
        OutputPolicy {
            output_directory: PathBuf::from("output"),
            allow_temp_directory: true,
        }
    }
}

impl DeckConfiguration {
    pub fn from_path(deck_configuration_file_path: &Path) -> Result<Self, ContextError> {
        let configuration_file_contents = std::fs::read_to_string(deck_configuration_file_path)
            .map_err(|error| {
                ContextError::with_error(
                    ErrorKind::Configuration,
                    format!(
                        "Failed to read the configuration file {:?}",
                        deck_configuration_file_path
                    ),
                    &error,
                )
            })?;
        let configuration: DeckConfiguration = serde_json::from_str(&configuration_file_contents)
            .map_err(|error| {
                ContextError::with_error(
                    ErrorKind::Configuration,
                    format!(
                        "Failed to parse the configuration file {:?}",
                        deck_configuration_file_path
                    ),
                    &error,
                )
            })?;

        if configuration.geometry.footer_y <= 1.2
            || configuration.geometry.footer_y > configuration.geometry.slide_height
        {
            return Err(ContextError::with_context(
                ErrorKind::Configuration,
                format!(
                    "The footer position {} must lie between 1.2 and the slide height {}",
                    configuration.geometry.footer_y, configuration.geometry.slide_height
                ),
            ));
        }

        Ok(configuration)
    }

    /// The roots under which an output file is accepted, in their absolute form.
    pub fn allowed_output_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::new();
        let output_directory = &self.output.output_directory;
        if output_directory.is_absolute() {
            roots.push(output_directory.clone());
        } else if let Ok(working_directory) = std::env::current_dir() {
            roots.push(working_directory.join(output_directory));
        }
        if self.output.allow_temp_directory {
            roots.push(std::env::temp_dir());
        }
        roots
    }
}
