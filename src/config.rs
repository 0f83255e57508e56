//! Card configuration and word list loading.
//!
//! A run starts from one [`CardConfig`] built from the command line. Each group
//! in the word list may override any of its fields; [`merge`] produces the
//! resolved config for that group.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::color::{parse_color, CardColor, DEFAULT_COLOR};
use crate::error::{FlashcardError, Result};
use crate::layout_config::MM_TO_PT;

/// Resolved settings for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct CardConfig {
    pub font_size: f32,
    pub font_name: String,
    pub font_file: Option<PathBuf>,
    pub font_color: CardColor,
    /// Page width in millimetres.
    pub page_width: f32,
    /// Page height in millimetres.
    pub page_height: f32,
    /// Max ratio between text width and page width before the word is reduced or skipped.
    pub max_text_width_ratio: f32,
    pub output_dir: PathBuf,
    /// Cards per printed sheet, 0 disables the paper usage warning.
    pub words_per_sheet: usize,
    pub allow_repeated: bool,
    pub disable_reduce_to_fit: bool,
    /// Draw dot cards instead of words.
    pub math: bool,
    /// Minimum distance in points between dot centers.
    pub min_dot_distance: f32,
    /// Dot cards are drawn for 1 up to this many dots.
    pub max_dots: usize,
    /// Consecutive rejected candidates after which dot placement gives up.
    pub max_placement_attempts: u32,
    pub seed: Option<u64>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            font_size: 250.0,
            font_name: "Helvetica".to_string(),
            font_file: None,
            font_color: DEFAULT_COLOR,
            // A3 width, a third of A3 height.
            page_width: 440.0,
            page_height: 99.0,
            max_text_width_ratio: 0.95,
            output_dir: PathBuf::from("out"),
            words_per_sheet: 3,
            allow_repeated: false,
            disable_reduce_to_fit: false,
            math: false,
            min_dot_distance: 45.0,
            max_dots: 100,
            max_placement_attempts: 100_000,
            seed: None,
        }
    }
}

impl CardConfig {
    pub fn page_width_pt(&self) -> f32 {
        self.page_width * MM_TO_PT
    }

    pub fn page_height_pt(&self) -> f32 {
        self.page_height * MM_TO_PT
    }

    /// Output file of a group.
    pub fn output_path(&self, group: &str) -> PathBuf {
        self.output_dir.join(format!("{group}.pdf"))
    }
}

/// Per-group overrides. Keys outside this set are rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupOverrides {
    pub font_size: Option<f32>,
    pub font_name: Option<String>,
    pub font_file: Option<PathBuf>,
    pub font_color: Option<String>,
    pub page_width: Option<f32>,
    pub page_height: Option<f32>,
    #[serde(rename = "max_allowed_text_width_ratio", alias = "max_text_width_ratio")]
    pub max_text_width_ratio: Option<f32>,
    pub output_dir: Option<PathBuf>,
    pub words_per_sheet: Option<usize>,
    pub allow_repeated: Option<bool>,
    pub disable_reduce_to_fit: Option<bool>,
    pub math: Option<bool>,
    pub min_dot_distance: Option<f32>,
    pub max_dots: Option<usize>,
    pub max_placement_attempts: Option<u32>,
    pub seed: Option<u64>,
}

/// Apply a group's overrides on top of the run defaults and validate the result.
pub fn merge(defaults: &CardConfig, overrides: &GroupOverrides, group: &str) -> Result<CardConfig> {
    let mut config = defaults.clone();

    macro_rules! take {
        ($($field:ident),* $(,)?) => {
            $(if let Some(value) = &overrides.$field {
                config.$field = value.clone();
            })*
        };
    }
    take!(
        font_size,
        font_name,
        page_width,
        page_height,
        max_text_width_ratio,
        output_dir,
        words_per_sheet,
        allow_repeated,
        disable_reduce_to_fit,
        math,
        min_dot_distance,
        max_dots,
        max_placement_attempts,
    );
    if let Some(file) = &overrides.font_file {
        config.font_file = Some(file.clone());
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(color) = &overrides.font_color {
        config.font_color = parse_color(color)?;
    }

    validate(&config, group)?;
    Ok(config)
}

fn validate(config: &CardConfig, group: &str) -> Result<()> {
    let invalid = |message: String| -> Result<()> {
        Err(FlashcardError::Config {
            group: group.to_string(),
            message,
        })
    };
    let positive = |v: f32| v.is_finite() && v > 0.0;

    if !positive(config.font_size) {
        return invalid(format!("font size must be positive, got {}", config.font_size));
    }
    if !positive(config.page_width) || !positive(config.page_height) {
        return invalid(format!(
            "page size must be positive, got {}x{} mm",
            config.page_width, config.page_height
        ));
    }
    if !positive(config.max_text_width_ratio) || config.max_text_width_ratio > 1.0 {
        return invalid(format!(
            "max text width ratio must be in (0, 1], got {}",
            config.max_text_width_ratio
        ));
    }
    if !config.min_dot_distance.is_finite() || config.min_dot_distance < 0.0 {
        return invalid(format!(
            "minimum dot distance must not be negative, got {}",
            config.min_dot_distance
        ));
    }
    if config.max_placement_attempts == 0 {
        return invalid("max placement attempts must be at least 1".to_string());
    }
    Ok(())
}

/// One named group of the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct WordGroup {
    pub name: String,
    pub words: Vec<String>,
    pub overrides: GroupOverrides,
}

/// Read a YAML or JSON word list. Groups come back sorted by name.
///
/// The root must be a mapping from group name to either a list of words or a
/// mapping with a `words` key plus any [`GroupOverrides`] keys.
pub fn load_word_groups(path: &Path) -> Result<Vec<WordGroup>> {
    if !path.is_file() {
        return Err(FlashcardError::InputNotFound(path.to_path_buf()));
    }
    let source = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    parse_word_groups(&source, is_json).map_err(|message| FlashcardError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse word list text, YAML unless `is_json`.
pub fn parse_word_groups(source: &str, is_json: bool) -> std::result::Result<Vec<WordGroup>, String> {
    let root: BTreeMap<String, Value> = if is_json {
        serde_json::from_str(source).map_err(|e| e.to_string())?
    } else {
        serde_yaml::from_str(source).map_err(|e| e.to_string())?
    };

    root.into_iter()
        .map(|(name, value)| parse_group(name, value))
        .collect()
}

fn parse_group(name: String, value: Value) -> std::result::Result<WordGroup, String> {
    let (words, overrides) = match value {
        Value::Null => (Vec::new(), GroupOverrides::default()),
        Value::Array(items) => (items, GroupOverrides::default()),
        Value::Object(mut map) => {
            let words = match map.remove("words") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(format!("group '{name}': 'words' must be a list, got {other}"))
                }
            };
            let overrides: GroupOverrides = serde_json::from_value(Value::Object(map))
                .map_err(|e| format!("group '{name}': {e}"))?;
            (words, overrides)
        }
        other => {
            return Err(format!(
                "group '{name}' must be a list of words or a mapping, got {other}"
            ))
        }
    };

    let words = words
        .into_iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(Ok(s)),
            Value::Number(n) => Some(Ok(n.to_string())),
            Value::Bool(b) => Some(Ok(b.to_string())),
            other => Some(Err(format!("group '{name}': word {other} is not text"))),
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(WordGroup {
        name,
        words,
        overrides,
    })
}
