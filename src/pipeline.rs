//! Pipeline – ties together config resolution, word selection, layout and
//! rendering, one group at a time.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{load_word_groups, merge, CardConfig, WordGroup};
use crate::error::Result;
use crate::fonts::{FontData, FontManager};
use crate::layout::{build_dot_deck, build_word_deck};
use crate::layout_config::DeckLayout;
use crate::render::render_pdf;
use crate::words::{select_words, SeenWords};

/// What processing one group produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub name: String,
    /// `None` when the group had no cards and no file was written.
    pub output: Option<PathBuf>,
    /// Words drawn, in page order. Empty for dot cards.
    pub words: Vec<String>,
    pub pages: usize,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub groups: Vec<GroupReport>,
    pub total_words: usize,
    pub total_pages: usize,
    pub files_written: usize,
    /// `ceil(total_words / words_per_sheet)`, `None` when words per sheet is 0.
    pub expected_sheets: Option<usize>,
}

/// Process one group and return its report with the updated seen set.
pub fn process_group(
    group: &WordGroup,
    defaults: &CardConfig,
    fonts: &mut FontManager,
    mut seen: SeenWords,
) -> Result<(GroupReport, SeenWords)> {
    let name = group.name.as_str();
    let config = merge(defaults, &group.overrides, name)?;
    log::debug!("Resolved config for '{name}': {config:?}");

    if let Some(font_file) = &config.font_file {
        fonts.register_font_file(&config.font_name, font_file)?;
    }
    let font = fonts.get(&config.font_name)?;
    std::fs::create_dir_all(&config.output_dir)?;

    let deck = if config.math {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        build_dot_deck(name, &config, &mut rng)
    } else {
        let selection = select_words(&group.words, &seen, config.allow_repeated);
        if !selection.repeated.is_empty() {
            log::warn!(
                "Ignored {} repeated word(s) in '{name}': {:?}",
                selection.repeated.len(),
                selection.repeated
            );
        }
        if !selection.already_seen.is_empty() {
            log::warn!(
                "Ignored {} already seen word(s) in '{name}': {:?}",
                selection.already_seen.len(),
                selection.already_seen
            );
        }
        warn_uneven_sheet(name, selection.words.len(), config.words_per_sheet);
        build_word_deck(name, &selection.words, &config, &font)
    };

    let words: Vec<String> = deck.words().map(str::to_string).collect();
    let output = write_deck(&deck, &config.output_path(name), &font)?;
    seen.extend(words.iter().cloned());

    let report = GroupReport {
        name: name.to_string(),
        output,
        pages: deck.pages.len(),
        words,
    };
    Ok((report, seen))
}

fn warn_uneven_sheet(group: &str, words: usize, words_per_sheet: usize) {
    if words_per_sheet == 0 {
        return;
    }
    let remainder = words % words_per_sheet;
    if remainder != 0 {
        log::warn!(
            "Group '{group}' has less words than ideal for paper usage ({words_per_sheet}), missing {} words",
            words_per_sheet - remainder
        );
    }
}

fn write_deck(deck: &DeckLayout, path: &Path, font: &FontData) -> Result<Option<PathBuf>> {
    if deck.pages.is_empty() {
        log::warn!("No cards for '{}', skipped writing '{}'.", deck.title, path.display());
        return Ok(None);
    }
    log::info!(
        "Writing {:03} cards into '{}'.",
        deck.pages.len(),
        path.display()
    );
    let bytes = render_pdf(deck, font)?;
    std::fs::write(path, bytes)?;
    Ok(Some(path.to_path_buf()))
}

/// Process all groups in order, threading the seen-words set through them.
pub fn run(groups: &[WordGroup], defaults: &CardConfig) -> Result<RunSummary> {
    let mut fonts = FontManager::new();
    let mut seen = SeenWords::new();
    let mut summary = RunSummary::default();

    for group in groups {
        let (report, next_seen) = process_group(group, defaults, &mut fonts, seen)?;
        seen = next_seen;
        summary.total_words += report.words.len();
        summary.total_pages += report.pages;
        if report.output.is_some() {
            summary.files_written += 1;
        }
        summary.groups.push(report);
    }

    if defaults.words_per_sheet > 0 {
        summary.expected_sheets = Some(summary.total_words.div_ceil(defaults.words_per_sheet));
    }
    log::debug!("{} distinct words seen in this run", seen.len());
    match summary.expected_sheets {
        Some(sheets) => log::info!(
            "Wrote {} words on {} pages into {} files. Expect to use near {sheets} sheets.",
            summary.total_words,
            summary.total_pages,
            summary.files_written
        ),
        None => log::info!(
            "Wrote {} words on {} pages into {} files.",
            summary.total_words,
            summary.total_pages,
            summary.files_written
        ),
    }
    Ok(summary)
}

/// Load a word list file and process every group in it.
pub fn run_file(path: &Path, defaults: &CardConfig) -> Result<RunSummary> {
    let groups = load_word_groups(path)?;
    run(&groups, defaults)
}
