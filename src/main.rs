//! flashcards – Glenn Doman flash card generator.
//!
//! Usage:
//!   flashcards words.yml [--font-size 250] [--output-dir out] ...
//!
//! Every root key of the word list is a group and becomes `<output-dir>/<group>.pdf`.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use flashcards::color::CardColor;
use flashcards::{run_file, CardConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Generate Glenn Doman PDF files for words.", long_about = None)]
struct CliArguments {
    /// YAML or JSON file with words. Each root key is a group, used as the output file name.
    #[arg(value_name = "FILE")]
    file: PathBuf,
    #[arg(short = 's', long, default_value_t = 250.0, help = "Font size")]
    font_size: f32,
    #[arg(short = 'n', long, default_value = "Helvetica", help = "Font name")]
    font_name: String,
    #[arg(short = 'f', long, help = "Font file that matches a custom font name")]
    font_file: Option<PathBuf>,
    #[arg(
        short = 'c',
        long,
        default_value = "0,100,100,0",
        help = "Font color in hexadecimal (eg. #ff0000) or in CMYK (eg. 0,100,100,0)"
    )]
    font_color: CardColor,
    #[arg(short = 'W', long, default_value_t = 440.0, help = "Page width in mm")]
    page_width: f32,
    #[arg(short = 'H', long, default_value_t = 99.0, help = "Page height in mm")]
    page_height: f32,
    #[arg(
        short = 'r',
        long,
        default_value_t = 0.95,
        help = "Max ratio between text width and page width before a word is reduced or skipped"
    )]
    max_text_width_ratio: f32,
    #[arg(short = 'o', long, default_value = "out", help = "Directory where the PDFs are written")]
    output_dir: PathBuf,
    #[arg(
        short = 'w',
        long,
        default_value_t = 3,
        help = "Cards per printed sheet, used to warn about wasted paper (0 disables)"
    )]
    words_per_sheet: usize,
    #[arg(short = 'a', long, help = "Allow repeated words")]
    allow_repeated: bool,
    #[arg(
        short = 'd',
        long,
        help = "Skip words larger than the page instead of reducing them to fit"
    )]
    disable_reduce_to_fit: bool,
    #[arg(long, help = "Seed for reproducible dot cards")]
    seed: Option<u64>,
}

impl From<CliArguments> for CardConfig {
    fn from(args: CliArguments) -> Self {
        Self {
            font_size: args.font_size,
            font_name: args.font_name,
            font_file: args.font_file,
            font_color: args.font_color,
            page_width: args.page_width,
            page_height: args.page_height,
            max_text_width_ratio: args.max_text_width_ratio,
            output_dir: args.output_dir,
            words_per_sheet: args.words_per_sheet,
            allow_repeated: args.allow_repeated,
            disable_reduce_to_fit: args.disable_reduce_to_fit,
            seed: args.seed,
            ..CardConfig::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arguments = CliArguments::parse();
    log::debug!("{:?}", arguments);
    let file = arguments.file.clone();
    let defaults = CardConfig::from(arguments);

    if let Err(error) = run_file(&file, &defaults) {
        log::error!("{error}");
        process::exit(1);
    }
}
