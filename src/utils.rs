use indicatif::{ProgressBar, ProgressStyle};
use term_size::dimensions;

pub mod fetch;
pub mod files;

pub fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len);

    let term_width = dimensions().map(|(w, _)| w.saturating_sub(2)).unwrap_or(40);
    let bar_width = if term_width > 60 { term_width - 60 } else { 20 };

    let style = ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} {{spinner:.green}} [{{elapsed_precise}}] [{{bar:{bar_width}.cyan/blue}}] {{pos}}/{{len}} ({{eta}})"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");

    pb.set_style(style);
    pb.set_message(message);

    pb
}
