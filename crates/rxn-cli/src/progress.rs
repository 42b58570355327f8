use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};

/// Progress over input files. Hidden when stderr is not a terminal.
pub struct FileProgress {
    bar: ProgressBar,
}

impl FileProgress {
    pub fn new(total: usize) -> Self {
        let bar = if io::stderr().is_terminal() {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::with_template(
            "  {spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }

    pub fn start(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    pub fn advance(&self) {
        self.bar.inc(1);
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
