use std::fmt::Write;
use std::sync::Mutex;
use std::time::Duration;

use booru_common::Booru;
use booru_core::progress::ProgressListener;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};

const PROGRESS_CHARS: &str = "━━";

struct BarTemplates {
    pub main: &'static str,
}

impl BarTemplates {
    /// Returns special-themed progress bar templates for each variant
    #[inline]
    pub fn new(imageboard: Booru) -> Self {
        match imageboard {
            Booru::Danbooru => Self {
                main: "{prefix:.bold} {spinner:.blue.bold} {elapsed_precise:.bold} {wide_bar:.blue/white.dim} {percent:.bold}  {pos:.blue} (eta. {eta})",
            },
            Booru::Gelbooru => Self {
                main: "{prefix:.bold} {spinner:.red.bold} {elapsed_precise:.bold} {wide_bar:.red/white.dim} {percent:.bold}  {pos:.bold} (eta. {eta})",
            },
            Booru::Yandere | Booru::Konachan => Self::default(),
        }
    }
}

impl Default for BarTemplates {
    fn default() -> Self {
        Self {
            main: "{prefix:.bold} {spinner:.green.bold} {elapsed_precise:.bold} {wide_bar:.green/white.dim} {percent:.bold}  {pos:.green} (eta. {eta:.blue})",
        }
    }
}

/// Handles CLI progress display using `indicatif`.
///
/// Each imageboard gets its own bar, styled after it, stacked under the previous ones.
#[derive(Debug)]
pub struct IndicatifProgressHandler {
    multi_pb: MultiProgress,
    current: Mutex<Option<ProgressBar>>,
}

impl IndicatifProgressHandler {
    pub fn new(hidden: bool) -> Self {
        let target = if hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };

        Self {
            multi_pb: MultiProgress::with_draw_target(target),
            current: Mutex::new(None),
        }
    }

    fn with_current(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.current.lock() {
            if let Some(bar) = guard.as_ref() {
                f(bar);
            }
        }
    }
}

impl ProgressListener for IndicatifProgressHandler {
    fn begin_batch(&self, booru: Booru, total: u64) {
        let template = BarTemplates::new(booru);
        let bar = ProgressBar::new(total)
            .with_style(master_progress_style(&template))
            .with_prefix(booru.pretty_name());
        let bar = self.multi_pb.add(bar);
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.current.lock() {
            *guard = Some(bar);
        }
    }

    fn main_tick(&self) {
        self.with_current(|bar| bar.inc(1));
    }

    fn main_done(&self) {
        self.with_current(ProgressBar::finish);
    }
}

fn master_progress_style(templates: &BarTemplates) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(templates.main)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("pos", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{}/{}", state.pos(), state.len().unwrap_or_default());
        })
        .with_key("percent", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{:>3.0}%", state.fraction() * 100_f32);
        })
        .progress_chars(PROGRESS_CHARS)
}
