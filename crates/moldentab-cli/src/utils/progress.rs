use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use moldentab::engine::progress::{Progress, ProgressCallback};
use std::fmt::Write;
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;

/// Renders tabulator progress events as a spinner per phase and a bar per task.
///
/// `ProgressBar` is shared state behind an `Arc`, so the callback can be driven from
/// tabulation workers.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: ProgressBar,
}

impl CliProgressHandler {
    pub fn new(visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let pb = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        pb.finish_and_clear();
        Self { pb }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();
        Box::new(move |progress: Progress| apply(&pb, progress))
    }

    /// Clears whatever is left of the last bar before regular output is printed.
    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }
}

fn apply(pb: &ProgressBar, progress: Progress) {
    match progress {
        Progress::PhaseStart { name } => {
            pb.reset();
            pb.set_length(0);
            pb.set_style(spinner_style());
            pb.set_message(name);
            pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::PhaseFinish => {
            pb.disable_steady_tick();
            let name = pb.message();
            pb.finish_with_message(format!("✓ {}", name));
        }
        Progress::TaskStart { total_steps } => {
            pb.disable_steady_tick();
            pb.set_position(0);
            pb.set_length(total_steps);
            pb.set_style(bar_style());
        }
        Progress::TaskIncrement => pb.inc(1),
        Progress::TaskFinish => {
            if let Some(len) = pb.length() {
                pb.set_position(len);
            }
        }
        Progress::Message(msg) => pb.println(format!("  {}", msg)),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} atoms ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
        })
        .progress_chars("##-")
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new(true)
    }
}
