use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{bright_green, bright_yellow};

/// Single spinner line showing a pipeline whose time values are still moving
pub struct LiveLine {
    pb: ProgressBar,
}

impl LiveLine {
    pub fn start(message: &str) -> Self {
        let pb = create_spinner(bright_yellow(message).to_string());
        Self { pb }
    }

    pub fn update(&self, message: &str) {
        self.pb.set_message(bright_yellow(message).to_string());
    }

    pub fn finish(self, message: &str) {
        self.pb
            .finish_with_message(bright_green(format!("{message} ✓")).to_string());
    }
}

fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
