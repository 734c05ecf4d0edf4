use ratatui::Frame;

use crate::app::{App, View};
use crate::ui::stats::render_stats;

/// A UI screen boundary: responsible for drawing one view of the app
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// The game itself, drawn by the `App` widget
pub struct PlayScreen;

impl Screen for PlayScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

pub struct StatsScreen;

impl Screen for StatsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_stats(app, f);
    }
}

/// Helper to construct the screen for the current view
pub fn current_screen(view: View) -> Box<dyn Screen> {
    match view {
        View::Play => Box::new(PlayScreen),
        View::Stats => Box::new(StatsScreen),
    }
}
