//! Shell state: which screen is showing and how keys move between them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::config::Config;
use crate::input::{CalcError, Evaluation, FormState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Plot,
}

pub struct App {
    pub config: Config,
    pub form: FormState,
    pub screen: Screen,
    /// Last successful calculation; kept while a notice is open
    pub plot: Option<Evaluation>,
    /// Blocking warning shown over the current screen
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// `autorun` submits the pre-filled form right away.
    pub fn new(config: Config, autorun: bool) -> Self {
        let form = FormState::new(config.form.index.clone(), config.form.radius.clone());
        let mut app = Self {
            config,
            form,
            screen: Screen::Form,
            plot: None,
            notice: None,
            should_quit: false,
        };
        if autorun {
            app.submit();
        }
        app
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.notice.take().is_some() {
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Plot => self.handle_plot_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.clear_field()
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.insert(ch)
            }
            _ => {}
        }
    }

    fn handle_plot_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('e') => {
                if let Some(eval) = &self.plot {
                    self.form.fill(&eval.input);
                }
                self.screen = Screen::Form;
            }
            KeyCode::Char('c') => {
                self.config.plot.color_scheme = self.config.plot.color_scheme.next();
                self.rebuild_scene();
            }
            KeyCode::Char('g') => {
                self.config.plot.show_grid = !self.config.plot.show_grid;
                self.rebuild_scene();
            }
            KeyCode::Char('r') => {
                self.config.plot.show_rings = !self.config.plot.show_rings;
                self.rebuild_scene();
            }
            KeyCode::Char('l') => self.config.plot.show_legend = !self.config.plot.show_legend,
            KeyCode::Right => self.nudge(self.config.plot.index_step, 0.0),
            KeyCode::Left => self.nudge(-self.config.plot.index_step, 0.0),
            KeyCode::Up => self.nudge(0.0, self.config.plot.radius_step),
            KeyCode::Down => self.nudge(0.0, -self.config.plot.radius_step),
            _ => {}
        }
    }

    /// Evaluate the form. Success opens the plot, failure opens a notice
    /// and leaves the form as typed.
    pub fn submit(&mut self) {
        match self.form.submit(&self.config.scene_style()) {
            Ok(eval) => {
                self.plot = Some(eval);
                self.screen = Screen::Plot;
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn nudge(&mut self, d_index: f64, d_radius: f64) {
        let Some(current) = &self.plot else {
            return;
        };
        let index = (current.input.index + d_index).max(0.0);
        let radius = current.input.radius + d_radius;
        debug!("Nudging to index={} radius={}", index, radius);

        match Evaluation::from_values(index, radius, &self.config.scene_style()) {
            Ok(eval) => self.plot = Some(eval),
            Err(e) => self.show_error(&CalcError::from(e)),
        }
    }

    fn rebuild_scene(&mut self) {
        if let Some(current) = &self.plot {
            let (index, radius) = (current.input.index, current.input.radius);
            // Inputs were valid when first computed, so this only restyles
            if let Ok(eval) = Evaluation::from_values(index, radius, &self.config.scene_style()) {
                self.plot = Some(eval);
            }
        }
    }

    fn show_error(&mut self, err: &CalcError) {
        info!("Showing notice: {}", err);
        self.notice = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::PatternInput;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
    }

    fn plotted(index: &str, radius: &str) -> App {
        let mut config = Config::default();
        config.form.index = index.to_string();
        config.form.radius = radius.to_string();
        let app = App::new(config, true);
        assert_eq!(app.screen, Screen::Plot);
        app
    }

    #[test]
    fn typing_and_enter_opens_plot() {
        let mut app = App::new(Config::default(), false);
        type_text(&mut app, "5");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "5");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.screen, Screen::Plot);
        assert!(app.notice.is_none());
        let eval = app.plot.as_ref().unwrap();
        assert_eq!(eval.result.lens_diameter, 5.0);
    }

    #[test]
    fn bad_input_shows_notice_and_keeps_text() {
        let mut app = App::new(Config::default(), false);
        type_text(&mut app, "abc");
        app.handle_key(key(KeyCode::Down));
        type_text(&mut app, "3");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.screen, Screen::Form);
        assert_eq!(app.notice.as_deref(), Some("Path Index must be a number, got 'abc'"));

        // Any key dismisses without editing the form
        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.notice.is_none());
        assert_eq!(app.form.index, "abc");
        assert_eq!(app.form.radius, "3");
        assert!(!app.should_quit);
    }

    #[test]
    fn no_overlap_notice_text() {
        let mut config = Config::default();
        config.form.index = "10".to_string();
        config.form.radius = "3".to_string();
        let app = App::new(config, true);
        assert_eq!(app.screen, Screen::Form);
        assert!(app.notice.unwrap().starts_with("No overlap present in current state!"));
    }

    #[test]
    fn edit_returns_to_filled_form() {
        let mut app = plotted("2", "4");
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.screen, Screen::Form);
        assert_eq!(app.form.index, "2.5");
        assert_eq!(app.form.radius, "4");
    }

    #[test]
    fn arrows_nudge_and_errors_keep_previous_plot() {
        let mut app = plotted("7", "4");
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.plot.as_ref().unwrap().input, PatternInput { index: 7.5, radius: 4.0 });

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.plot.as_ref().unwrap().input.index, 8.0);

        app.handle_key(key(KeyCode::Right));
        assert!(app.notice.is_some());
        assert_eq!(app.plot.as_ref().unwrap().input.index, 8.0);
        assert_eq!(app.screen, Screen::Plot);

        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.plot.as_ref().unwrap().input.radius, 4.5);
    }

    #[test]
    fn index_nudge_stops_at_zero() {
        let mut app = plotted("0.2", "1");
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.plot.as_ref().unwrap().input.index, 0.0);
        assert!(app.notice.is_none());
    }

    #[test]
    fn toggles_restyle_scene() {
        let mut app = plotted("1", "3");
        assert_eq!(app.plot.as_ref().unwrap().scene.circles().count(), 8);
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.plot.as_ref().unwrap().scene.circles().count(), 2);

        app.handle_key(key(KeyCode::Char('g')));
        assert!(!app.plot.as_ref().unwrap().scene.grid);

        let before = app.config.plot.color_scheme;
        app.handle_key(key(KeyCode::Char('c')));
        assert_ne!(app.config.plot.color_scheme, before);
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(Config::default(), false);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit, "q is text on the form");
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = plotted("1", "1");
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
