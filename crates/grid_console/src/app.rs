use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use grid_form::{FormContainer, RenderedForm, RulesModal, Track, ViewMode, ViewSelector};
use tracing::{debug, info};

use crate::draw;
use crate::theme::Theme;
use crate::tui::Tui;

const TICK: Duration = Duration::from_millis(250);

pub struct App {
    pub title: String,
    form: FormContainer,
    pub rendered: RenderedForm,
    pub selector: ViewSelector,
    pub modal: RulesModal,
    /// Index into the visual rows.
    pub focus: usize,
    pub status: Option<String>,
    pub theme: Theme,
    pub should_quit: bool,
}

impl App {
    pub fn new(title: impl Into<String>, form: FormContainer) -> Self {
        let rendered = form.render();
        let selector = ViewSelector::new(rendered.view_mode)
            .on_change(|mode| info!(%mode, "view mode switched"));
        let theme = Theme::for_variant(form.config().color_variant);
        Self {
            title: title.into(),
            form,
            rendered,
            selector,
            modal: RulesModal::new(),
            focus: 0,
            status: None,
            theme,
            should_quit: false,
        }
    }

    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        tui.enter()?;
        while !self.should_quit {
            tui.terminal.draw(|frame| draw::draw(frame, self))?;
            if !event::poll(TICK)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Resize(w, h) => debug!(w, h, "terminal resized"),
                _ => {}
            }
        }
        tui.exit()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('q')
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return;
        }

        if self.modal.is_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.modal.close();
            }
            return;
        }

        match key.code {
            KeyCode::Char('v') => self.toggle_view(),
            KeyCode::Up | KeyCode::Char('k') => self.focus = self.focus.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.focus = (self.focus + 1).min(self.last_row());
            }
            KeyCode::Enter => self.open_focused_rules(),
            KeyCode::Esc => self.status = None,
            _ => {}
        }
    }

    fn toggle_view(&mut self) {
        let mode = self.selector.toggle();
        self.form.set_view_mode(mode);
        self.rendered = self.form.render();
        self.focus = self.focus.min(self.last_row());
        self.status = Some(format!("{} view", mode.label()));
    }

    fn open_focused_rules(&mut self) {
        let Some(sequence) = self.focused_sequence() else {
            return;
        };
        if self.rendered.view_mode != ViewMode::Detail {
            self.status = Some("Rules are shown in the detail view (press v)".into());
            return;
        }
        match self.rendered.open_rules(sequence) {
            Some(modal) => self.modal = modal,
            None => self.status = Some(format!("Row {sequence} has no rules")),
        }
    }

    pub fn focused_sequence(&self) -> Option<u32> {
        self.rendered.visual_sequence(self.focus)
    }

    fn last_row(&self) -> usize {
        self.rendered.cell_rows.len().saturating_sub(1)
    }

    /// Column tracks of one visual row in the active view mode.
    pub fn column_tracks(&self) -> Vec<Track> {
        let config = self.form.config();
        let label = self.rendered.label_width.clone();
        match self.rendered.view_mode {
            ViewMode::Default => vec![label, Track::Fr(1)],
            ViewMode::Detail => vec![
                config.sequence_column_width.clone(),
                label,
                Track::Fr(1),
                config.rules_column_width.clone(),
            ],
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use grid_form::{FieldSchema, FormConfig, Row, render_schema};
    use pretty_assertions::assert_eq;

    pub(crate) fn sample_app(mode: ViewMode) -> App {
        let fields = vec![
            FieldSchema::new("a", "Name", grid_form::Element::new("input").attr("value", "Kim"))
                .required(true),
            FieldSchema::new("b", "Email", "kim@example.com").rules("Company domain only"),
        ];
        App::new("Contact", render_schema(&fields, FormConfig::default().view_mode(mode)))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn v_toggles_view_mode() {
        let mut app = sample_app(ViewMode::Default);
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.rendered.view_mode, ViewMode::Detail);
        assert_eq!(app.selector.mode(), ViewMode::Detail);
        assert_eq!(app.column_tracks().len(), 4);
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.rendered.view_mode, ViewMode::Default);
        assert_eq!(app.column_tracks(), vec![Track::Px(124), Track::Fr(1)]);
    }

    #[test]
    fn focus_stays_in_bounds() {
        let mut app = sample_app(ViewMode::Detail);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus, 0);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, 1);
        assert_eq!(app.focused_sequence(), Some(2));
    }

    #[test]
    fn enter_opens_rules_only_where_present() {
        let mut app = sample_app(ViewMode::Detail);
        press(&mut app, KeyCode::Enter);
        assert!(!app.modal.is_open());
        assert_eq!(app.status.as_deref(), Some("Row 1 has no rules"));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modal.title(), Some("Email"));

        // navigation is blocked while the modal is open
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus, 1);
        press(&mut app, KeyCode::Esc);
        assert!(!app.modal.is_open());
    }

    #[test]
    fn rules_need_detail_view() {
        let mut app = sample_app(ViewMode::Default);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(!app.modal.is_open());
        assert!(app.status.is_some());
    }

    #[test]
    fn focus_skips_spacer_rows() {
        let form = FormContainer::new(FormConfig::default().view_mode(ViewMode::Detail))
            .row(Row::new().label("A").content("a").rules("ra"))
            .row(Row::new())
            .row(Row::new().label("B").content("b").rules("rb"));
        let mut app = App::new("Spaced", form);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, 1);
        assert_eq!(app.focused_sequence(), Some(3));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modal.title(), Some("B"));
        assert_eq!(app.modal.entry().unwrap().body_text(), "rb");
    }

    #[test]
    fn q_quits_even_with_modal_open() {
        let mut app = sample_app(ViewMode::Detail);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
