//! Terminal rendering of a rendered form.
//!
//! The host tree is not interpreted as HTML; the cells of each visual row are laid
//! out with the form's own column tracks, converted from pixels to terminal cells.

use grid_form::cells::{SLOT_CONTENT, SLOT_LABEL, SLOT_RULES, SLOT_SEQUENCE};
use grid_form::{CharClass, Element, Node, Track, ViewMode};
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

use crate::app::App;
use crate::theme::Role;
use crate::tui::Frame;

/// Pixels per terminal cell (the narrow character weight).
pub const PX_PER_CELL: u32 = 8;

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 12;

pub fn track_constraint(track: &Track) -> Constraint {
    match track {
        Track::Px(px) => {
            Constraint::Length(u16::try_from(px.div_ceil(PX_PER_CELL)).unwrap_or(u16::MAX))
        }
        Track::Fr(n) => Constraint::Fill(u16::try_from(*n).unwrap_or(u16::MAX)),
        Track::Raw(_) => Constraint::Fill(1),
    }
}

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let [title_area, selector_area, body_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled(app.title.as_str(), app.theme.style(Role::Accent))),
        title_area,
    );
    frame.render_widget(Paragraph::new(selector_line(app)), selector_area);
    draw_rows(frame, app, body_area);

    let help = app.status.clone().unwrap_or_else(|| {
        "v view | Up/Down focus | Enter rules | Esc close | q quit".to_string()
    });
    frame.render_widget(
        Paragraph::new(Span::styled(help, app.theme.style(Role::SubtleText))),
        help_area,
    );

    if app.modal.is_open() {
        draw_rules_modal(frame, app);
    }
}

fn selector_line(app: &App) -> Line<'static> {
    let spans = ViewMode::iter().flat_map(|mode| {
        let label = format!(" {} ", mode.label());
        let span = if mode == app.selector.mode() {
            Span::styled(
                format!("[{label}]"),
                app.theme.style(Role::Accent).add_modifier(Modifier::REVERSED),
            )
        } else {
            Span::styled(format!(" {label} "), app.theme.style(Role::SubtleText))
        };
        [span, Span::raw(" ")]
    });
    Line::from(spans.collect::<Vec<_>>())
}

fn draw_rows(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .border_style(app.theme.style(Role::Border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.rendered.visual_rows();
    let visible = usize::from(inner.height);
    if visible == 0 {
        return;
    }
    let offset = (app.focus + 1).saturating_sub(visible);
    let constraints: Vec<Constraint> = app.column_tracks().iter().map(track_constraint).collect();

    for (line, (index, cells)) in rows.iter().enumerate().skip(offset).take(visible).enumerate() {
        let row_area = Rect {
            y: inner.y + u16::try_from(line).unwrap_or(u16::MAX),
            height: 1,
            ..inner
        };
        if index == app.focus {
            frame.render_widget(Block::default().style(app.theme.style(Role::Selection)), row_area);
        }
        let columns = Layout::horizontal(constraints.clone())
            .spacing(1)
            .split(row_area);
        for (cell, cell_area) in cells.iter().zip(columns.iter()) {
            frame.render_widget(Paragraph::new(cell_line(app, cell, cell_area.width)), *cell_area);
        }
    }
}

fn cell_line(app: &App, cell: &Element, width: u16) -> Line<'static> {
    let text = cell_text(&cell.children);
    match cell.slot() {
        Some(SLOT_SEQUENCE) => Line::styled(text, app.theme.style(Role::SubtleText)),
        Some(SLOT_LABEL) if cell.get_attr("data-required") == Some("true") => {
            let text = text.strip_suffix('*').unwrap_or(&text).to_string();
            Line::from(vec![
                Span::styled(text, app.theme.style(Role::Text)),
                Span::styled(" *", app.theme.style(Role::Required)),
            ])
        }
        Some(SLOT_RULES) => Line::styled(
            truncate(&text, usize::from(width)),
            app.theme.style(Role::Accent),
        ),
        Some(SLOT_LABEL) | Some(SLOT_CONTENT) => Line::styled(text, app.theme.style(Role::Text)),
        _ => Line::default(),
    }
}

/// Plain text of a cell; inputs show their value in brackets.
pub fn cell_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Number(n) => out.push_str(&n.to_string()),
            Node::Fragment(children) => out.push_str(&cell_text(children)),
            Node::Element(el) if el.tag == "input" => {
                out.push('[');
                out.push_str(el.get_attr("value").unwrap_or_default());
                out.push(']');
            }
            Node::Element(el) => out.push_str(&cell_text(&el.children)),
            Node::Row(_) | Node::Empty => {}
        }
    }
    out
}

fn char_cells(c: char) -> usize {
    if CharClass::of(c) == CharClass::Wide { 2 } else { 1 }
}

/// Cut `text` to `width` terminal cells, ending in `…` when shortened.
pub fn truncate(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(char_cells).sum();
    if total <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = char_cells(c);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(c);
    }
    if width > 0 {
        out.push('…');
    }
    out
}

/// Dim everything drawn so far; terminals have no real transparency.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect) {
    frame
        .buffer_mut()
        .set_style(area, Style::default().add_modifier(Modifier::DIM));
}

/// Centered rectangle of a fixed size, clamped to `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x.saturating_add(area.width.saturating_sub(w) / 2),
        y: area.y.saturating_add(area.height.saturating_sub(h) / 2),
        width: w,
        height: h,
    }
}

/// Cleared, rounded, titled popup shell at `area`.
pub fn draw_popup_frame(frame: &mut Frame<'_>, app: &App, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .border_style(app.theme.style(Role::Accent))
        .style(app.theme.style(Role::Text));
    frame.render_widget(block, area);
    area
}

fn draw_rules_modal(frame: &mut Frame<'_>, app: &App) {
    let Some(entry) = app.modal.entry() else {
        return;
    };
    let full = frame.area();
    render_backdrop(frame, full);
    let popup = centered_rect_fixed(full, MODAL_WIDTH, MODAL_HEIGHT);
    draw_popup_frame(frame, app, popup, &entry.title);

    let inner = popup.inner(Margin::new(2, 1));
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    frame.render_widget(
        Paragraph::new(entry.body_text()).wrap(Wrap { trim: false }),
        body,
    );
    frame.render_widget(
        Paragraph::new(Span::styled("Esc to close", app.theme.style(Role::SubtleText))),
        footer,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_app;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn px_tracks_become_cell_lengths() {
        assert_eq!(track_constraint(&Track::Px(124)), Constraint::Length(16));
        assert_eq!(track_constraint(&Track::Px(60)), Constraint::Length(8));
        assert_eq!(track_constraint(&Track::Fr(2)), Constraint::Fill(2));
        assert_eq!(track_constraint(&Track::Raw("auto".into())), Constraint::Fill(1));
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Company domain only", 8), "Company…");
        assert_eq!(truncate("가나다라", 5), "가나…");
    }

    #[test]
    fn default_view_shows_labels_and_values_only() {
        let app = sample_app(ViewMode::Default);
        let lines = screen(&app, 80, 10);
        let name_row = lines.iter().find(|l| l.contains("Name")).unwrap();
        assert!(name_row.contains("[Kim]"));
        assert!(name_row.contains('*'));
        assert!(!lines.iter().any(|l| l.contains("Company")));
    }

    #[test]
    fn detail_view_shows_sequence_and_rules() {
        let app = sample_app(ViewMode::Detail);
        let lines = screen(&app, 80, 10);
        let email_row = lines.iter().find(|l| l.contains("Email")).unwrap();
        assert!(email_row.contains("Company domain only"));
        assert!(email_row.trim_start_matches('│').trim_start().starts_with('2'));
        assert!(lines[1].contains("[ Detail ]"));
    }

    #[test]
    fn modal_overlays_rules_text() {
        let mut app = sample_app(ViewMode::Detail);
        app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        let lines = screen(&app, 80, 16);
        assert!(lines.iter().any(|l| l.contains(" Email ")));
        assert!(lines.iter().any(|l| l.contains("Esc to close")));
    }
}
