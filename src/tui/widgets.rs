//! TUI widget rendering: search form, result cards, notices, loading
//! spinner, and the decorative sparkle row.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::book::BookRecord;
use crate::dispatch::Severity;

use super::pane::ResultsPane;
use super::{Focus, SPARKLE_COUNT};

/// Rows a rendered card occupies, border included.
const CARD_HEIGHT: u16 = 7;

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

// ---------------------------------------------------------------------------
// Sparkles
// ---------------------------------------------------------------------------

/// A passive decorative particle: a column position plus animation timing.
/// Purely cosmetic; nothing else reads these.
#[derive(Debug, Clone)]
pub struct Sparkle {
    /// Horizontal position as a fraction of the width.
    pub column: f64,
    /// Seconds before the first appearance.
    pub delay: f64,
    /// Blink cycle length in seconds.
    pub period: f64,
}

/// Seed the fixed set of sparkles with randomized position and timing.
pub fn seed_sparkles() -> Vec<Sparkle> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..SPARKLE_COUNT)
        .map(|_| Sparkle {
            column: rng.gen_range(0.0..1.0),
            delay: rng.gen_range(0.0..6.0),
            period: rng.gen_range(4.0..8.0),
        })
        .collect()
}

fn sparkle_row(sparkles: &[Sparkle], elapsed: f64, width: u16) -> Line<'static> {
    let mut cells = vec![' '; width as usize];
    for sparkle in sparkles {
        let phase = (elapsed + sparkle.delay) % sparkle.period;
        if phase < sparkle.period / 2.0 {
            let col = ((sparkle.column * f64::from(width)) as usize).min(cells.len().saturating_sub(1));
            if let Some(cell) = cells.get_mut(col) {
                *cell = '✦';
            }
        }
    }
    Line::from(Span::styled(
        cells.into_iter().collect::<String>(),
        Style::default().fg(Color::Magenta),
    ))
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Snapshot of the form controls for one draw.
pub struct FormView<'a> {
    pub search_input: &'a str,
    pub title_input: &'a str,
    pub genres: &'a [String],
    pub genre_selected: usize,
    pub focus: Focus,
}

fn input_box<'a>(title: &'a str, content: &'a str, focused: bool) -> Paragraph<'a> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    )
}

fn render_form(frame: &mut Frame, area: Rect, form: &FormView) {
    let [search_area, genre_area, title_area] = Layout::horizontal([
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(2),
    ])
    .areas(area);

    frame.render_widget(
        input_box(" Search ", form.search_input, form.focus == Focus::Search),
        search_area,
    );

    let genre = form
        .genres
        .get(form.genre_selected)
        .map(String::as_str)
        .unwrap_or("All Genres");
    frame.render_widget(
        input_box(" Genre ◂ ▸ ", genre, form.focus == Focus::Genre),
        genre_area,
    );

    frame.render_widget(
        input_box(" Favorite book ", form.title_input, form.focus == Focus::Title),
        title_area,
    );
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Render one book as a bordered card.
fn render_card(frame: &mut Frame, area: Rect, book: &BookRecord) {
    let stars = "★".repeat(book.stars());
    let lines = vec![
        Line::from(Span::styled(
            format!("by {}", book.author),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            book.genre.clone(),
            Style::default().fg(Color::Green),
        )),
        Line::from(vec![
            Span::styled(stars, Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}", book.rating_display())),
        ]),
        Line::from(Span::raw(book.summary.clone())),
    ];
    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(Span::styled(
            format!(" {} ", book.title),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    frame.render_widget(card, area);
}

fn render_notice(frame: &mut Frame, area: Rect, severity: Severity, text: &str) {
    let border_color = match severity {
        Severity::Error => Color::Red,
        Severity::Info => Color::Yellow,
    };
    let notice = Paragraph::new(text)
        .centered()
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    frame.render_widget(notice, area);
}

fn render_results(frame: &mut Frame, area: Rect, pane: &ResultsPane) {
    if let Some(notice) = pane.notice() {
        let [notice_area] = Layout::vertical([Constraint::Length(3)]).areas(area);
        render_notice(frame, notice_area, notice.severity, &notice.text);
        return;
    }
    if !pane.is_visible() {
        return;
    }

    let [caption_area, cards_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            pane.caption().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        caption_area,
    );

    let mut y = cards_area.y;
    for book in pane.books().iter().skip(pane.scroll()) {
        if y + CARD_HEIGHT > cards_area.y + cards_area.height {
            break;
        }
        let card_area = Rect::new(cards_area.x, y, cards_area.width, CARD_HEIGHT);
        render_card(frame, card_area, book);
        y += CARD_HEIGHT;
    }
}

// ---------------------------------------------------------------------------
// Main layout
// ---------------------------------------------------------------------------

pub fn render(
    frame: &mut Frame,
    form: &FormView,
    pane: &ResultsPane,
    loading: bool,
    sparkles: &[Sparkle],
    elapsed: f64,
) {
    let [header_area, sparkle_area, form_area, results_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    // Header.
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " kitabu ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" :: book discovery "),
    ]));
    frame.render_widget(header, header_area);

    frame.render_widget(
        Paragraph::new(sparkle_row(sparkles, elapsed, sparkle_area.width)),
        sparkle_area,
    );

    render_form(frame, form_area, form);
    render_results(frame, results_area, pane);

    // Status bar with the loading spinner and key hints.
    let spinner = if loading {
        let frame_idx = (elapsed * 8.0) as usize % SPINNER_FRAMES.len();
        format!(" {} loading ", SPINNER_FRAMES[frame_idx])
    } else {
        String::new()
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Yellow)),
        Span::styled(
            " tab: focus | enter: go | ◂ ▸: genre | ^T top | ^E romance | ^F fantasy | ^R random | ↑↓ scroll | esc: quit ",
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(status, status_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_the_fixed_sparkle_count() {
        let sparkles = seed_sparkles();
        assert_eq!(sparkles.len(), SPARKLE_COUNT);
        for sparkle in &sparkles {
            assert!((0.0..1.0).contains(&sparkle.column));
            assert!((0.0..6.0).contains(&sparkle.delay));
            assert!((4.0..8.0).contains(&sparkle.period));
        }
    }

    #[test]
    fn sparkle_row_fits_width() {
        let sparkles = seed_sparkles();
        let line = sparkle_row(&sparkles, 3.0, 40);
        assert_eq!(line.width(), 40);
    }
}
