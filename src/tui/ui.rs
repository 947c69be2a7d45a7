use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::{Trigger, ViewController, ViewState};
use crate::api::ClassroomSource;
use crate::render::DisplayItem;

const ACCENT: Color = Color::Cyan;
const HEADER_BG: Color = Color::DarkGray;
const SELECTED_BG: Color = Color::Rgb(40, 40, 60);
const DIM: Color = Color::DarkGray;
const BAD: Color = Color::Red;
const WARN: Color = Color::Yellow;
const COURSE_HEADER: Color = Color::Rgb(37, 99, 235);
const SUMMARY_BG: Color = Color::Rgb(55, 55, 65);

/// Frames per backdrop hue; the event loop ticks every 100 ms.
const FRAMES_PER_HUE: u64 = 10;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

// ─── Main render ────────────────────────────────────────────────────────────

pub fn render<S: ClassroomSource>(f: &mut Frame, vc: &mut ViewController<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_navbar(f, vc, chunks[0]);
    render_container(f, vc, chunks[1]);
    render_status_bar(f, vc, chunks[2]);
}

// ─── Navbar ─────────────────────────────────────────────────────────────────

fn render_navbar<S: ClassroomSource>(f: &mut Frame, vc: &ViewController<S>, area: Rect) {
    let titles: Vec<Line> = Trigger::ALL
        .iter()
        .enumerate()
        .map(|(i, trigger)| {
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(DIM)),
                Span::styled(
                    format!("{} ", trigger.title()),
                    Style::default().fg(Color::White),
                ),
            ])
        })
        .collect();

    let selected = Trigger::ALL
        .iter()
        .position(|t| *t == vc.active)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .title(" OpenClass ")
                .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        )
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

    f.render_widget(tabs, area);
}

// ─── Container ──────────────────────────────────────────────────────────────

fn render_container<S: ClassroomSource>(f: &mut Frame, vc: &mut ViewController<S>, area: Rect) {
    let selected = vc.list_state.selected;
    let items: Vec<ListItem> = vc
        .display()
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| display_item(item, i == selected))
        .collect();

    let title = match vc.state {
        ViewState::Idle => " Available Courses ".to_string(),
        _ => format!(" {} ", vc.active.title()),
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(backdrop_color(vc.frame_count)))
            .title(title)
            .title_style(Style::default().fg(ACCENT)),
    );

    vc.list_state.inner.select(Some(selected));
    f.render_stateful_widget(list, area, &mut vc.list_state.inner);
}

fn display_item(item: &DisplayItem, is_selected: bool) -> ListItem<'static> {
    let marker = if is_selected { "> " } else { "  " };
    let bg = if is_selected { SELECTED_BG } else { Color::Reset };
    let headline = item.headline();
    let (head_style, indent) = item_style(item);

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, Style::default().fg(ACCENT)),
        Span::styled(indent, Style::default().bg(bg)),
        Span::styled(headline.clone(), head_style.bg(bg)),
    ])];

    if matches!(item, DisplayItem::CourseHeader { .. }) {
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(headline.width())),
            Style::default().fg(COURSE_HEADER),
        )));
    }

    for (label, value) in item.details() {
        lines.push(Line::from(vec![
            Span::raw(format!("  {indent}  ")),
            Span::styled(format!("{label}: "), Style::default().fg(DIM)),
            Span::styled(value.to_string(), Style::default().fg(Color::White)),
        ]));
    }

    if matches!(item, DisplayItem::Course { .. } | DisplayItem::Assignment { .. }) {
        lines.push(Line::from(""));
    }

    ListItem::new(lines)
}

/// Headline style and indent for one item.
fn item_style(item: &DisplayItem) -> (Style, &'static str) {
    match item {
        DisplayItem::Error(_) => (Style::default().fg(BAD).add_modifier(Modifier::BOLD), ""),
        DisplayItem::Placeholder(_) => (Style::default().fg(WARN).add_modifier(Modifier::BOLD), ""),
        DisplayItem::Summary { .. } => (
            Style::default()
                .fg(Color::White)
                .bg(SUMMARY_BG)
                .add_modifier(Modifier::BOLD),
            "",
        ),
        DisplayItem::CourseHeader { .. } => (
            Style::default().fg(COURSE_HEADER).add_modifier(Modifier::BOLD),
            "",
        ),
        DisplayItem::EmptyCourse { .. } => (Style::default().fg(DIM), ""),
        DisplayItem::Course { .. } => (
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            "",
        ),
        DisplayItem::Assignment { .. } => (
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            "    ",
        ),
    }
}

// ─── Status Bar ─────────────────────────────────────────────────────────────

fn render_status_bar<S: ClassroomSource>(f: &mut Frame, vc: &ViewController<S>, area: Rect) {
    let spinner = if vc.is_loading() {
        format!("{} ", SPINNER[(vc.frame_count % SPINNER.len() as u64) as usize])
    } else {
        String::new()
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(spinner, Style::default().fg(WARN)),
        Span::styled(
            &vc.status_message,
            Style::default().fg(match vc.state {
                ViewState::Errored(_) => BAD,
                ViewState::Loading(_) => WARN,
                _ => Color::White,
            }),
        ),
        Span::styled(
            "  q:quit  c:courses  a:assignments  Tab:switch  j/k:nav  ",
            Style::default().fg(DIM),
        ),
    ]))
    .style(Style::default().bg(HEADER_BG));

    f.render_widget(status, area);
}

// ─── Backdrop ───────────────────────────────────────────────────────────────

/// Border colour for `frame`. A new hue every `FRAMES_PER_HUE` frames,
/// eased across the frames in between.
pub fn backdrop_color(frame: u64) -> Color {
    let step = frame / FRAMES_PER_HUE;
    let t = (frame % FRAMES_PER_HUE) as f64 / FRAMES_PER_HUE as f64;

    let from = hue_at(step);
    let to = hue_at(step + 1);
    // Shortest way round the colour wheel.
    let mut delta = to - from;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }

    let hue = (from + delta * ease_in_out(t)).rem_euclid(360.0);
    let (r, g, b) = hsl_to_rgb(hue, 1.0, 0.5);
    Color::Rgb(r, g, b)
}

/// Golden-angle steps never settle into a visible cycle.
fn hue_at(step: u64) -> f64 {
    (step as f64 * 137.507_764).rem_euclid(360.0)
}

fn ease_in_out(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}
