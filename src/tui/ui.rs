use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::models::{ArtistRecord, SortKey};
use crate::query;

use super::{App, state::FocusArea};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(30)])
        .split(chunks[0]);

    draw_search(frame, app, top[0]);
    draw_sort(frame, app, top[1]);
    draw_group_tabs(frame, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    draw_results(frame, app, body[0]);
    draw_detail(frame, app, body[1]);
    draw_logs(frame, app, chunks[3]);
    draw_footer(frame, chunks[4]);
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title("Search by Stage Name or Group")
        .borders(Borders::ALL)
        .border_style(border_style(app.focus, FocusArea::Search));

    let paragraph = Paragraph::new(format!("> {}", app.query.search_text))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn draw_sort(frame: &mut Frame, app: &App, area: Rect) {
    let spans: Vec<Span> = SortKey::ALL
        .iter()
        .flat_map(|key| {
            let style = if *key == app.query.sort_key {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                dim_style()
            };
            [Span::styled(key.label(), style), Span::raw(" ")]
        })
        .collect();

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().title("Sort by (s)").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_group_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = std::iter::once("All".to_string())
        .chain(app.groups().iter().cloned())
        .map(Line::from)
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.group_tab_index())
        .block(
            Block::default()
                .title("Groups")
                .borders(Borders::ALL)
                .border_style(border_style(app.focus, FocusArea::Groups)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn draw_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = if app.view.is_empty() {
        let placeholder = if app.loading {
            "Loading..."
        } else {
            "No results found"
        };
        vec![ListItem::new(placeholder).style(dim_style())]
    } else {
        app.view
            .iter()
            .map(|artist| ListItem::new(result_line(artist)))
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Artists ({})", app.view.len()))
                .borders(Borders::ALL)
                .border_style(border_style(app.focus, FocusArea::Results)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.results_state);
}

fn draw_detail(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.selected_artist() {
        Some(artist) => detail_lines(artist),
        None => vec![Line::from("Select an artist").style(dim_style())],
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Profile").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .logs
        .iter()
        .rev()
        .take(100)
        .map(|entry| Line::from(entry.clone()))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Activity")
                .borders(Borders::ALL)
                .border_style(border_style(app.focus, FocusArea::Logs)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(
        "Tab: cycle • type: search • ←/→: group • ↑/↓: select • s: sort • Esc: clear • q: quit",
    )
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, area);
}

fn result_line(artist: &ArtistRecord) -> Line<'static> {
    Line::from(format!("{} • {}", artist.stage_name, artist.group))
}

fn detail_lines(artist: &ArtistRecord) -> Vec<Line<'static>> {
    let group = if artist.is_solo() {
        "Solo artist".to_string()
    } else {
        format!("Group: {}", artist.group)
    };

    vec![
        Line::from(artist.stage_name.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!("Full Name: {}", artist.full_name)),
        Line::from(format!("Korean Name: {}", artist.korean_name)),
        Line::from(format!(
            "DOB: {} ({} yrs)",
            artist.date_of_birth,
            query::age_today(&artist.date_of_birth)
        )),
        Line::from(format!("Country: {}", artist.country)),
        Line::from(group),
        Line::from(format!("Gender: {}", artist.gender_label())),
    ]
}

fn border_style(current: FocusArea, area: FocusArea) -> Style {
    if current == area {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
