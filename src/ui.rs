//! UI rendering helpers for the terminal user interface.
//!
//! `view::project` turns view state into a `ViewModel`; `draw` renders that
//! model with `ratatui` and holds no state of its own.

mod view;

pub use view::{PlaylistRow, TrackRow, ViewModel, project};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::config::UiSettings;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("J/K", "next/prev playlist");
    map.insert("enter", "play highlighted");
    map.insert("space/p", "play/pause");
    map.insert("n", "next song");
    map.insert("x", "stop");
    map.insert("q", "quit");
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["j/k", "J/K", "enter", "space/p", "n", "x", "q"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn status_text(vm: &ViewModel) -> String {
    let mut parts: Vec<String> = Vec::new();

    let state = if !vm.active {
        "Stopped"
    } else if vm.paused {
        "Paused"
    } else {
        "Playing"
    };
    parts.push(format!(" Song: {}", vm.now_playing));
    parts.push(state.to_string());

    if vm.transitioning {
        parts.push("Cover: ...".to_string());
    } else {
        parts.push(format!("Cover: {}", vm.cover));
    }

    parts.push(format!("Server: {}", vm.connection));
    parts.join(" • ")
}

fn pane_padding() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into the provided `frame` from a projected `ViewModel`.
pub fn draw(frame: &mut Frame, vm: &ViewModel, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" mixtape ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let mut status_par = Paragraph::new(status_text(vm))
        .block(Block::bordered().padding(pane_padding()).title(" status "))
        .wrap(Wrap { trim: true });
    if vm.connection != "live" {
        status_par = status_par.slow_blink();
    }
    frame.render_widget(status_par, chunks[1]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[2]);

    // Playlists
    {
        let items: Vec<ListItem> = vm
            .playlists
            .iter()
            .map(|row| {
                let marker = if row.playing { "♪ " } else { "  " };
                let line = Line::from(vec![
                    Span::raw(marker),
                    Span::raw(row.name.as_str()),
                    Span::raw(format!(" ({})", row.track_count)).dim(),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" playlists "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(vm.playlist_row);
        frame.render_stateful_widget(list, panes[0], &mut state);
    }

    // Tracks of the browsing playlist
    {
        let items: Vec<ListItem> = vm
            .tracks
            .iter()
            .map(|row| {
                let marker = if row.playing { "♪ " } else { "  " };
                let mut spans = vec![Span::raw(marker), Span::raw(row.title.as_str())];
                if !row.duration.is_empty() {
                    spans.push(Span::raw(format!("  {}", row.duration)).dim());
                }
                let item = ListItem::new(Line::from(spans));
                if row.playing {
                    item.bold()
                } else {
                    item
                }
            })
            .collect();

        let title = match &vm.browsing_name {
            Some(name) => format!(" {} ", name),
            None => " tracks ".to_string(),
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(vm.highlighted_row);
        frame.render_stateful_widget(list, panes[1], &mut state);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(pane_padding()),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
