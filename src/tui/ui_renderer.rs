use super::app_logic::SessionApp;
use super::app_state::SessionMode;
use super::input::InputState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

fn tag_pill_style() -> Style {
    Style::default().bg(Color::Indexed(62)).fg(Color::White)
}

fn highlighted_tag_pill_style() -> Style {
    Style::default()
        .bg(Color::Indexed(99))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn draw_help_block(f: &mut Frame, area: Rect) {
    let help_text_lines_content = vec![
        Line::from("Arrows/jk: Nav | Enter: Open | n: New note | /: Filter | q/Esc: Quit"),
        Line::from("Tags come from a note's first line: // +tag1 +tag2"),
    ];
    let help_paragraph = Paragraph::new(help_text_lines_content)
        .block(Block::default().borders(Borders::ALL).title("Notepick"));
    f.render_widget(help_paragraph, area);
}

fn draw_filter_input_block(f: &mut Frame, app: &SessionApp, area: Rect) {
    let input_text = format!("/{}", app.filter_input);
    let filter_paragraph = Paragraph::new(input_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter (Esc to clear, Enter to apply)"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(filter_paragraph, area);
    f.set_cursor_position((area.x + 1 + app.filter_cursor_pos as u16 + 1, area.y + 1));
}

fn note_line(app: &SessionApp, entry_idx: usize, is_highlighted: bool) -> Line<'static> {
    let entry = &app.entries[entry_idx];
    let mut spans = vec![Span::raw(entry.display_name.clone()), Span::raw(" ")];
    let pill = if is_highlighted {
        highlighted_tag_pill_style()
    } else {
        tag_pill_style()
    };
    for tag in &entry.tags {
        spans.push(Span::styled(format!(" {tag} "), pill));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn draw_note_list_block(f: &mut Frame, app: &mut SessionApp, area: Rect) {
    app.list_viewport_height = area.height.saturating_sub(2) as usize;
    app.ensure_highlight_is_visible_in_viewport();

    let filtered = app.filtered_indices();
    let highlight_pos = filtered.iter().position(|&i| i == app.highlighted_idx);

    let window = filtered
        .get(app.scroll_offset..(app.scroll_offset + app.list_viewport_height).min(filtered.len()))
        .unwrap_or(&[]);

    let list_items: Vec<ListItem> = window
        .iter()
        .map(|&entry_idx| {
            ListItem::new(note_line(app, entry_idx, entry_idx == app.highlighted_idx))
        })
        .collect();

    let list_title = if app.filter_input.is_empty() {
        format!("Notes at {}", app.notes_dir.display())
    } else {
        format!("Notes (Filter: '{}')", app.filter_input)
    };

    let list_widget = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state = ratatui::widgets::ListState::default();
    if let Some(pos) = highlight_pos {
        if pos >= app.scroll_offset && pos < app.scroll_offset + app.list_viewport_height {
            list_state.select(Some(pos - app.scroll_offset));
        }
    }
    f.render_stateful_widget(list_widget, area, &mut list_state);
}

fn draw_browse(frame: &mut Frame, app: &mut SessionApp, filtering: bool) {
    let help_lines = 2;
    let filter_input_height = if filtering { 3 } else { 0 };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(help_lines + 2),
            Constraint::Length(filter_input_height),
            Constraint::Min(0),
        ])
        .split(frame.area());

    draw_help_block(frame, main_chunks[0]);
    if filtering {
        draw_filter_input_block(frame, app, main_chunks[1]);
    }
    draw_note_list_block(frame, app, main_chunks[2]);
}

fn draw_prompt(frame: &mut Frame, title: &str, hint: &str, input: &InputState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(frame.area());

    let input_paragraph = Paragraph::new(input.value().to_string())
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(input_paragraph, chunks[0]);
    frame.set_cursor_position((chunks[0].x + 1 + input.cursor() as u16, chunks[0].y + 1));

    let hint_paragraph = Paragraph::new(hint.to_string()).style(Style::default().dim());
    frame.render_widget(hint_paragraph, chunks[1]);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut SessionApp) {
    if let SessionMode::Browsing { filtering } = app.mode {
        draw_browse(frame, app, filtering);
        return;
    }
    match &app.mode {
        SessionMode::NamingNote { input } => draw_prompt(
            frame,
            "New note name",
            "File name without the .md extension | Enter: continue | Esc: cancel",
            input,
        ),
        SessionMode::TaggingNote {
            file_name, input, ..
        } => {
            let title = format!("Tags for {file_name}");
            draw_prompt(
                frame,
                &title,
                "Space-separated tags, e.g. work important todo | Enter: create | Esc: back",
                input,
            );
        }
        SessionMode::Browsing { .. } => {}
    }
}
