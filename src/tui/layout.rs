use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::controller::ScreenController;
use crate::presenter::{ArticleRow, Thumbnail};
use crate::tui::app::{SettingsField, TuiApp};

pub fn render(
    frame: &mut Frame,
    app: &mut TuiApp,
    screen: &ScreenController,
    colors: &ColorConfig,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Headlines
            Constraint::Length(8), // Detail
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_headlines(frame, app, screen, colors, chunks[0]);
    render_detail(frame, app, screen, colors, chunks[1]);
    render_status_bar(frame, app, screen, colors, chunks[2]);

    if app.settings.is_some() {
        render_settings(frame, app, colors);
    }
}

fn render_headlines(
    frame: &mut Frame,
    app: &mut TuiApp,
    screen: &ScreenController,
    colors: &ColorConfig,
    area: Rect,
) {
    let title = format!(
        " {} · {} ({}) ",
        app.prefs.section,
        app.prefs.order_by,
        screen.rows().len()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    if screen.rows().is_empty() {
        let message = screen.state().placeholder().unwrap_or_default();
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(colors.empty_state))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = screen
        .rows()
        .iter()
        .map(|row| {
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(
                    row.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(row.section_label.clone(), Style::default().fg(colors.section)),
                    Span::raw("   "),
                    Span::styled(row.date_label.clone(), Style::default().fg(colors.date)),
                ]),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(colors.selection_bg)
            .fg(colors.selection_fg),
    );

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_detail(
    frame: &mut Frame,
    app: &TuiApp,
    screen: &ScreenController,
    colors: &ColorConfig,
    area: Rect,
) {
    let block = Block::default()
        .title(" Article ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let content = match screen.rows().get(app.selected) {
        Some(row) => detail_lines(row, colors),
        None => Text::from(""),
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn detail_lines(row: &ArticleRow, colors: &ColorConfig) -> Text<'static> {
    let mut lines = vec![Line::from(Span::styled(
        row.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    // An absent author gets no line at all
    if let Some(author) = &row.author_label {
        lines.push(Line::from(Span::styled(
            author.clone(),
            Style::default().fg(colors.author),
        )));
    }
    lines.push(Line::from(Span::styled(
        row.date_label.clone(),
        Style::default().fg(colors.date),
    )));

    let image = match &row.thumbnail {
        Thumbnail::Remote { url, .. } => format!("Image : {}", url),
        Thumbnail::Default { image } => format!("Image : [{}]", image),
    };
    lines.push(Line::from(image));
    lines.push(Line::from(Span::styled(
        row.url.clone(),
        Style::default().fg(colors.link),
    )));

    Text::from(lines)
}

fn render_status_bar(
    frame: &mut Frame,
    app: &TuiApp,
    screen: &ScreenController,
    colors: &ColorConfig,
    area: Rect,
) {
    let status = if screen.is_loading() {
        "Loading news...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.settings.is_some() {
        "j/k:Field  h/l:Change  Enter:Save  Esc:Cancel".to_string()
    } else {
        "j/k:Navigate  Enter/o:Open  R:Reload  s:Settings  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

fn render_settings(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig) {
    let Some(draft) = &app.settings else {
        return;
    };

    let area = centered(frame.area(), 44, 6);
    let field_style = |field: SettingsField| {
        if draft.field == field {
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
        } else {
            Style::default()
        }
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Section   "),
            Span::styled(
                format!("< {} >", draft.prefs.section),
                field_style(SettingsField::Section),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Order by  "),
            Span::styled(
                format!("< {} >", draft.prefs.order_by),
                field_style(SettingsField::OrderBy),
            ),
        ]),
    ];

    let block = Block::default()
        .title(" Settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}
