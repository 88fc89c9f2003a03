use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::AppState;

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let block = Block::default()
        .title("Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if app.visible.is_empty() {
        let msg = if app.controller.state().loading {
            "Loading..."
        } else {
            "No users found"
        };
        let p = Paragraph::new(msg)
            .style(Style::default().fg(app.theme.text))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.visible.len());
    let slice = &app.visible[start..end];

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let id = u.id.map(|id| id.to_string()).unwrap_or_default();
        Row::new(vec![
            Cell::from(id),
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
            Cell::from(u.role.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(30),
        Constraint::Percentage(45),
        Constraint::Percentage(25),
    ];

    let header = Row::new(vec!["ID", "NAME", "EMAIL", "ROLE"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::REVERSED),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let (id, name, email, role) = match app.selected_user() {
        Some(u) => (
            u.id.map(|id| id.to_string()).unwrap_or_default(),
            u.name.clone(),
            u.email.clone(),
            u.role.clone(),
        ),
        None => (String::new(), String::new(), String::new(), String::new()),
    };

    let text = format!("Id: {id}\nName: {name}\nEmail: {email}\nRole: {role}");
    let p = Paragraph::new(text).style(Style::default().fg(app.theme.text)).block(
        Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}
