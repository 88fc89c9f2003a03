//! Create/edit form and delete confirmation dialogs.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{AppState, FormField, ModalState};

pub fn render_form_modal(f: &mut Frame, area: Rect, app: &mut AppState, state: &ModalState) {
    match state {
        ModalState::UserForm { focused, hint } => {
            render_user_form(f, area, app, *focused, *hint);
        }
        ModalState::DeleteConfirm { id, selected } => {
            render_delete_confirm(f, area, app, *id, *selected);
        }
        _ => {}
    }
}

fn render_user_form(f: &mut Frame, area: Rect, app: &AppState, focused: FormField, hint: bool) {
    let editing = app.controller.state().editing_id.is_some();
    let title = if editing { "Edit User" } else { "Add New User" };
    let rect = crate::ui::components::centered_rect(56, 10, area);

    let draft = &app.controller.state().draft;
    let field_line = |label: &str, value: &str, field: FormField| {
        let marker = if focused == field { "▶" } else { " " };
        let mut line = vec![Span::raw(format!("{} {:<6} ", marker, label))];
        if focused == field {
            line.push(Span::styled(
                format!("{}_", value),
                Style::default().fg(app.theme.highlight_fg),
            ));
        } else {
            line.push(Span::raw(value.to_string()));
        }
        Line::from(line)
    };

    let mut lines = vec![
        field_line("Name", &draft.name, FormField::Name),
        field_line("Email", &draft.email, FormField::Email),
        field_line("Role", &draft.role, FormField::Role),
        Line::raw(""),
    ];
    if hint {
        lines.push(Line::from(Span::styled(
            "All fields are required",
            Style::default().fg(app.theme.error),
        )));
    }
    let footer = if editing {
        "Enter: update  Esc: cancel  Tab: next field"
    } else {
        "Enter: add  Esc: close  Tab: next field"
    };
    lines.push(Line::from(Span::styled(
        footer,
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

fn render_delete_confirm(f: &mut Frame, area: Rect, app: &AppState, id: u64, selected: usize) {
    let rect = crate::ui::components::centered_rect(52, 7, area);
    let name = app
        .controller
        .state()
        .users
        .iter()
        .find(|u| u.id == Some(id))
        .map(|u| u.name.clone())
        .unwrap_or_default();

    let yes = if selected == 0 { "[Yes]" } else { " Yes " };
    let no = if selected == 1 { "[No]" } else { " No  " };
    let body = format!(
        "Are you sure you want to delete this user?\n'{name}' (id {id})\n\n  {yes}    {no}"
    );
    let p = Paragraph::new(body).block(
        Block::default()
            .title("Confirm delete")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
