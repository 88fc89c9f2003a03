use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, FormField, InputMode, ModalState};
use crate::ui;

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut app: AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.input_mode {
                        InputMode::Normal => {
                            if handle_normal_key(&mut app, &key) {
                                break;
                            }
                        }
                        InputMode::Search => handle_search_key(&mut app, key.code),
                        InputMode::Modal => handle_modal_key(&mut app, key.code),
                    }
                }
            }
        }

        let _uptime = app.started_at.elapsed();
    }

    Ok(())
}

/// Handle a key in Normal mode; returns true when the app should quit.
fn handle_normal_key(app: &mut AppState, key: &KeyEvent) -> bool {
    match app.keymap.resolve(key) {
        Some(KeyAction::Quit) => return true,
        Some(KeyAction::Refresh) => {
            app.controller.refresh();
            app.sync_visible();
        }
        Some(KeyAction::NewUser) => {
            // A fresh create form: leave any previous edit target behind.
            app.controller.cancel_edit();
            open_form(app);
        }
        Some(KeyAction::EditSelection) => {
            if let Some(user) = app.selected_user().cloned() {
                app.controller.begin_edit(&user);
                open_form(app);
            }
        }
        Some(KeyAction::DeleteSelection) => {
            if let Some(id) = app.selected_user().and_then(|u| u.id) {
                app.modal = Some(ModalState::DeleteConfirm { id, selected: 1 });
                app.input_mode = InputMode::Modal;
            }
        }
        Some(KeyAction::StartSearch) => {
            app.search_query.clear();
            app.input_mode = InputMode::Search;
        }
        Some(KeyAction::OpenHelp) => {
            app.modal = Some(ModalState::Help);
            app.input_mode = InputMode::Modal;
        }
        Some(KeyAction::MoveUp) => {
            if app.selected_index > 0 {
                app.selected_index -= 1;
            }
        }
        Some(KeyAction::MoveDown) => {
            if app.selected_index + 1 < app.visible.len() {
                app.selected_index += 1;
            }
        }
        Some(KeyAction::PageUp) => {
            let rpp = app.rows_per_page.max(1);
            app.selected_index = app.selected_index.saturating_sub(rpp);
        }
        Some(KeyAction::PageDown) => {
            let rpp = app.rows_per_page.max(1);
            let new_idx = app.selected_index.saturating_add(rpp);
            app.selected_index = new_idx.min(app.visible.len().saturating_sub(1));
        }
        Some(KeyAction::Ignore) | None => {}
    }
    false
}

fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => {
            app.sync_visible();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.search_query.clear();
            app.sync_visible();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    let Some(modal) = app.modal.clone() else {
        return;
    };
    match modal {
        ModalState::UserForm { focused, hint } => match code {
            KeyCode::Esc => {
                // Cancel resets the draft whether creating or editing.
                app.controller.cancel_edit();
                close_modal(app);
            }
            KeyCode::Tab | KeyCode::Down => {
                app.modal = Some(ModalState::UserForm {
                    focused: focused.next(),
                    hint,
                });
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.modal = Some(ModalState::UserForm {
                    focused: focused.prev(),
                    hint,
                });
            }
            KeyCode::Enter => submit_form(app, focused),
            KeyCode::Backspace => {
                app.form_field_mut(focused).pop();
            }
            KeyCode::Char(c) => {
                app.form_field_mut(focused).push(c);
            }
            _ => {}
        },
        ModalState::DeleteConfirm { id, selected } => match code {
            KeyCode::Esc => close_modal(app),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                app.modal = Some(ModalState::DeleteConfirm {
                    id,
                    selected: if selected == 0 { 1 } else { 0 },
                });
            }
            KeyCode::Enter => {
                if selected == 0 {
                    // Confirmation happened here; the controller receives
                    // pre-confirmed intent only.
                    app.controller.remove(id);
                    app.sync_visible();
                }
                close_modal(app);
            }
            _ => {}
        },
        ModalState::Help => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => close_modal(app),
            _ => {}
        },
    }
}

fn open_form(app: &mut AppState) {
    app.modal = Some(ModalState::UserForm {
        focused: FormField::Name,
        hint: false,
    });
    app.input_mode = InputMode::Modal;
}

fn submit_form(app: &mut AppState, focused: FormField) {
    if !app.controller.state().draft.is_complete() {
        // Mirror of the original form's required-field gate: keep the
        // dialog open and show the hint instead of dispatching.
        app.modal = Some(ModalState::UserForm { focused, hint: true });
        return;
    }
    app.controller.submit();
    app.sync_visible();
    if app.controller.state().error.is_none() {
        close_modal(app);
    }
    // On failure the form stays open with the draft intact; the error is
    // shown in the status bar and the next submit retries.
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}
