// Unit tests for remote-user-manager
// These tests work with the public API without modifying the main codebase

#[cfg(test)]
mod store_tests {
    use remote_user_manager::store::{MemoryUserStore, User, UserDraft, UserStore};

    #[test]
    fn user_parses_a_service_payload() {
        // Extra fields from the service are tolerated, missing id maps to None.
        let payload = r#"{"id": 1, "name": "John Doe", "email": "john@x.com", "role": "Dev", "createdAt": "2024-01-01"}"#;
        let user: User = serde_json::from_str(payload).unwrap();
        assert_eq!(user.id, Some(1));
        assert_eq!(user.name, "John Doe");

        let payload = r#"{"name": "New User", "email": "new@x.com", "role": "Tester"}"#;
        let user: User = serde_json::from_str(payload).unwrap();
        assert_eq!(user.id, None);
    }

    #[test]
    fn draft_round_trips_through_a_record() {
        let user = User {
            id: Some(3),
            name: "Bob Johnson".to_string(),
            email: "bob@x.com".to_string(),
            role: "Manager".to_string(),
        };
        let draft = UserDraft::from_user(&user);
        assert_eq!(draft.with_id(3), user);
    }

    #[test]
    fn memory_store_crud_sequence() {
        let store: Box<dyn UserStore> = Box::new(MemoryUserStore::new());

        let draft = UserDraft {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            role: "Tester".to_string(),
        };
        let created = store.create(&draft).unwrap();
        let id = created.id.expect("store assigns an id");

        let renamed = UserDraft {
            name: "Renamed".to_string(),
            ..draft
        };
        let updated = store.update(id, &renamed).unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(store.list().unwrap().len(), 1);

        store.delete(id).unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}

#[cfg(test)]
mod keymap_tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use remote_user_manager::app::keymap::{KeyAction, Keymap};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings_cover_the_crud_actions() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&press(KeyCode::Char('n'))), Some(KeyAction::NewUser));
        assert_eq!(km.resolve(&press(KeyCode::Enter)), Some(KeyAction::EditSelection));
        assert_eq!(km.resolve(&press(KeyCode::Delete)), Some(KeyAction::DeleteSelection));
        assert_eq!(km.resolve(&press(KeyCode::Char('r'))), Some(KeyAction::Refresh));
        assert_eq!(km.resolve(&press(KeyCode::Char('/'))), Some(KeyAction::StartSearch));
        assert_eq!(km.resolve(&press(KeyCode::Char('q'))), Some(KeyAction::Quit));
    }

    #[test]
    fn unbound_keys_resolve_to_nothing() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&press(KeyCode::Char('z'))), None);
    }
}

#[cfg(test)]
mod search_tests {
    use remote_user_manager::search::filter_users;
    use remote_user_manager::store::User;

    fn create_test_user(id: u64, name: &str, role: &str) -> User {
        User {
            id: Some(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            role: role.to_string(),
        }
    }

    #[test]
    fn filter_matches_email_domains_too() {
        let users = vec![
            create_test_user(1, "John Doe", "Dev"),
            create_test_user(2, "Jane Smith", "Designer"),
        ];
        let hits = filter_users(&users, "jane.smith@");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, Some(2));
    }

    #[test]
    fn filter_is_a_view_not_a_mutation() {
        let users = vec![
            create_test_user(1, "John Doe", "Dev"),
            create_test_user(2, "Jane Smith", "Designer"),
        ];
        let hits = filter_users(&users, "nobody");
        assert!(hits.is_empty());
        // The input listing is untouched.
        assert_eq!(users.len(), 2);
    }
}
