use crate::store::User;

/// Case-insensitive substring filter over the mirrored listing.
///
/// Matches against id, name, email, and role. An empty query returns the
/// listing unchanged.
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    let q = query.to_lowercase();
    if q.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&q)
                || u.email.to_lowercase().contains(&q)
                || u.role.to_lowercase().contains(&q)
                || u.id.is_some_and(|id| id.to_string().contains(&q))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_user(id: u64, name: &str, email: &str, role: &str) -> User {
        User {
            id: Some(id),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn filters_by_multiple_fields() {
        let users = vec![
            mk_user(1, "Alice Anders", "alice@example.com", "Dev"),
            mk_user(2, "Bobby Tables", "bob@example.com", "DBA"),
        ];

        let hits = filter_users(&users, "bOb");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Bobby Tables");

        let hits = filter_users(&users, "dev");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alice Anders");
    }

    #[test]
    fn matches_ids_and_empty_query_returns_everything() {
        let users = vec![
            mk_user(10, "Alice Anders", "alice@example.com", "Dev"),
            mk_user(2, "Bobby Tables", "bob@example.com", "DBA"),
        ];

        let hits = filter_users(&users, "10");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, Some(10));

        assert_eq!(filter_users(&users, "").len(), 2);
    }
}
