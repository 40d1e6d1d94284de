use crate::api::UserRecord;

/// Case-insensitive substring match on the user's name or city.
pub fn matches(user: &UserRecord, query: &str) -> bool {
    matches_lowered(user, &query.to_lowercase())
}

fn matches_lowered(user: &UserRecord, q: &str) -> bool {
    q.is_empty()
        || user.name.to_lowercase().contains(q)
        || user.address.city.to_lowercase().contains(q)
}

/// Users matching `query`, in fetch order. An empty query matches everything.
///
/// Nothing is cached: every call walks `users` again.
pub fn filtered_view<'a>(
    users: &'a [UserRecord],
    query: &str,
) -> impl Iterator<Item = &'a UserRecord> + use<'a> {
    let q = query.to_lowercase();
    users.iter().filter(move |u| matches_lowered(u, &q))
}
