//! Route to role policy enforced by the access guard.
//!
//! Keys are router templates as reported by `MatchedPath`, so every spelling
//! of a path parameter the router accepts resolves to the same entry.

use estate_auth::Role;

pub const HOUSE_CREATE: &str = "/house/create";
pub const HOUSE_FLATS: &str = "/house/:id";
pub const HOUSE_SUBSCRIBE: &str = "/house/:id/subscribe";
pub const FLAT_CREATE: &str = "/flat/create";
pub const FLAT_UPDATE: &str = "/flat/update";

/// Role a token must carry to reach the route registered as `template`.
///
/// `None` means any valid token is enough.
pub fn required_role(template: &str) -> Option<Role> {
    match template {
        HOUSE_CREATE | FLAT_UPDATE => Some(Role::Moderator),
        FLAT_CREATE | HOUSE_SUBSCRIBE => Some(Role::Client),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moderator_routes() {
        assert_eq!(required_role("/house/create"), Some(Role::Moderator));
        assert_eq!(required_role("/flat/update"), Some(Role::Moderator));
    }

    #[test]
    fn test_client_routes() {
        assert_eq!(required_role("/flat/create"), Some(Role::Client));
        assert_eq!(required_role("/house/:id/subscribe"), Some(Role::Client));
    }

    #[test]
    fn test_other_routes_need_any_token() {
        assert_eq!(required_role("/house/:id"), None);
        assert_eq!(required_role("/house/1/subscribe"), None);
        assert_eq!(required_role("/api/house/:id/subscribe"), None);
    }
}
