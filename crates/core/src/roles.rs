//! Role name constants carried in access-token claims.

/// Administrator role; the only role allowed to mutate landing rows.
pub const ROLE_ADMIN: &str = "admin";

/// Read-only editor role. Recognized but never granted mutation rights.
pub const ROLE_VIEWER: &str = "viewer";
