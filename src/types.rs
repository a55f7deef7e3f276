use std::{convert::Infallible, fmt, str::FromStr};

/// Account role granted by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Provost,
    Admin,
    Other(String),
}

impl FromStr for Role {
    type Err = Infallible;

    /// Case-insensitive; an optional `ROLE_` prefix is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = match trimmed.get(..5) {
            Some(prefix) if prefix.eq_ignore_ascii_case("role_") => &trimmed[5..],
            _ => trimmed,
        };
        Ok(match name.to_ascii_lowercase().as_str() {
            "student" => Self::Student,
            "provost" => Self::Provost,
            "admin" => Self::Admin,
            _ => Self::Other(trimmed.to_owned()),
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => f.write_str("student"),
            Self::Provost => f.write_str("provost"),
            Self::Admin => f.write_str("admin"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Signed-in account returned by [`AuthClient::sign_in`](crate::AuthClient::sign_in).
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .finish()
    }
}

impl Session {
    /// Value for the `Authorization` header, e.g. `Bearer <token>`.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}
