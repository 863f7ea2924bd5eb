//! Request-scoped auth context
//!
//! Built from a verified token once per request and passed down to
//! services; nothing below the extractor reads headers or tokens.

use sd_core::traits::{Id, UserContext};

use crate::jwt::Claims;

#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Id,
    pub name: Option<String>,
    pub admin: bool,
}

impl AuthContext {
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        let user_id = claims.sub.parse().ok()?;
        Some(Self {
            user_id,
            name: claims.name.clone(),
            admin: claims.admin,
        })
    }
}

impl UserContext for AuthContext {
    fn user_id(&self) -> Id {
        self.user_id
    }

    fn is_admin(&self) -> bool {
        self.admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_claims() {
        let claims = Claims {
            sub: "7".into(),
            exp: 0,
            iat: 0,
            name: Some("Ravi".into()),
            admin: true,
        };
        let ctx = AuthContext::from_claims(&claims).unwrap();
        assert_eq!(ctx.user_id(), 7);
        assert!(ctx.is_admin());
    }

    #[test]
    fn test_bad_subject() {
        let claims = Claims {
            sub: "not-a-number".into(),
            exp: 0,
            iat: 0,
            name: None,
            admin: false,
        };
        assert!(AuthContext::from_claims(&claims).is_none());
    }
}
