//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use travelcloud_common::AppError;

/// Identity of the calling user, resolved by the identity middleware
/// from the `x-wx-openid` header the hosting gateway injects.
#[derive(Debug, Clone)]
pub struct Identity(pub String);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional identity. Handlers that also accept an explicit `openid`
/// request field take this and resolve the two sources once through
/// [`MaybeIdentity::resolve`].
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<String>);

impl MaybeIdentity {
    /// Effective identity: the gateway header wins over an explicit
    /// request field.
    pub fn resolve(self, openid: Option<String>) -> Result<String, AppError> {
        self.0.or(openid).ok_or(AppError::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts.extensions.get::<Identity>().map(|id| id.0.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::MaybeIdentity;
    use travelcloud_common::AppError;

    #[test]
    fn test_resolve_prefers_header_identity() {
        let identity = MaybeIdentity(Some("header-openid".to_string()));
        let resolved = identity.resolve(Some("body-openid".to_string())).unwrap();
        assert_eq!(resolved, "header-openid");
    }

    #[test]
    fn test_resolve_falls_back_to_request_field() {
        let identity = MaybeIdentity(None);
        let resolved = identity.resolve(Some("body-openid".to_string())).unwrap();
        assert_eq!(resolved, "body-openid");
    }

    #[test]
    fn test_resolve_without_any_source_is_unauthorized() {
        let identity = MaybeIdentity(None);
        assert!(matches!(
            identity.resolve(None),
            Err(AppError::Unauthorized)
        ));
    }
}
