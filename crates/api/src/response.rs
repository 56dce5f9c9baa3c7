//! API response types.
//!
//! Every endpoint answers with the same envelope: `{"code": 0,
//! "data": ...}` on success, `{"code": -1, "msg": ...}` on failure.
//! The failure side lives in `AppError`'s `IntoResponse` impl.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Success side of the uniform envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always 0 on this side.
    pub code: i32,
    /// The payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub const fn ok(data: T) -> Self {
        Self { code: 0, data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// A page of results with its total.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T: Serialize> {
    /// The rows of this page.
    pub list: Vec<T>,
    /// Total matching rows. Approximate for all-scope search, exact
    /// everywhere else.
    pub total: u64,
}

/// Page parameters shared by every listing endpoint. `page` is
/// 1-based.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

const fn default_page() -> u64 {
    1
}

const fn default_page_size() -> u64 {
    10
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl Pagination {
    /// Effective page size, capped at 100.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        let size = self.page_size;
        if size == 0 {
            default_page_size()
        } else if size > 100 {
            100
        } else {
            size
        }
    }

    /// Row offset of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        let page = if self.page == 0 { 1 } else { self.page };
        (page - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiResponse, Paged, Pagination};

    #[test]
    fn test_envelope_shape() {
        let json =
            serde_json::to_value(ApiResponse::ok(serde_json::json!({"id": "a"}))).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["id"], "a");
    }

    #[test]
    fn test_paged_uses_camel_case() {
        let json = serde_json::to_value(ApiResponse::ok(Paged {
            list: vec!["x"],
            total: 7,
        }))
        .unwrap();
        assert_eq!(json["data"]["total"], 7);
        assert_eq!(json["data"]["list"][0], "x");
    }

    #[test]
    fn test_pagination_offset() {
        let p = Pagination {
            page: 3,
            page_size: 20,
        };
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn test_pagination_clamps_degenerate_input() {
        let p = Pagination {
            page: 0,
            page_size: 1000,
        };
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), 0);
    }
}
