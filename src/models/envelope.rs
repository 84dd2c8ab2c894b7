use serde::Serialize;

/// Response envelope shared by every JSON route: `{ "status": true, "data": ... }`.
///
/// Failures are rendered by `AppError` as `{ "status": false, "error": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { status: true, data }
    }
}
