pub mod bank_account;
pub mod dashboard;
pub mod health;
pub mod retailers;
pub mod statement;
pub mod summary;
pub mod transactions;

use common::ApiResponse;

/// Wraps a payload in the success envelope.
pub(crate) fn ok<T>(data: T, message: &str) -> ApiResponse<T> {
    ApiResponse {
        data,
        message: message.to_string(),
        success: true,
    }
}
