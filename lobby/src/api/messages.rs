//! Fixed user-facing messages.

/// Transport failure (DNS, refused connection, timeout)
pub const CONNECTION_ERROR: &str =
    "Unable to reach the server. Check your connection and try again.";

/// Status code not present in the status table
pub const GENERIC_ERROR: &str = "Error processing request.";

/// The current-account response had no recognizable account in it
pub const ACCOUNT_NOT_FOUND: &str = "Invalid server response: user data not found.";

/// A response could not be decoded into the expected data
pub const INVALID_RESPONSE: &str = "Invalid server response.";

/// 2xx with `success: false` and no message, on the current-account endpoint
pub const ACCOUNT_UNAVAILABLE: &str = "Unable to load user data.";

/// 2xx with `success: false` and no message, anywhere else
pub const REQUEST_REJECTED: &str = "The server rejected the request.";

/// A request named a role the client does not recognize
pub const UNKNOWN_ROLE: &str = "Select a valid role.";

/// Delivery lookup by tracking code failed without a server explanation
pub const DELIVERY_NOT_FOUND: &str = "Delivery not found.";

/// Checkout could not be started and the server gave no reason
pub const CHECKOUT_FAILED: &str = "Unable to start checkout.";

const STATUS_MESSAGES: &[(u16, &str)] = &[
    (400, "Invalid data. Please check the information provided."),
    (401, "Invalid credentials."),
    (403, "Access denied."),
    (404, "Resource not found."),
    (409, "This record already exists (duplicate email or username)."),
    (500, "Internal server error. Please try again."),
];

/// Message for an HTTP error status.
pub fn status_message(status: u16) -> &'static str {
    STATUS_MESSAGES
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, message)| *message)
        .unwrap_or(GENERIC_ERROR)
}
