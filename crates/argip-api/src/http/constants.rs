//! Shared HTTP constants (headers, problem URIs, token shape).

pub(crate) const BEARER_CHALLENGE: &str = "Bearer";

pub(crate) const PROBLEM_INTERNAL: &str = "https://argip.dev/problems/internal";
pub(crate) const PROBLEM_UNAUTHORIZED: &str = "https://argip.dev/problems/unauthorized";
pub(crate) const PROBLEM_BAD_REQUEST: &str = "https://argip.dev/problems/bad-request";
pub(crate) const PROBLEM_NOT_FOUND: &str = "https://argip.dev/problems/not-found";
pub(crate) const PROBLEM_SERVICE_UNAVAILABLE: &str =
    "https://argip.dev/problems/service-unavailable";

pub(crate) const SERVICE_MESSAGE: &str = "Argip Auth API is running";
pub(crate) const SERVICE_VERSION: &str = "1.0.0";

/// Length of the random part of an issued bearer token.
pub(crate) const TOKEN_SECRET_LEN: usize = 48;

pub(crate) const MSG_INVALID_CREDENTIALS: &str = "Could not validate credentials";
pub(crate) const MSG_BAD_LOGIN: &str = "Incorrect username or password";
pub(crate) const MSG_USERNAME_TAKEN: &str = "Username already registered";
pub(crate) const MSG_EMAIL_TAKEN: &str = "Email already registered";
pub(crate) const MSG_RANGE_NOT_FOUND: &str = "Range not found";
pub(crate) const MSG_NUT_NOT_FOUND: &str = "Nut not found";
pub(crate) const MSG_SCREW_NOT_FOUND: &str = "Screw length not found";
pub(crate) const MSG_SCREW_EXISTS: &str =
    "This screw (diameter + length combination) already exists";
