/// Path fragments of endpoints that never carry a bearer token and whose
/// 401 responses mean "wrong credentials", not "session expired".
pub const EXEMPT_ENDPOINTS: [&str; 4] = [
    "/auth/login",
    "/auth/request-otp",
    "/auth/verify-otp",
    "/auth/register-complete",
];

pub fn is_exempt_endpoint(path: &str) -> bool {
    EXEMPT_ENDPOINTS.iter().any(|fragment| path.contains(fragment))
}
