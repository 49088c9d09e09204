/// Constants module to avoid magic values in the codebase

// Network Configuration
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const ASK_ENDPOINT: &str = "/api/ask";
pub const HEALTH_ENDPOINT: &str = "/api/health";

// Timeouts
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 3;

// Stock quick questions offered above the prompt
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "What schemes are available for students?",
    "How to apply for a pension?",
    "Eligibility for health insurance?",
    "Subsidy schemes for farmers?",
];

// Preference keys for the on-disk key-value store
pub const PREF_SERVICE_URL: &str = "service_url";
