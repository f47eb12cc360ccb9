// GitHub API
pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
pub const USER_AGENT: &str = "github-activity-cli";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Env vars
pub const GITHUB_ACTIVITY_API_URL: &str = "GITHUB_ACTIVITY_API_URL";
pub const GITHUB_ACTIVITY_TIMEOUT: &str = "GITHUB_ACTIVITY_TIMEOUT";
pub const GITHUB_ACTIVITY_LOG_OUT: &str = "GITHUB_ACTIVITY_LOG_OUT";

// Output
pub const NO_ACTIVITY_MESSAGE: &str = "no recent activity";
