//! Wire names and fixed limits shared across crates.

/// Production host used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://videmicorp.com";
/// REST namespace of the contact API below the base URL.
pub const DEFAULT_API_PREFIX: &str = "wp-json/fluent-crm/v2";
/// Read timeout for data requests, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Timeout used by the credential check, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Page size requested from the subscribers endpoint.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Hard circuit breaker for the page loop. Not configurable.
pub const MAX_PAGES: u32 = 1000;
/// Number of error entries retained for diagnosis.
pub const ERROR_LOG_CAPACITY: usize = 100;

/// API endpoints, relative to `<base_url>/<api_prefix>/`.
pub mod endpoints {
    pub const SUBSCRIBERS: &str = "subscribers";
    pub const CUSTOM_FIELDS: &str = "custom-fields/contacts";
    pub const TAGS: &str = "tags";
    pub const LISTS: &str = "lists";
}

/// Record field names consumed by views and exports.
pub mod fields {
    pub const ID: &str = "id";
    pub const FULL_NAME: &str = "full_name";
    pub const EMAIL: &str = "email";
    pub const STATUS: &str = "status";
    pub const PHONE: &str = "phone";
    pub const PREFIX: &str = "prefix";
    pub const PHOTO: &str = "photo";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const ADDRESS_LINE_1: &str = "address_line_1";
    pub const ADDRESS_LINE_2: &str = "address_line_2";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const POSTAL_CODE: &str = "postal_code";
    pub const COUNTRY: &str = "country";
    pub const CREATED_AT: &str = "created_at";
    pub const TAGS: &str = "tags";
    pub const LISTS: &str = "lists";
    pub const CUSTOM_VALUES: &str = "custom_values";
    pub const TITLE: &str = "title";
}
