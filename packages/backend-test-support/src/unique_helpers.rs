use ulid::Ulid;

/// `{prefix}-{ulid}`, unique across tests and runs.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("dish");
/// assert_ne!(a, unique_str("dish"));
/// assert!(a.starts_with("dish-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// A unique, lowercase email address on the reserved `.test` TLD.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("diner");
/// assert!(email.starts_with("diner-"));
/// assert!(email.ends_with("@bistro.test"));
/// assert_eq!(email, email.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@bistro.test", Ulid::new().to_string().to_lowercase())
}
