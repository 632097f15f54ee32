/// Serde helper for `#[serde(default = "crate::serde_defaults::default_locale")]`.
///
/// Prefer using the fully-qualified path in serde attributes to avoid having to import this symbol
/// into individual modules.
pub(crate) fn default_locale() -> String {
    crate::DEFAULT_LOCALE.to_string()
}
