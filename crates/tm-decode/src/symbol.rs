use tm_core::config::{MapConfig, MarkerPolicy};

/// How an interior is turned into a symbol.
///
/// # Example
/// ```
/// use tm_decode::symbol::SymbolRules;
/// let rules = SymbolRules::default();
/// assert_eq!(rules.marker, 'W');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolRules {
    /// Symbol for a blank interior.
    pub empty_symbol: String,
    /// Reserved marker character.
    pub marker: char,
    /// Output for interiors containing the marker.
    pub marker_policy: MarkerPolicy,
}

impl Default for SymbolRules {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}

impl SymbolRules {
    /// Take the decode settings out of a config.
    #[must_use]
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            empty_symbol: config.empty_symbol.clone(),
            marker: config.marker,
            marker_policy: config.marker_policy,
        }
    }
}

/// Decode the 3 interior rows of a tile into its display symbol.
///
/// The rows are concatenated without separator and trimmed. A blank
/// interior gives `rules.empty_symbol`; one containing the marker gives the
/// marker (or the composite label under [`MarkerPolicy::Composite`]);
/// anything else is returned as is.
///
/// # Example
/// ```
/// use tm_decode::symbol::{SymbolRules, decode_symbol};
/// let rules = SymbolRules::default();
/// assert_eq!(decode_symbol(["   ", "   ", "   "], &rules), ".");
/// assert_eq!(decode_symbol(["   ", " A ", "   "], &rules), "A");
/// assert_eq!(decode_symbol(["   ", "5W3", "   "], &rules), "W");
/// ```
#[must_use]
pub fn decode_symbol<S: AsRef<str>>(interior: [S; 3], rules: &SymbolRules) -> String {
    let mut joined = String::with_capacity(9);
    for row in &interior {
        joined.push_str(row.as_ref());
    }
    let stripped = joined.trim();

    if stripped.is_empty() {
        return rules.empty_symbol.clone();
    }
    if stripped.contains(rules.marker) {
        return match rules.marker_policy {
            MarkerPolicy::Override => rules.marker.to_string(),
            MarkerPolicy::Composite => composite_label(stripped, rules.marker),
        };
    }
    stripped.to_string()
}

/// `<left><marker><right>`, where `left` is the text before the first marker
/// and `right` the text between the first and second marker, both trimmed.
///
/// # Example
/// ```
/// use tm_decode::symbol::composite_label;
/// assert_eq!(composite_label("12 W 7", 'W'), "12W7");
/// assert_eq!(composite_label("aWbWc", 'W'), "aWb");
/// ```
#[must_use]
pub fn composite_label(stripped: &str, marker: char) -> String {
    let mut parts = stripped.split(marker);
    let left = parts.next().unwrap_or_default().trim();
    let right = parts.next().unwrap_or_default().trim();
    format!("{left}{marker}{right}")
}
