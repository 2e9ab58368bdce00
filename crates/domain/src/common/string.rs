//! String conversion utilities.

/// Converts an empty string to `None`, otherwise returns `Some(value)`.
///
/// Display names arrive from query strings and CLI arguments where an
/// empty value means "not supplied".
///
/// # Examples
///
/// ```
/// use sbstats_domain::common::none_if_empty;
///
/// assert_eq!(none_if_empty("Technoblade"), Some("Technoblade"));
/// assert_eq!(none_if_empty(""), None);
/// assert_eq!(none_if_empty(" "), None); // Whitespace counts as empty
/// ```
pub fn none_if_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Strips `prefix` from the start of `value`, ignoring ASCII case.
///
/// Returns `value` unchanged when the prefix is absent.
///
/// # Examples
///
/// ```
/// use sbstats_domain::common::strip_prefix_ignore_case;
///
/// assert_eq!(strip_prefix_ignore_case("SKILL_FARMING", "skill_"), "FARMING");
/// assert_eq!(strip_prefix_ignore_case("farming", "skill_"), "farming");
/// ```
pub fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> &'a str {
    match value.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &value[prefix.len()..],
        _ => value,
    }
}

/// Lower-cased skill id with the `SKILL_` and `experience_skill_` prefixes removed.
///
/// # Examples
///
/// ```
/// use sbstats_domain::common::canonical_skill_id;
///
/// assert_eq!(canonical_skill_id("SKILL_FARMING"), "farming");
/// assert_eq!(canonical_skill_id("experience_skill_RUNECRAFTING"), "runecrafting");
/// assert_eq!(canonical_skill_id("Mining"), "mining");
/// ```
pub fn canonical_skill_id(key: &str) -> String {
    let key = strip_prefix_ignore_case(key, "SKILL_");
    strip_prefix_ignore_case(key, "experience_skill_").to_lowercase()
}

/// Replaces underscores with spaces and upper-cases the first letter of each word.
///
/// Letters that are not at the start of a word are left as they are.
///
/// # Examples
///
/// ```
/// use sbstats_domain::common::title_case;
///
/// assert_eq!(title_case("trophy_fish"), "Trophy Fish");
/// assert_eq!(title_case("farming"), "Farming");
/// ```
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars().map(|c| if c == '_' { ' ' } else { c }) {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

/// Upper-cases only the first character.
///
/// # Examples
///
/// ```
/// use sbstats_domain::common::capitalize_first;
///
/// assert_eq!(capitalize_first("zombie"), "Zombie");
/// assert_eq!(capitalize_first(""), "");
/// ```
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
