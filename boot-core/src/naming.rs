//! Naming rules shared by every template.
//!
//! All functions are pure and total: the same input always yields the same
//! identifier, so sibling artifacts of one resource never disagree on a name.

/// Words whose plural form is the word itself.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
    "metadata",
];

/// Irregular singular -> plural pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("ox", "oxen"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("zombie", "zombies"),
];

/// Pluralize an English word (e.g., "Widget" -> "Widgets", "Policy" -> "Policies").
///
/// Irregular nouns and uncountable words are matched against the last
/// CamelCase segment, so "SalesPerson" becomes "SalesPeople". The casing of
/// the input is preserved.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let (head, tail) = split_last_segment(word);
    let tail_lower = tail.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&tail_lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULAR
        .iter()
        .find(|(singular, _)| *singular == tail_lower)
    {
        return format!("{}{}", head, match_case(tail, plural));
    }

    // ASCII lowercasing keeps byte offsets identical to `word`
    let lower = word.to_ascii_lowercase();
    let (keep, suffix) = plural_suffix(&lower);
    format!("{}{}", &word[..keep], suffix)
}

/// Upper-case the first letter of every word (e.g., "v1alpha1" -> "V1alpha1").
///
/// A word starts after any character that is not a letter, digit or underscore.
pub fn to_title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut at_boundary = true;
    for c in s.chars() {
        if at_boundary {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_boundary = !(c.is_alphanumeric() || c == '_');
    }
    result
}

/// Lower-case a string (e.g., "Widget" -> "widget").
pub fn to_lower_case(s: &str) -> String {
    s.to_lowercase()
}

/// Upper-case only the first character (e.g., "apps" -> "Apps").
pub fn to_upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Split a CamelCase word before its last segment ("SalesPerson" -> ("Sales", "Person")).
fn split_last_segment(word: &str) -> (&str, &str) {
    let mut split = 0;
    let mut prev_lower = false;
    for (i, c) in word.char_indices() {
        if c.is_uppercase() && prev_lower {
            split = i;
        }
        prev_lower = c.is_lowercase();
    }
    word.split_at(split)
}

/// Apply the casing of `original` to `replacement`.
fn match_case(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(first) if first.is_uppercase() => {
            if original.len() > 1 && !original.chars().any(char::is_lowercase) {
                replacement.to_uppercase()
            } else {
                to_upper_first(replacement)
            }
        }
        _ => replacement.to_string(),
    }
}

/// Returns how many bytes of the singular to keep and the suffix to append.
fn plural_suffix(lower: &str) -> (usize, &'static str) {
    let len = lower.len();
    let ends = |suffix: &str| lower.ends_with(suffix);

    if ends("quiz") {
        return (len, "zes");
    }
    if ends("matrix") || ends("vertex") || ends("index") {
        return (len - 2, "ices");
    }
    if ends("sis") {
        return (len - 2, "es");
    }
    if ends("tum") || ends("ium") {
        return (len - 2, "a");
    }
    if ends("buffalo") || ends("tomato") {
        return (len, "es");
    }
    if ends("octopus") || ends("virus") {
        return (len - 2, "i");
    }
    if ends("alias") || ends("status") || ends("bus") {
        return (len, "es");
    }
    if ends("x") || ends("ch") || ends("ss") || ends("sh") {
        return (len, "es");
    }
    if ends_with_consonant_y(lower) {
        return (len - 1, "ies");
    }
    if ends("fe") && !ends("ffe") {
        return (len - 2, "ves");
    }
    if ends("lf") || ends("rf") {
        return (len - 1, "ves");
    }
    if ends("s") {
        return (len, "");
    }
    (len, "s")
}

fn ends_with_consonant_y(lower: &str) -> bool {
    if lower.ends_with("quy") {
        return true;
    }
    let mut rev = lower.chars().rev();
    match (rev.next(), rev.next()) {
        (Some('y'), Some(prev)) => !"aeiouy".contains(prev),
        _ => false,
    }
}
