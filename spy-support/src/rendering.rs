//! Text rendering utilities for human-friendly error messages.
//!
//! Used by the container to describe what a factory returned and to
//! suggest registered identifiers close to a mistyped one.

/// Shortens a fully qualified type name for display.
///
/// ```
/// use spy_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("my_app::services::Logger"), "Logger");
/// assert_eq!(shorten_type_name("alloc::string::String"), "String");
/// assert_eq!(
///     shorten_type_name("alloc::boxed::Box<dyn my_app::Mailer>"),
///     "Box<dyn Mailer>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut segment = String::new();
    let mut chars = full_name.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' => {
                result.push_str(&segment);
                result.push(ch);
                segment.clear();
            }
            _ => segment.push(ch),
        }
    }

    result.push_str(&segment);
    result
}

/// Returns up to `max_suggestions` identifiers from `available` that look
/// like `requested`, best match first.
///
/// Matching is case-insensitive. An identifier qualifies when one contains
/// the other, or when the edit distance is small relative to the length of
/// the requested identifier.
///
/// ```
/// use spy_support::rendering::suggest_similar;
///
/// let registered = ["logger", "mailer", "database"];
/// assert_eq!(suggest_similar("loger", registered, 3), vec!["logger"]);
/// assert!(suggest_similar("queue", registered, 3).is_empty());
/// ```
pub fn suggest_similar<'a, I>(requested: &str, available: I, max_suggestions: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    if max_suggestions == 0 {
        return Vec::new();
    }

    let requested_lower = requested.to_lowercase();
    let budget = (requested_lower.chars().count() / 3).max(1);

    let mut scored: Vec<(usize, &str)> = available
        .into_iter()
        .filter_map(|name| {
            let name_lower = name.to_lowercase();
            if name_lower == requested_lower {
                return Some((0, name));
            }

            let distance = edit_distance(&requested_lower, &name_lower);
            if distance <= budget {
                return Some((distance, name));
            }

            // Substring hits rank after close typos.
            if !requested_lower.is_empty()
                && (name_lower.contains(&requested_lower) || requested_lower.contains(&name_lower))
            {
                return Some((budget + 1, name));
            }

            None
        })
        .collect();

    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
