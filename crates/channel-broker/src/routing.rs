//! Topic routing key pattern matching
//!
//! Binding patterns follow topic-exchange semantics over dot-separated
//! keys: `*` matches exactly one word, `#` matches zero or more words.
//! Streams deliver every entry to the group, so the pattern is applied
//! per delivery; non-matching deliveries are acknowledged without
//! dispatch.

/// Check whether a routing key matches a binding pattern
#[must_use]
pub fn topic_matches(pattern: &str, routing_key: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('.').collect();
    let key: Vec<&str> = routing_key.split('.').collect();
    matches_at(&pattern, &key)
}

fn matches_at(pattern: &[&str], key: &[&str]) -> bool {
    match pattern.split_first() {
        None => key.is_empty(),
        Some((&"#", rest)) => {
            // `#` absorbs zero or more words; try every split point
            (0..=key.len()).any(|skip| matches_at(rest, &key[skip..]))
        }
        Some((&"*", rest)) => !key.is_empty() && matches_at(rest, &key[1..]),
        Some((word, rest)) => {
            key.first() == Some(word) && matches_at(rest, &key[1..])
        }
    }
}
