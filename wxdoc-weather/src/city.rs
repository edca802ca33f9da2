//! City name clean-up.

/// Strip everything but word characters, whitespace, `-`, `.` and `,`, trim
/// ` .,-?` from both ends and collapse whitespace runs to one space.
///
/// Interior commas survive so a country qualifier stays recognisable.
///
/// ```
/// use wxdoc_weather::sanitize_city;
///
/// assert_eq!(sanitize_city("  New   Delhi?! "), "New Delhi");
/// assert_eq!(sanitize_city("St. Louis"), "St. Louis");
/// assert_eq!(sanitize_city("Paris,FR."), "Paris,FR");
/// ```
pub fn sanitize_city(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace() || matches!(*c, '-' | '.' | ','))
        .collect();

    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_matches(|c: char| matches!(c, ' ' | '.' | ',' | '-' | '?')).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_trailing_dots() {
        assert_eq!(sanitize_city("Pune?"), "Pune");
        assert_eq!(sanitize_city("São Paulo..."), "São Paulo");
        assert_eq!(sanitize_city("Winston-Salem"), "Winston-Salem");
        assert_eq!(sanitize_city("'Mumbai',"), "Mumbai");
        assert_eq!(sanitize_city("Springfield, US"), "Springfield, US");
    }

    #[test]
    fn blank_input_stays_blank() {
        assert_eq!(sanitize_city(""), "");
        assert_eq!(sanitize_city(" ?!. "), "");
    }
}
