//! Field-name conversion between the API's wire convention and Rust's.
//!
//! The College Football Data API emits `camelCase` keys while every entity in
//! this crate uses `snake_case`. The two functions here are near-inverses of
//! each other: for any `snake_case` string whose segments are separated by a
//! single underscore, `to_idiomatic_case(&to_wire_case(s)) == s`, except where
//! two one-letter segments meet (`x_y_z` reads back as the acronym `x_yz`).
//!
//! An underscore that is followed by something other than a letter (for
//! example `alt_name_1`) cannot be expressed by a case change, so it is kept
//! as-is on the wire side.

/// Converts a `snake_case` name into `camelCase`.
///
/// Each `_` that precedes a letter is removed and that letter is uppercased.
/// The first character is lowercased. Strings without underscores are returned
/// unchanged apart from that first character.
///
/// ```
/// use cfb_data_sdk::case::to_wire_case;
///
/// assert_eq!(to_wire_case("season_type"), "seasonType");
/// assert_eq!(to_wire_case("year"), "year");
/// ```
#[must_use]
pub fn to_wire_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    let mut upper_next = false;

    while let Some(ch) = chars.next() {
        if ch == '_' {
            match chars.peek() {
                Some(next) if next.is_alphabetic() && !out.is_empty() => upper_next = true,
                Some(_) if !out.is_empty() => out.push(ch),
                _ => {}
            }
            continue;
        }

        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Converts a `camelCase` or `PascalCase` name into `snake_case`.
///
/// An underscore is inserted before every uppercase letter that follows a
/// lowercase letter or digit. A run of uppercase letters (an acronym) is
/// treated as one word, split only where the run hands over to a lowercase
/// letter, so `gameID` becomes `game_id` and `HTTPServer` becomes
/// `http_server`. Hyphens and spaces are treated as separators.
///
/// ```
/// use cfb_data_sdk::case::to_idiomatic_case;
///
/// assert_eq!(to_idiomatic_case("homeLineScores"), "home_line_scores");
/// assert_eq!(to_idiomatic_case("venueID"), "venue_id");
/// ```
#[must_use]
pub fn to_idiomatic_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch == '-' || ch == ' ' {
            push_separator(&mut out);
            continue;
        }

        if ch.is_uppercase() {
            let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();
            let next = chars.get(i + 1).copied();

            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary {
                push_separator(&mut out);
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}

fn push_separator(out: &mut String) {
    if !out.is_empty() && !out.ends_with('_') {
        out.push('_');
    }
}
