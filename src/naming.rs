//! Turning catalog asset names into schema keys.

use crate::types::NamingPolicy;

/// Apply `policy` to an asset name.
pub fn schema_key(name: &str, policy: NamingPolicy) -> String {
    match policy {
        NamingPolicy::Raw => name.to_string(),
        NamingPolicy::Camel => capitalize(&to_camel_case(name)),
        NamingPolicy::CamelSingular => singularize(&capitalize(&to_camel_case(name))),
    }
}

/// `stop_times` -> `stopTimes`.
///
/// An underscore followed by a word character is dropped and the character
/// upper-cased. A trailing underscore is kept.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(&next) = chars.peek() {
                if next.is_alphanumeric() || next == '_' {
                    chars.next();
                    out.extend(next.to_uppercase());
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Upper-case the first character, leave the rest alone.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reduce a trailing English plural to its singular form.
///
/// Only the end of the word is inspected, so `StopTimes` becomes `StopTime`
/// while `FeedInfo` and `Agency` are unchanged.
pub fn singularize(s: &str) -> String {
    if let Some(stem) = s.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    for suffix in ["sses", "ches", "shes", "xes"] {
        if s.ends_with(suffix) {
            return s[..s.len() - 2].to_string();
        }
    }
    if s.ends_with('s') && !s.ends_with("ss") && s.len() > 1 {
        return s[..s.len() - 1].to_string();
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_basic() {
        assert_eq!(to_camel_case("stop_times"), "stopTimes");
        assert_eq!(to_camel_case("fare_leg_rules"), "fareLegRules");
        assert_eq!(to_camel_case("agency"), "agency");
    }

    #[test]
    fn camel_case_edge_underscores() {
        assert_eq!(to_camel_case("route_"), "route_");
        assert_eq!(to_camel_case("a__b"), "a_b");
        assert_eq!(to_camel_case("level_2"), "level2");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn capitalize_first_only() {
        assert_eq!(capitalize("stopTimes"), "StopTimes");
        assert_eq!(capitalize("URL"), "URL");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn singularize_rules() {
        assert_eq!(singularize("Stops"), "Stop");
        assert_eq!(singularize("StopTimes"), "StopTime");
        assert_eq!(singularize("Frequencies"), "Frequency");
        assert_eq!(singularize("Shapes"), "Shape");
        assert_eq!(singularize("Matches"), "Match");
        assert_eq!(singularize("Boxes"), "Box");
        assert_eq!(singularize("Passes"), "Pass");
        assert_eq!(singularize("Access"), "Access");
        assert_eq!(singularize("FeedInfo"), "FeedInfo");
        assert_eq!(singularize("Agency"), "Agency");
        assert_eq!(singularize("s"), "s");
    }

    #[test]
    fn schema_key_policies() {
        assert_eq!(schema_key("stop_times", NamingPolicy::Raw), "stop_times");
        assert_eq!(schema_key("stop_times", NamingPolicy::Camel), "StopTimes");
        assert_eq!(
            schema_key("stop_times", NamingPolicy::CamelSingular),
            "StopTime"
        );
        assert_eq!(schema_key("feed_info", NamingPolicy::CamelSingular), "FeedInfo");
    }
}
