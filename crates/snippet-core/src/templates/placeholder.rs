//! Placeholder rewriting from live-template syntax to snippet syntax
//!
//! `$END$` becomes the final cursor `$0`, `$SELECTION$` becomes
//! `$TM_SELECTED_TEXT`, and every other `$NAME$` becomes `${N:NAME}` where `N`
//! is the rank of the first appearance of `NAME` in the same template.

use regex::{Captures, Regex};
use std::sync::OnceLock;

pub const END_MARKER: &str = "END";
pub const SELECTION_MARKER: &str = "SELECTION";

pub const FINAL_CURSOR: &str = "$0";
pub const SELECTED_TEXT: &str = "$TM_SELECTED_TEXT";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$(\w+)\$").expect("placeholder pattern is a valid regex"))
}

fn is_marker(name: &str) -> bool {
    name == END_MARKER || name == SELECTION_MARKER
}

/// Variable names of one template value, ranked by first appearance (1-based)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderOrder {
    names: Vec<String>,
}

impl PlaceholderOrder {
    /// Collect the distinct variable names of `value`, left to right
    pub fn collect(value: &str) -> Self {
        let mut names: Vec<String> = Vec::new();
        for caps in placeholder_pattern().captures_iter(value) {
            let name = &caps[1];
            if !is_marker(name) && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        Self { names }
    }

    pub fn rank(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name).map(|idx| idx + 1)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Rewrite every placeholder of `value`
///
/// With `renumber` off only the two markers change and all other `$NAME$`
/// tokens are left as they are.
pub fn convert_placeholders(value: &str, renumber: bool) -> String {
    let order = if renumber {
        PlaceholderOrder::collect(value)
    } else {
        PlaceholderOrder::default()
    };

    placeholder_pattern()
        .replace_all(value, |caps: &Captures| {
            let name = &caps[1];
            match name {
                END_MARKER => FINAL_CURSOR.to_string(),
                SELECTION_MARKER => SELECTED_TEXT.to_string(),
                _ => match order.rank(name) {
                    Some(rank) => format!("${{{}:{}}}", rank, name),
                    None => caps[0].to_string(),
                },
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rank_follows_first_appearance() {
        let order = PlaceholderOrder::collect("$B$ then $A$ then $B$");
        assert_eq!(order.rank("B"), Some(1));
        assert_eq!(order.rank("A"), Some(2));
        assert_eq!(order.len(), 2);
        assert_eq!(
            convert_placeholders("$B$ then $A$ then $B$", true),
            "${1:B} then ${2:A} then ${1:B}"
        );
    }

    #[test]
    fn test_markers_are_never_ranked() {
        let order = PlaceholderOrder::collect("$END$ $X$ $SELECTION$ $Y$ $END$");
        assert_eq!(order.names(), ["X", "Y"]);
        assert_eq!(order.rank(END_MARKER), None);
        assert_eq!(order.rank(SELECTION_MARKER), None);

        assert_eq!(
            convert_placeholders("$SELECTION$ $X$ $END$", true),
            "$TM_SELECTED_TEXT ${1:X} $0"
        );
    }

    #[test]
    fn test_for_loop_template() {
        assert_eq!(
            convert_placeholders("for ($i$ = 0; $i$ < $N$; $i$++) { $END$ }", true),
            "for (${1:i} = 0; ${1:i} < ${2:N}; ${1:i}++) { $0 }"
        );
    }

    #[test]
    fn test_renumbering_disabled_leaves_variables() {
        assert_eq!(
            convert_placeholders("$TYPE$ $NAME$ = $SELECTION$;$END$", false),
            "$TYPE$ $NAME$ = $TM_SELECTED_TEXT;$0"
        );
    }

    #[test]
    fn test_marker_adjacent_text_is_not_rescanned() {
        // The "$0" produced for $END$ must not pair with the following "$"
        assert_eq!(convert_placeholders("$END$foo$", true), "$0foo$");
    }

    #[test]
    fn test_lone_dollars_untouched() {
        assert_eq!(convert_placeholders("cost: $5 and $ sign", true), "cost: $5 and $ sign");
        assert_eq!(convert_placeholders("$$", true), "$$");
    }

    #[test]
    fn test_non_ascii_names() {
        assert_eq!(convert_placeholders("$이름$ $이름$", true), "${1:이름} ${1:이름}");
    }

    proptest! {
        #[test]
        fn prop_conversion_is_deterministic(value in "[a-c$ ]{0,40}", renumber in any::<bool>()) {
            prop_assert_eq!(
                convert_placeholders(&value, renumber),
                convert_placeholders(&value, renumber)
            );
        }

        #[test]
        fn prop_same_name_same_rank(names in proptest::collection::vec("[A-D]", 1..12)) {
            let value: String = names.iter().map(|n| format!("${n}$ ")).collect();
            let order = PlaceholderOrder::collect(&value);

            let mut first_seen: Vec<&String> = Vec::new();
            for name in &names {
                if !first_seen.contains(&name) {
                    first_seen.push(name);
                }
            }
            for (idx, name) in first_seen.iter().enumerate() {
                prop_assert_eq!(order.rank(name), Some(idx + 1));
            }

            let expected: String = names
                .iter()
                .map(|n| format!("${{{}:{}}} ", order.rank(n).unwrap(), n))
                .collect();
            prop_assert_eq!(convert_placeholders(&value, true), expected);
        }

        #[test]
        fn prop_disabled_mode_only_touches_markers(names in proptest::collection::vec("[A-Z]{1,6}", 0..8)) {
            let value: String = names
                .iter()
                .filter(|n| !is_marker(n))
                .map(|n| format!("x${n}$ "))
                .collect();
            prop_assert_eq!(convert_placeholders(&value, false), value);
        }
    }
}
