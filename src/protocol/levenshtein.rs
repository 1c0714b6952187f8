// "Did you mean" support for named procedure arguments: find the declared
// field name with the minimal edit distance to a misspelled argument name.

// Returns the projection of the item whose projected string has the smallest
// Levenshtein distance to `target`; ties are resolved in favor of the item
// that is declared first. Returns an empty string for an empty item list.
pub(crate) fn min_string<T, F>(
    items: &[T],
    project: F,
    target: &str,
    case_sensitive: bool,
) -> String
where
    F: Fn(&T) -> &str,
{
    let target = if case_sensitive {
        target.to_string()
    } else {
        target.to_lowercase()
    };
    let mut min: Option<(usize, &str)> = None;
    for item in items {
        let candidate = project(item);
        let d = if case_sensitive {
            distance(candidate, &target)
        } else {
            distance(&candidate.to_lowercase(), &target)
        };
        if min.map_or(true, |(min_d, _)| d < min_d) {
            min = Some((d, candidate));
        }
    }
    min.map(|(_, s)| s.to_string()).unwrap_or_default()
}

// Levenshtein distance, char-based, with the usual two-row DP table.
fn distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0_usize; b_chars.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let subst = prev[j] + usize::from(ca != *cb);
            curr[j + 1] = subst.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b_chars.len()]
}

#[cfg(test)]
mod test {
    use super::{distance, min_string};

    #[test]
    fn test_distance() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("COUNT", "CONT"), 1);
    }

    #[test]
    fn test_min_string_is_case_insensitive() {
        let names = ["COUNT", "AMOUNT", "ID"];
        assert_eq!(min_string(&names, |s| s, "cont", false), "COUNT");
        assert_eq!(min_string(&names, |s| s, "id", false), "ID");
    }

    #[test]
    fn test_ties_resolve_to_declaration_order() {
        let names = ["AB", "AC"];
        // "AD" has distance 1 to both candidates
        assert_eq!(min_string(&names, |s| s, "AD", false), "AB");
    }

    #[test]
    fn test_empty_candidates() {
        let names: [&str; 0] = [];
        assert_eq!(min_string(&names, |s| s, "X", false), "");
    }
}
