//! Panel titles derived from result file names

use std::path::Path;

/// Titles for a set of result files
///
/// The prefix shared by every name is stripped (so `tree_insert.txt` and
/// `tree_search.txt` become `Insert` and `Search`), then the extension, then
/// the remainder is title-cased. A lone file keeps its full file stem.
#[must_use]
pub fn panel_titles<P: AsRef<Path>>(paths: &[P]) -> Vec<String> {
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.as_ref().to_string_lossy().into_owned())
        .collect();

    if let [only] = names.as_slice() {
        let file_name = only.rsplit('/').next().unwrap_or(only);
        return vec![title_case(strip_extension(file_name))];
    }

    let prefix_len = common_prefix(&names).len();
    names
        .iter()
        .map(|name| title_case(strip_extension(&name[prefix_len..])))
        .collect()
}

/// Longest common prefix of `names`, compared character by character
#[must_use]
pub fn common_prefix<S: AsRef<str>>(names: &[S]) -> &str {
    let Some((first, rest)) = names.split_first() else {
        return "";
    };
    let first = first.as_ref();

    let mut end = first.len();
    for other in rest {
        let shared: usize = first
            .chars()
            .zip(other.as_ref().chars())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.len_utf8())
            .sum();
        end = end.min(shared);
    }
    &first[..end]
}

/// Uppercase letters that follow a non-letter, lowercase the rest
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

// Leading dots of the file name do not start an extension.
fn strip_extension(name: &str) -> &str {
    let file_start = name.rfind('/').map_or(0, |i| i + 1);
    let file_name = &name[file_start..];
    match file_name.rfind('.') {
        Some(dot) if file_name[..dot].chars().any(|c| c != '.') => &name[..file_start + dot],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_prefix_is_stripped() {
        let titles = panel_titles(&[
            "tree_insert.txt",
            "tree_search.txt",
            "tree_iterate.txt",
            "tree_delete.txt",
        ]);
        assert_eq!(titles, vec!["Insert", "Search", "Iterate", "Delete"]);
    }

    #[test]
    fn directories_in_prefix_are_stripped() {
        let titles = panel_titles(&["build/dict_insert.txt", "build/dict_search.txt"]);
        assert_eq!(titles, vec!["Insert", "Search"]);
    }

    #[test]
    fn single_file_keeps_stem() {
        assert_eq!(panel_titles(&["out/hash_insert.txt"]), vec!["Hash_Insert"]);
    }

    #[test]
    fn prefix_respects_char_boundaries() {
        assert_eq!(common_prefix(&["añb", "añc"]), "añ");
        assert_eq!(common_prefix(&["é", "e"]), "");
        assert_eq!(common_prefix::<&str>(&[]), "");
    }

    #[test]
    fn title_case_follows_word_boundaries() {
        assert_eq!(title_case("insert"), "Insert");
        assert_eq!(title_case("hash_SEARCH"), "Hash_Search");
        assert_eq!(title_case("b2tree"), "B2Tree");
    }

    #[test]
    fn extension_rules() {
        assert_eq!(strip_extension("insert.txt"), "insert");
        assert_eq!(strip_extension("a.b/insert"), "a.b/insert");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
    }
}
