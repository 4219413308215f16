//! Header row normalization shared by the CSV and Excel decoders.

use std::collections::HashSet;

/// Make a header row usable as row keys.
///
/// - blank headers become `__EMPTY`, `__EMPTY_1`, `__EMPTY_2`, ...
/// - repeated headers get a numeric suffix: `id`, `id_1`, `id_2`, ...
pub(crate) fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut used: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for header in raw {
        let header = header.as_ref();
        let base = if header.trim().is_empty() {
            "__EMPTY"
        } else {
            header
        };

        let mut candidate = base.to_string();
        let mut n = 1usize;
        while used.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::normalize_headers;

    #[test]
    fn blank_and_duplicate_headers_get_unique_names() {
        let out = normalize_headers(["id", "", "id", " ", "name", "id"]);
        assert_eq!(
            out,
            vec!["id", "__EMPTY", "id_1", "__EMPTY_1", "name", "id_2"]
        );
    }

    #[test]
    fn unique_headers_are_unchanged() {
        assert_eq!(normalize_headers(["a", "b"]), vec!["a", "b"]);
    }
}
