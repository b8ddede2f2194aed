pub fn truncate_label(label: &str, max_chars: usize) -> String {
    let mut chars = label.char_indices();
    match chars.nth(max_chars) {
        Some((byte_index, _)) => format!("{}…", &label[..byte_index]),
        None => label.to_string(),
    }
}

pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_label_keeps_short_labels() {
        assert_eq!(truncate_label("init", 20), "init");
        assert_eq!(truncate_label("", 20), "");
    }

    #[test]
    fn truncate_label_appends_ellipsis() {
        assert_eq!(
            truncate_label("refactor: split the viewport transform", 20),
            "refactor: split the …"
        );
    }

    #[test]
    fn truncate_label_respects_char_boundaries() {
        assert_eq!(truncate_label("héllo wörld, ünicode", 5), "héllo…");
    }

    #[test]
    fn short_sha_takes_prefix() {
        assert_eq!(short_sha("a1b2c3d4e5f6"), "a1b2c3d");
        assert_eq!(short_sha("abc"), "abc");
    }
}
