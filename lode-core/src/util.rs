/// Formats a long piece of text (usually a query) keeping only its first 497 bytes.
///
/// The cut never splits a UTF-8 character.
#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        match &$query {
            query => {
                let query: &str = ::std::convert::AsRef::<str>::as_ref(query);
                let mut end = ::std::cmp::min(query.len(), 497);
                while !query.is_char_boundary(end) {
                    end -= 1;
                }
                format!(
                    "{}{}\n",
                    query[..end].trim_end(),
                    if query.len() > 497 { "..." } else { "" },
                )
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn truncate_short() {
        assert_eq!(truncate_long!("SELECT 1;  "), "SELECT 1;\n");
    }

    #[test]
    fn truncate_long_query() {
        let query = format!("SELECT '{}';", "x".repeat(1000));
        let truncated = truncate_long!(query);
        assert!(truncated.ends_with("...\n"));
        assert_eq!(truncated.len(), 497 + 4);
    }

    #[test]
    fn truncate_multibyte() {
        let query = "é".repeat(400);
        let truncated = truncate_long!(query);
        assert!(truncated.ends_with("...\n"));
        assert!(truncated.starts_with("éé"));
    }
}
