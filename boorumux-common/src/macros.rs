/// Joins a tag list with spaces, the separator every supported API expects
/// before the query string is url-encoded.
#[macro_export]
macro_rules! join_tags {
    ($x:expr) => {{
        let tl = $x.join(" ");
        tl
    }};
}

/// Pulls the file extension out of a url, ignoring any query string or
/// fragment. Evaluates to an empty string when there is none.
#[macro_export]
macro_rules! extract_ext_from_url {
    ($x:expr) => {{
        let path = $x.split(['?', '#']).next().unwrap_or_default();
        let file = path.rsplit('/').next().unwrap_or_default();
        match file.rsplit_once('.') {
            Some((_, ext)) => ext.to_string(),
            None => String::new(),
        }
    }};
}

#[cfg(test)]
mod test {
    #[test]
    fn ext_from_url() {
        assert_eq!(
            extract_ext_from_url!("https://img.example.test/images/ab/cd/abcd.png"),
            "png"
        );
        assert_eq!(
            extract_ext_from_url!("https://img.example.test/abcd.webm?token=x.y"),
            "webm"
        );
        assert_eq!(extract_ext_from_url!("https://example.test/no-ext"), "");
        assert_eq!(extract_ext_from_url!(""), "");
    }

    #[test]
    fn joined_tags() {
        let tags = vec!["1girl".to_string(), "-solo".to_string()];
        assert_eq!(join_tags!(tags), "1girl -solo");
    }
}
