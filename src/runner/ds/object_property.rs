/// Property names are plain strings; array indices use their decimal form.
pub type PropertyKey = String;

pub const PROTO_PROPERTY: &str = "__proto__";
pub const PROTOTYPE_PROPERTY: &str = "prototype";
pub const CONSTRUCTOR_PROPERTY: &str = "constructor";
pub const ARGUMENTS_BINDING: &str = "arguments";

/// Canonical decimal forms of integers below 2^32 - 1 are array indices.
pub fn is_array_index(key: &str) -> Option<usize> {
    match key.parse::<u32>() {
        Ok(i) if i < u32::MAX && i.to_string() == key => Some(i as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::is_array_index;

    #[test]
    fn test_is_array_index() {
        assert_eq!(is_array_index("0"), Some(0));
        assert_eq!(is_array_index("12"), Some(12));
        assert_eq!(is_array_index("012"), None);
        assert_eq!(is_array_index("-1"), None);
        assert_eq!(is_array_index("length"), None);
        assert_eq!(is_array_index("4294967294"), Some(4294967294));
        assert_eq!(is_array_index("4294967295"), None);
        assert_eq!(is_array_index("9223372036854775807"), None);
    }
}
