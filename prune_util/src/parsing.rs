use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Invalid key-value list: {0}")]
    InvalidKeyVal(String),
    #[error("Missing key `{0}`")]
    MissingKey(String),
}

type Result<T> = std::result::Result<T, ParsingError>;

pub fn parse_cookie_str(cookie_str: &str) -> Result<HashMap<String, String>> {
    parse_kv_list(cookie_str, ';')
}

/// Take a required value out of a parsed key-value map.
pub fn take_key(map: &mut HashMap<String, String>, key: &str) -> Result<String> {
    map.remove(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ParsingError::MissingKey(key.to_string()))
}

/// Parse a list of key-value pairs separated by `sep`. Usually from a cookie string.
/// Segments without `=` are ignored, an empty key is an error.
fn parse_kv_list(s: &str, sep: char) -> Result<HashMap<String, String>> {
    let mut results = HashMap::new();
    for param in s.split(sep) {
        if param.contains('=') {
            let mut parts = param.splitn(2, '=');
            let key = parts.next().ok_or(ParsingError::InvalidKeyVal(param.to_string()))?;
            let value = parts.next().ok_or(ParsingError::InvalidKeyVal(param.to_string()))?;
            if key.trim().is_empty() {
                return Err(ParsingError::InvalidKeyVal(param.to_string()));
            }
            results.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_str() {
        let map = parse_cookie_str("ct0=abc; auth_token=def ;lang=en").unwrap();
        assert_eq!(map.get("ct0").map(String::as_str), Some("abc"));
        assert_eq!(map.get("auth_token").map(String::as_str), Some("def"));
        assert_eq!(map.get("lang").map(String::as_str), Some("en"));
    }

    #[test]
    fn test_parse_value_with_equals() {
        let map = parse_cookie_str("a=b=c; d=").unwrap();
        assert_eq!(map["a"], "b=c");
        assert_eq!(map["d"], "");
    }

    #[test]
    fn test_empty_key() {
        assert!(parse_cookie_str("=oops").is_err());
    }

    #[test]
    fn test_take_key() {
        let mut map = parse_cookie_str("ct0=abc; auth_token=").unwrap();
        assert_eq!(take_key(&mut map, "ct0").unwrap(), "abc");
        assert_eq!(
            take_key(&mut map, "auth_token"),
            Err(ParsingError::MissingKey("auth_token".to_string()))
        );
    }
}
