//! Environment snapshot.
//!
//! A flat key to value map captured once and handed to the walker, so that a
//! load never observes the process environment changing underneath it.

use std::collections::HashMap;

/// Immutable key/value view of an environment.
///
/// Keys are matched case-sensitively and verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    ///
    /// Entries whose key or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| {
                Some((key.into_string().ok()?, value.into_string().ok()?))
            })
            .collect()
    }

    /// Build a snapshot from `KEY=VALUE` entries.
    ///
    /// Each entry is split on its first `=`, so values may contain further
    /// `=` characters. Entries without any `=` are ignored. Later entries
    /// replace earlier ones with the same key.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| {
                line.as_ref()
                    .split_once('=')
                    .map(|(key, value)| (key.to_owned(), value.to_owned()))
            })
            .collect()
    }

    /// Raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_equals_sign() {
        let env = Environment::from_lines([
            "URI=postgres://u:p@h/db?sslmode=disable",
            "EMPTY=",
        ]);

        assert_eq!(env.get("URI"), Some("postgres://u:p@h/db?sslmode=disable"));
        assert_eq!(env.get("EMPTY"), Some(""));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn ignores_entries_without_separator() {
        let env = Environment::from_lines(["NOPE", "A=1"]);

        assert_eq!(env.get("NOPE"), None);
        assert_eq!(env.get("A"), Some("1"));
        assert!(!env.is_empty());
        assert!(Environment::from_lines(["NOPE"]).is_empty());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let env: Environment = [("port", "1")].into_iter().collect();

        assert_eq!(env.get("port"), Some("1"));
        assert_eq!(env.get("PORT"), None);
    }

    #[test]
    fn captures_process_environment() {
        let env = Environment::from_process();

        assert_eq!(env.get("PATH"), std::env::var("PATH").ok().as_deref());
    }
}
