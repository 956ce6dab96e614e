//! bun.lock
//!
//! bun writes JSONC (line comments, trailing commas). `packages` is either a
//! list of `{name, version}` records or an object keyed by package, whose
//! values are records or bun's tuple arrays (`["name@version", "", {...}, "sha512-..."]`).

use super::{ParsedEntry, split_name_version};
use crate::error::ParseError;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

#[derive(Debug, Deserialize)]
struct BunLock {
    packages: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct PackageRecord {
    name: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeyedValue {
    Tuple(Vec<Value>),
    Record(PackageRecord),
}

enum Packages<'a> {
    List(&'a [Value]),
    Keyed(&'a Map<String, Value>),
}

impl<'a> Packages<'a> {
    fn classify(value: Option<&'a Value>) -> Result<Self, ParseError> {
        match value {
            Some(Value::Array(items)) => Ok(Packages::List(items)),
            Some(Value::Object(map)) => Ok(Packages::Keyed(map)),
            Some(_) => Err(ParseError::Shape("`packages` is neither an array nor an object")),
            None => Err(ParseError::Shape("missing `packages` field")),
        }
    }
}

pub(super) fn parse(text: &str) -> Result<Vec<ParsedEntry>, ParseError> {
    let lock: BunLock = match serde_json::from_str(text) {
        Ok(lock) => lock,
        Err(e) => {
            trace!(error = %e, "strict JSON parse failed, retrying as JSONC");
            serde_json::from_str(&strip_jsonc(text))?
        }
    };

    let entries = match Packages::classify(lock.packages.as_ref())? {
        Packages::List(items) => items.iter().filter_map(list_entry).collect(),
        Packages::Keyed(map) => map
            .iter()
            .filter_map(|(key, value)| keyed_entry(key, value))
            .collect(),
    };

    Ok(entries)
}

fn list_entry(value: &Value) -> Option<ParsedEntry> {
    let record = PackageRecord::deserialize(value).ok()?;
    let name = record.name.filter(|n| !n.is_empty())?;
    let version = record.version.filter(|v| !v.is_empty())?;
    let raw_key = format!("{name}@{version}");
    Some(ParsedEntry::new(name, version, raw_key))
}

fn keyed_entry(key: &str, value: &Value) -> Option<ParsedEntry> {
    let (key_name, key_version) = match split_name_version(key) {
        Some((name, version)) => (name, Some(version)),
        None => (key, None),
    };

    let (name, version) = match KeyedValue::deserialize(value) {
        Ok(KeyedValue::Tuple(items)) => {
            match items
                .first()
                .and_then(Value::as_str)
                .and_then(split_name_version)
            {
                Some((name, version)) => (name.to_string(), version.to_string()),
                None => (key_name.to_string(), key_version?.to_string()),
            }
        }
        Ok(KeyedValue::Record(record)) => (
            record
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| key_name.to_string()),
            record
                .version
                .filter(|v| !v.is_empty())
                .or_else(|| key_version.map(String::from))?,
        ),
        Err(_) => (key_name.to_string(), key_version?.to_string()),
    };

    if name.is_empty() {
        trace!(key, "skipping bun entry without name");
        return None;
    }
    Some(ParsedEntry::new(name, version, key))
}

/// Turn JSONC into JSON: drop `//` line comments and trailing commas outside strings.
///
/// A `//` only starts a comment at line start or after whitespace.
fn strip_jsonc(text: &str) -> String {
    strip_trailing_commas(&strip_line_comments(text))
}

fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == '/'
            && chars.peek() == Some(&'/')
            && prev.is_none_or(char::is_whitespace)
        {
            while chars.next_if(|&next| next != '\n').is_some() {}
            prev = Some(c);
            continue;
        }

        out.push(c);
        prev = Some(c);
    }

    out
}

fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (index, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ',' && text[index + 1..].trim_start().starts_with(['}', ']']) {
            continue;
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VersionSet;

    fn versions(text: &str) -> VersionSet {
        parse(text).unwrap_or_default().into_iter().collect()
    }

    #[test]
    fn test_bun_text_lockfile() {
        let set = versions(
            r#"{
  "lockfileVersion": 1,
  "workspaces": {
    "": {
      "name": "app",
      "dependencies": {
        "lodash": "^4.17.21",
      },
    },
  },
  "packages": {
    "lodash": ["lodash@4.17.21", "", {}, "sha512-v2kDEe57lecTulaDIuNTPy3Ry4gLGJ6Z1O3vE1krgXZNrsQ+LFTGHVxVjcXPs17LhbZVGedAJv8XZ1tvj5FvSg=="],
    "@types/node": ["@types/node@20.4.1", "", {}, "sha512-x"],
    "a/debug": ["debug@2.6.9", "", { "dependencies": { "ms": "2.0.0" } }, "sha512-y"],
  }
}
"#,
        );

        assert_eq!(set.len(), 3);
        assert!(set.contains("lodash", "4.17.21"));
        assert!(set.contains("@types/node", "20.4.1"));
        assert!(set.contains("debug", "2.6.9"));
    }

    #[test]
    fn test_array_of_records() {
        let set = versions(
            r#"{"packages": [
  {"name": "react", "version": "18.2.0"},
  {"name": "react"},
  {"version": "1.0.0"},
  {"name": "@scope/x", "version": "0.1.0"}
]}"#,
        );

        assert_eq!(set.len(), 2);
        assert!(set.contains("react", "18.2.0"));
        assert!(set.contains("@scope/x", "0.1.0"));
    }

    #[test]
    fn test_keyed_records_derive_from_key() {
        let set = versions(
            r#"{"packages": {
  "left-pad@1.3.0": {},
  "@scope/name@2.0.0": {"integrity": "sha512-x"},
  "explicit@0.0.1": {"name": "renamed", "version": "0.0.2"},
  "bare": {"version": "5.0.0"},
  "nothing": {}
}}"#,
        );

        assert!(set.contains("left-pad", "1.3.0"));
        assert!(set.contains("@scope/name", "2.0.0"));
        assert!(set.contains("renamed", "0.0.2"));
        assert!(set.contains("bare", "5.0.0"));
        assert!(set.get("nothing").is_none());
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_jsonc_comments() {
        let set = versions(
            r#"{
  // generated by bun
  "packages": {
    "x": ["x@1.0.0", "https://registry.example.com//x.tgz"], // trailing note
    "y": ["y@// not a comment"]
  }
}"#,
        );

        assert!(set.contains("x", "1.0.0"));
        assert!(set.contains("y", "// not a comment"));
    }

    #[test]
    fn test_strip_line_comments_respects_strings() {
        let stripped = strip_line_comments("{\"url\": \"a // b\"} // c\n// d\n");
        assert_eq!(stripped, "{\"url\": \"a // b\"} \n\n");

        let escaped = strip_line_comments(r#"{"q": "say \"// hi\""}"#);
        assert_eq!(escaped, r#"{"q": "say \"// hi\""}"#);
    }

    #[test]
    fn test_strip_trailing_commas() {
        assert_eq!(strip_trailing_commas("[1, 2, ]"), "[1, 2 ]");
        assert_eq!(strip_trailing_commas("{\"a\": \",}\",\n}"), "{\"a\": \",}\"\n}");
    }

    #[test]
    fn test_shape_mismatch() {
        assert!(matches!(parse("{}"), Err(ParseError::Shape(_))));
        assert!(matches!(
            parse(r#"{"packages": "nope"}"#),
            Err(ParseError::Shape(_))
        ));
        assert!(matches!(parse("{{{"), Err(ParseError::Json(_))));
    }
}
