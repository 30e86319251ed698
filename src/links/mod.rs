//! Class name to reference-page links.
//!
//! A [`ClassLinkTable`] is an ordered list of `(class_name, url)` entries with
//! one designated fallback URL. Resolution is an exact, case-sensitive match;
//! a class without an entry gets the fallback, so every detection always has
//! a link.

use serde::Deserialize;
use tracing::debug;

use crate::error::CropmarkError;

const CROP_DISEASE_BASE: &str =
    "http://farmerai.knuit.com.s3-website.ap-northeast-2.amazonaws.com";

/// One `class -> url` row.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LinkEntry {
    pub class: String,
    pub url: String,
}

/// Table layout as written in the configuration file.
#[derive(Debug, Deserialize)]
struct RawLinkTable {
    #[serde(default)]
    entries: Vec<LinkEntry>,
    fallback: String,
}

/// Read-only `class_name -> url` table with a fallback.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLinkTable")]
pub struct ClassLinkTable {
    entries: Vec<LinkEntry>,
    fallback: String,
}

impl TryFrom<RawLinkTable> for ClassLinkTable {
    type Error = CropmarkError;

    fn try_from(raw: RawLinkTable) -> Result<Self, Self::Error> {
        ClassLinkTable::new(
            raw.entries.into_iter().map(|entry| (entry.class, entry.url)),
            raw.fallback,
        )
    }
}

impl ClassLinkTable {
    /// Builds a table, keeping entry order.
    ///
    /// # Errors
    /// Returns [`CropmarkError::ConfigInvalid`] if the fallback, a class name,
    /// or a URL is blank, or if a class name appears twice.
    pub fn new<I, C, U>(entries: I, fallback: impl Into<String>) -> Result<Self, CropmarkError>
    where
        I: IntoIterator<Item = (C, U)>,
        C: Into<String>,
        U: Into<String>,
    {
        let fallback = fallback.into().trim().to_string();
        if fallback.is_empty() {
            return Err(CropmarkError::ConfigInvalid(
                "link table fallback URL is empty".to_string(),
            ));
        }

        let mut table: Vec<LinkEntry> = Vec::new();
        for (class, url) in entries {
            let class = class.into();
            let url = url.into().trim().to_string();
            if class.trim().is_empty() {
                return Err(CropmarkError::ConfigInvalid(
                    "link table entry has an empty class name".to_string(),
                ));
            }
            if url.is_empty() {
                return Err(CropmarkError::ConfigInvalid(format!(
                    "link table entry '{class}' has an empty URL"
                )));
            }
            if table.iter().any(|entry| entry.class == class) {
                return Err(CropmarkError::ConfigInvalid(format!(
                    "link table lists class '{class}' more than once"
                )));
            }
            table.push(LinkEntry { class, url });
        }

        Ok(Self {
            entries: table,
            fallback,
        })
    }

    /// The crop disease table the detection service ships with.
    pub fn crop_disease() -> Self {
        let page = |name: &str| format!("{CROP_DISEASE_BASE}/{name}.html");
        Self {
            entries: [
                ("Pumpkin powdery mildew", "list-3-1"),
                ("Sweet pumpkin spot disease", "list-3-2"),
                ("pepper-mild-mottle-virus", "list-6-1"),
                ("TYLCV", "list-5-2"),
                ("tomato-leaf-mould", "list-5-1"),
                ("Melon-powderymildew", "list-2-1"),
                ("Downy-mildew", "list-2-2"),
                ("cucumber_powdery-mildew", "list-3-5"),
                ("cucumber_downy-mildew", "list-3-1"),
            ]
            .into_iter()
            .map(|(class, name)| LinkEntry {
                class: class.to_string(),
                url: page(name),
            })
            .collect(),
            fallback: page("list-6-2"),
        }
    }

    /// Returns the URL for `class_name`, or the fallback if it has no entry.
    pub fn resolve(&self, class_name: &str) -> &str {
        match self.get(class_name) {
            Some(url) => url,
            None => {
                debug!(class_name, fallback = %self.fallback, "no link entry, using fallback");
                &self.fallback
            }
        }
    }

    /// Returns the URL for `class_name` only if it has its own entry.
    pub fn get(&self, class_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.class == class_name)
            .map(|entry| entry.url.as_str())
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Entries in table order.
    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }
}

impl Default for ClassLinkTable {
    fn default() -> Self {
        Self::crop_disease()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassLinkTable {
        ClassLinkTable::new([("rust", "http://x/1"), ("blight", "http://x/2")], "http://x/0")
            .unwrap()
    }

    #[test]
    fn resolves_exact_matches() {
        let table = sample();
        assert_eq!(table.resolve("rust"), "http://x/1");
        assert_eq!(table.resolve("blight"), "http://x/2");
    }

    #[test]
    fn unknown_class_gets_fallback() {
        let table = sample();
        assert_eq!(table.resolve("mildew"), "http://x/0");
        assert_eq!(table.get("mildew"), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(sample().resolve("Rust"), "http://x/0");
    }

    #[test]
    fn rejects_blank_fallback_and_urls() {
        let err = ClassLinkTable::new([("a", "http://x")], "  ").unwrap_err();
        assert!(matches!(err, CropmarkError::ConfigInvalid(_)));

        let err = ClassLinkTable::new([("a", "")], "http://x/0").unwrap_err();
        assert!(matches!(err, CropmarkError::ConfigInvalid(_)));
    }

    #[test]
    fn rejects_duplicate_classes() {
        let err =
            ClassLinkTable::new([("a", "http://x/1"), ("a", "http://x/2")], "http://x/0").unwrap_err();
        match err {
            CropmarkError::ConfigInvalid(message) => assert!(message.contains("'a'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn crop_disease_table_matches_service_pages() {
        let table = ClassLinkTable::crop_disease();
        assert_eq!(table.entries().len(), 9);
        assert!(table.resolve("TYLCV").ends_with("/list-5-2.html"));
        assert!(table.resolve("cucumber_downy-mildew").ends_with("/list-3-1.html"));
        assert!(table.resolve("Ascochyta-leaf-spot").ends_with("/list-6-2.html"));
        assert_eq!(table.resolve("anything else"), table.fallback());
    }

    #[test]
    fn deserializes_from_yaml_with_validation() {
        let yaml = "entries:\n  - { class: rust, url: 'http://x/1' }\nfallback: 'http://x/0'\n";
        let table: ClassLinkTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.resolve("rust"), "http://x/1");

        let bad = "entries: []\nfallback: ''\n";
        assert!(serde_yaml::from_str::<ClassLinkTable>(bad).is_err());
    }
}
