//! Category autocomplete index.
//!
//! Categories arrive once at startup as `{title, alias}` pairs. Each title is
//! normalized into a *clean* key (ASCII alphanumerics only, lowercased) and
//! inserted into a character trie. Every trie node keeps the ids of all
//! categories whose key passes through it, so a prefix lookup is a walk down
//! the query followed by a slice of that node's id list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A category as delivered by the category source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCategory {
    pub title: String,
    pub alias: String,
}

/// A category with its normalized lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub alias: String,
    pub title: String,
    pub clean: String,
}

impl Category {
    #[must_use]
    pub fn from_raw(raw: RawCategory) -> Self {
        Self {
            clean: clean_title(&raw.title),
            title: raw.title,
            alias: raw.alias,
        }
    }

    /// The category selected before the user types anything.
    #[must_use]
    pub fn restaurants() -> Self {
        Self {
            alias: "restaurants".to_string(),
            title: "Restaurants".to_string(),
            clean: "restaurants".to_string(),
        }
    }
}

/// Strips everything outside `[A-Za-z0-9]` and lowercases the rest.
#[must_use]
pub fn clean_title(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, usize>,
    /// Categories whose clean key has this node's path as a prefix, in
    /// insertion order.
    members: Vec<usize>,
}

/// Prefix-searchable index over a fixed category list.
#[derive(Debug)]
pub struct CategoryIndex {
    categories: Vec<Category>,
    nodes: Vec<TrieNode>,
    limit: usize,
}

impl CategoryIndex {
    /// Builds the index. `limit` caps the number of categories [`lookup`]
    /// returns.
    ///
    /// [`lookup`]: CategoryIndex::lookup
    #[must_use]
    pub fn build<I>(raw: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = RawCategory>,
    {
        let mut index = Self {
            categories: Vec::new(),
            nodes: vec![TrieNode::default()],
            limit,
        };
        for category in raw.into_iter().map(Category::from_raw) {
            index.insert(category);
        }
        index
    }

    fn insert(&mut self, category: Category) {
        let id = self.categories.len();
        let mut node = 0;
        for ch in category.clean.chars() {
            node = match self.nodes[node].children.get(&ch) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(ch, next);
                    next
                }
            };
            self.nodes[node].members.push(id);
        }
        self.categories.push(category);
    }

    /// All categories whose clean key starts with `clean_prefix`, in
    /// insertion order. An empty prefix matches nothing.
    fn prefix_matches(&self, clean_prefix: &str) -> &[usize] {
        if clean_prefix.is_empty() {
            return &[];
        }
        let mut node = 0;
        for ch in clean_prefix.chars() {
            match self.nodes[node].children.get(&ch) {
                Some(&next) => node = next,
                None => return &[],
            }
        }
        &self.nodes[node].members
    }

    /// Autocomplete lookup: categories whose clean key starts with the
    /// cleaned `query`, capped to the configured limit.
    #[must_use]
    pub fn lookup(&self, query: &str) -> Vec<&Category> {
        let cleaned = clean_title(query);
        self.prefix_matches(&cleaned)
            .iter()
            .take(self.limit)
            .map(|&id| &self.categories[id])
            .collect()
    }

    /// Returns the category the user has fully typed, if any.
    ///
    /// Only succeeds when the prefix search has exactly one hit and that
    /// hit's clean key equals the cleaned query. A query that is a unique
    /// prefix of a longer key does not count.
    #[must_use]
    pub fn find_single(&self, query: &str) -> Option<&Category> {
        let cleaned = clean_title(query);
        match self.prefix_matches(&cleaned) {
            [only] => {
                let category = &self.categories[*only];
                (category.clean == cleaned).then_some(category)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, alias: &str) -> RawCategory {
        RawCategory {
            title: title.to_string(),
            alias: alias.to_string(),
        }
    }

    fn sample_index(limit: usize) -> CategoryIndex {
        CategoryIndex::build(
            vec![
                raw("Coffee & Tea", "coffee"),
                raw("Coffee Roasteries", "coffeeroasteries"),
                raw("Cocktail Bars", "cocktailbars"),
                raw("Bars", "bars"),
                raw("Barbeque", "bbq"),
                raw("Bagels", "bagels"),
            ],
            limit,
        )
    }

    #[test]
    fn clean_title_strips_punctuation_and_lowercases() {
        assert_eq!(clean_title("Coffee & Tea"), "coffeetea");
        assert_eq!(clean_title("Hot Dogs!"), "hotdogs");
        assert_eq!(clean_title("Café 24/7"), "caf247");
    }

    #[test]
    fn lookup_returns_prefix_matches_in_insertion_order() {
        let index = sample_index(10);
        let titles: Vec<&str> = index
            .lookup("co")
            .into_iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Coffee & Tea", "Coffee Roasteries", "Cocktail Bars"]);
    }

    #[test]
    fn lookup_cleans_query_before_matching() {
        let index = sample_index(10);
        let hits = index.lookup("Coffee &");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|c| c.clean.starts_with("coffee")));
    }

    #[test]
    fn lookup_respects_limit() {
        let index = sample_index(2);
        assert_eq!(index.lookup("b").len(), 2);
        assert_eq!(index.lookup("co").len(), 2);
    }

    #[test]
    fn lookup_for_unknown_prefix_is_empty() {
        let index = sample_index(10);
        assert!(index.lookup("zz").is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let index = sample_index(10);
        assert!(index.lookup("").is_empty());
        assert!(index.lookup("&&").is_empty());
        assert!(index.find_single("").is_none());
    }

    #[test]
    fn every_category_is_indexed_once() {
        let index = sample_index(100);
        assert_eq!(index.len(), 6);
        let all: usize = ('a'..='z').map(|c| index.lookup(&c.to_string()).len()).sum();
        assert_eq!(all, 6);
    }

    #[test]
    fn find_single_requires_exact_unique_match() {
        let index = sample_index(10);
        let hit = index.find_single("coffee & tea").expect("exact match");
        assert_eq!(hit.alias, "coffee");

        // Unique prefix of a longer key is still "typing".
        assert!(index.find_single("cocktail").is_none());
        // Exact key that is also a prefix of others is ambiguous.
        assert!(index.find_single("bar").is_none());
        assert!(index.find_single("bars").is_some());
    }

    #[test]
    fn find_single_ignores_case_and_punctuation() {
        let index = sample_index(10);
        let hit = index.find_single("BAGELS!!").expect("exact match");
        assert_eq!(hit.alias, "bagels");
    }

    #[test]
    fn raw_category_deserializes_from_source_json() {
        let json = r#"[{"title": "Pizza", "alias": "pizza"}]"#;
        let parsed: Vec<RawCategory> = serde_json::from_str(json).unwrap();
        let index = CategoryIndex::build(parsed, 8);
        assert_eq!(index.lookup("piz")[0].alias, "pizza");
    }
}
