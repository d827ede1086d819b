//! Category index and the category sub-search

use crate::record::Record;
use std::collections::HashMap;

/// A category name with the number of tags carrying it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryEntry {
    pub name: String,
    pub count: usize,
}

/// Build the count-sorted category list.
///
/// Every record-level tag and every media-item tag counts once, so a record
/// with three images tagged "X" contributes three to "X" regardless of its
/// own categories. Equal counts are ordered alphabetically (case-insensitive,
/// then byte order) so the list does not depend on scan order.
pub fn build_category_index(records: &[Record]) -> Vec<CategoryEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let item_tags = record.media.iter().flat_map(|m| m.categories());
        for name in record.categories.iter().chain(item_tags) {
            if name.trim().is_empty() {
                continue;
            }
            *counts.entry(name.as_str()).or_default() += 1;
        }
    }

    let mut entries: Vec<CategoryEntry> = counts
        .into_iter()
        .map(|(name, count)| CategoryEntry {
            name: name.to_string(),
            count,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });

    entries
}

/// What the category checklist should show for the current sub-search query.
#[derive(Clone, Debug, PartialEq)]
pub enum CategoryListView {
    /// The record set carries no categories at all
    NoCategories,
    /// Categories exist but none match the query
    NoMatches { query: String },
    Entries(Vec<CategoryEntry>),
}

/// Case-insensitive substring filter over the index. An empty query
/// restores the full list.
pub fn search_categories(index: &[CategoryEntry], query: &str) -> CategoryListView {
    if index.is_empty() {
        return CategoryListView::NoCategories;
    }

    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return CategoryListView::Entries(index.to_vec());
    }

    let matches: Vec<CategoryEntry> = index
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if matches.is_empty() {
        CategoryListView::NoMatches {
            query: query.trim().to_string(),
        }
    } else {
        CategoryListView::Entries(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MediaItem;

    fn record(categories: &[&str], item_categories: &[&[&str]]) -> Record {
        Record {
            id: "r".into(),
            title: None,
            description: None,
            media: item_categories
                .iter()
                .map(|cats| {
                    let mut item = MediaItem::image("https://cdn/a.jpg");
                    if !cats.is_empty() {
                        item.categories = Some(cats.iter().map(|c| c.to_string()).collect());
                    }
                    item
                })
                .collect(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            is_featured: false,
            created_at: None,
        }
    }

    fn names(entries: &[CategoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_item_tags_count_independently() {
        let records = vec![record(&["Tabby"], &[&["Orange"], &["Orange"], &["Orange"]])];
        let index = build_category_index(&records);
        assert_eq!(
            index,
            vec![
                CategoryEntry { name: "Orange".into(), count: 3 },
                CategoryEntry { name: "Tabby".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_sorted_by_count_then_alphabetically() {
        let records = vec![
            record(&["siamese", "Kitten"], &[]),
            record(&["Bengal", "Kitten"], &[]),
            record(&["Abyssinian"], &[]),
        ];
        let index = build_category_index(&records);
        assert_eq!(names(&index), vec!["Kitten", "Abyssinian", "Bengal", "siamese"]);
    }

    #[test]
    fn test_empty_records_give_empty_index() {
        assert!(build_category_index(&[]).is_empty());
        assert_eq!(search_categories(&[], "og"), CategoryListView::NoCategories);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = vec![record(&["Dog", "Frog", "Cat"], &[])];
        let index = build_category_index(&records);
        match search_categories(&index, "og") {
            CategoryListView::Entries(entries) => assert_eq!(names(&entries), vec!["Dog", "Frog"]),
            other => panic!("Expected Entries, got {other:?}"),
        }
        match search_categories(&index, "OG") {
            CategoryListView::Entries(entries) => assert_eq!(entries.len(), 2),
            other => panic!("Expected Entries, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_query_restores_full_list() {
        let records = vec![record(&["Dog", "Cat"], &[])];
        let index = build_category_index(&records);
        assert_eq!(search_categories(&index, ""), CategoryListView::Entries(index.clone()));
        assert_eq!(search_categories(&index, "   "), CategoryListView::Entries(index));
    }

    #[test]
    fn test_no_match_is_distinct_from_no_categories() {
        let records = vec![record(&["Dog"], &[])];
        let index = build_category_index(&records);
        assert_eq!(
            search_categories(&index, "zebra"),
            CategoryListView::NoMatches { query: "zebra".into() }
        );
    }
}
