//! Listing evaluator properties
//!
//! Filter-and-paginate behavior over articles and users, independent of
//! any backend.

use std::collections::HashMap;

use articles_api::model::{Article, NewArticle, User};
use articles_api::query::{evaluate, ArticleFilter, ListParams, MatchAll, Pagination};
use chrono::Utc;

// =============================================================================
// Test Utilities
// =============================================================================

fn article(id: u64, title: &str, author: &str, published: bool) -> Article {
    NewArticle {
        title: Some(title.to_string()),
        contents: Some(format!("{} contents", title)),
        created_by: Some(author.to_string()),
        is_published: Some(published),
    }
    .validate()
    .unwrap()
    .into_article(id, Utc::now())
}

fn letters() -> Vec<Article> {
    ["A", "B", "C", "D", "E"]
        .iter()
        .enumerate()
        .map(|(i, t)| article(i as u64 + 1, t, "x", false))
        .collect()
}

fn titles(data: &[Article]) -> Vec<&str> {
    data.iter().map(|a| a.title.as_str()).collect()
}

fn params(pairs: &[(&str, &str)]) -> ListParams {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ListParams::parse(&map)
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn test_second_page_of_two() {
    let page = evaluate(&letters(), &ArticleFilter::new(), Pagination::new(2, 2));

    assert_eq!(titles(&page.data), vec!["C", "D"]);
    assert_eq!(page.total, 5);
    assert_eq!((page.page, page.limit), (2, 2));
}

#[test]
fn test_page_past_end_is_empty_with_total() {
    let page = evaluate(&letters(), &ArticleFilter::new(), Pagination::new(100, 10));

    assert!(page.data.is_empty());
    assert_eq!(page.total, 5);
}

#[test]
fn test_huge_page_does_not_overflow() {
    let page = evaluate(&letters(), &ArticleFilter::new(), Pagination::new(u64::MAX, u64::MAX));

    assert!(page.data.is_empty());
    assert_eq!(page.total, 5);
}

#[test]
fn test_no_filters_returns_everything_paginated() {
    let page = evaluate(&letters(), &ArticleFilter::new(), Pagination::default());

    assert_eq!(titles(&page.data), vec!["A", "B", "C", "D", "E"]);
    assert_eq!((page.page, page.limit), (1, 10));
}

#[test]
fn test_data_never_exceeds_limit_or_total() {
    let records = letters();

    for page in 1..=4 {
        for limit in 1..=6 {
            let result = evaluate(&records, &ArticleFilter::new(), Pagination::new(page, limit));
            let bound = (limit as usize).min(result.total);
            assert!(
                result.data.len() <= bound,
                "page={} limit={} returned {}",
                page,
                limit,
                result.data.len()
            );
        }
    }
}

#[test]
fn test_total_is_independent_of_pagination() {
    let mut records = letters();
    records.push(article(6, "Another A", "y", true));
    let filter = ArticleFilter::new().title_contains("a");

    let totals: Vec<usize> = [(1, 1), (2, 1), (1, 10), (9, 3)]
        .iter()
        .map(|&(page, limit)| evaluate(&records, &filter, Pagination::new(page, limit)).total)
        .collect();

    assert_eq!(totals, vec![2, 2, 2, 2]);
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn test_title_filter_ignores_case() {
    let records = vec![article(1, "Hello World", "a", true), article(2, "Bye", "a", true)];
    let page = evaluate(&records, &ArticleFilter::new().title_contains("HELLO"), Pagination::default());

    assert_eq!(titles(&page.data), vec!["Hello World"]);
}

#[test]
fn test_contents_filter_ignores_case() {
    let records = vec![article(1, "Rust", "a", true), article(2, "Go", "a", true)];
    let page = evaluate(
        &records,
        &ArticleFilter::new().contents_contains("RUST CONT"),
        Pagination::default(),
    );

    assert_eq!(page.total, 1);
}

#[test]
fn test_filters_combine_with_and() {
    let records = vec![
        article(1, "Published", "alice", true),
        article(2, "Draft", "alice", false),
        article(3, "Other", "bob", true),
    ];
    let filter = ArticleFilter::new().created_by("alice").published(true);
    let page = evaluate(&records, &filter, Pagination::default());

    assert_eq!(titles(&page.data), vec!["Published"]);
    assert_eq!(page.total, 1);
}

#[test]
fn test_created_by_is_exact() {
    let records = vec![article(1, "a", "alice", true), article(2, "b", "Alice", true)];
    let page = evaluate(&records, &ArticleFilter::new().created_by("alice"), Pagination::default());

    assert_eq!(page.total, 1);
}

// =============================================================================
// Query-string parsing into the evaluator
// =============================================================================

#[test]
fn test_query_strings_drive_the_evaluator() {
    let parsed = params(&[("page", "2"), ("limit", "2abc")]);
    let page = evaluate(&letters(), &parsed.filter, parsed.pagination);

    assert_eq!(titles(&page.data), vec!["C", "D"]);
}

#[test]
fn test_invalid_pagination_falls_back_to_defaults() {
    let parsed = params(&[("page", "zero"), ("limit", "-5")]);
    let page = evaluate(&letters(), &parsed.filter, parsed.pagination);

    assert_eq!((page.page, page.limit), (1, 10));
    assert_eq!(page.data.len(), 5);
}

#[test]
fn test_empty_filter_values_are_ignored() {
    let parsed = params(&[("title", ""), ("created_by", ""), ("is_published", "")]);
    let page = evaluate(&letters(), &parsed.filter, parsed.pagination);

    assert_eq!(page.total, 5);
}

#[test]
fn test_users_paginate_without_filters() {
    let users: Vec<User> = (1..=3)
        .map(|id| User {
            id,
            username: format!("user{}", id),
            password_hash: String::new(),
        })
        .collect();

    let page = evaluate(&users, &MatchAll, Pagination::new(2, 2));

    assert_eq!(page.total, 3);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].username, "user3");
}
