//! End-to-end walks through diff-size filter trees

mod common;

use common::TestRepo;
use gitsieve::filter::{
    AllFilter, AndFilter, CommitFilter, CountFilter, FileSizeFilter, LineSizeFilter, ListFilter,
};
use gitsieve::{CommitFinder, FilterError};

/// Walk HEAD through `AllFilter(AndFilter(filter, commits))` and return what
/// the collector saw
fn collect<F: CommitFilter>(test: &TestRepo, filter: F) -> ListFilter {
    let mut commits = ListFilter::new();
    {
        let mut root = AllFilter::new().with(AndFilter::new().with(filter).with(&mut commits));
        CommitFinder::new(&test.git).find(&mut root).unwrap();
    }
    commits
}

#[test]
fn test_line_diff_single_file() {
    let mut test = TestRepo::new();
    let commit1 = test.add("file.txt", "a\nb\nc");
    let commit2 = test.add("file.txt", "a\nb2\nc");
    let commit3 = test.add("file.txt", "");

    let commits = collect(&test, LineSizeFilter::new(3).unwrap());
    assert!(commits.contains(commit1));
    assert!(!commits.contains(commit2));
    assert!(commits.contains(commit3));
}

#[test]
fn test_line_diff_multiple_files() {
    let mut test = TestRepo::new();
    let commit1 = test.add_all(&[("file1.txt", "a\n"), ("file2.txt", "b\n")]);
    let commit2 = test.add_all(&[("file1.txt", "a1\n"), ("file2.txt", "b\nc\nd\n")]);
    let commit3 = test.add_all(&[("file1.txt", "a1\n"), ("file2.txt", "b\nc\n")]);

    let commits = collect(&test, LineSizeFilter::new(3).unwrap());
    assert!(!commits.contains(commit1));
    assert!(commits.contains(commit2));
    assert!(!commits.contains(commit3));
}

#[test]
fn test_file_diff_multiple_files() {
    let mut test = TestRepo::new();
    let commit1 = test.add_all(&[("file1.txt", "a"), ("file2.txt", "b")]);
    let commit2 = test.add("file1.txt", "a1");
    let commit3 = test.add_all(&[("file1.txt", "a2"), ("file2.txt", "b1")]);

    let filter = FileSizeFilter::new(2).unwrap();
    assert_eq!(filter.total(), 2);

    let commits = collect(&test, filter);
    assert!(commits.contains(commit1));
    assert!(!commits.contains(commit2));
    assert!(commits.contains(commit3));
}

#[test]
fn test_diff_moved_file() {
    let mut test = TestRepo::new();
    let commit1 = test.add("file.txt", "a\nb\nc");
    let commit2 = test.mv("file.txt", "file2.txt");

    let detected = collect(&test, LineSizeFilter::with_renames(true, 1).unwrap());
    assert!(detected.contains(commit1));
    assert!(!detected.contains(commit2));

    let undetected = collect(&test, LineSizeFilter::with_renames(false, 1).unwrap());
    assert!(undetected.contains(commit1));
    assert!(undetected.contains(commit2));
}

#[test]
fn test_collector_sees_commits_in_walk_order() {
    let mut test = TestRepo::new();
    let commit1 = test.add("file.txt", "a\n");
    let commit2 = test.add("file.txt", "b\n");
    let commit3 = test.add("file.txt", "c\n");

    let commits = collect(&test, LineSizeFilter::new(0).unwrap());
    assert_eq!(commits.commits(), &[commit3, commit2, commit1]);
}

#[test]
fn test_file_filter_first_skips_line_counting() {
    let mut test = TestRepo::new();
    let two = test.add_all(&[("file1.txt", "a\n"), ("file2.txt", "b\n")]);
    let single = test.add("file1.txt", "a\nb\nc\nd\n");

    // Only commits passing the file filter reach the counter and the line filter
    let mut reached = CountFilter::new();
    let filter = AndFilter::new()
        .with(FileSizeFilter::new(2).unwrap())
        .with(&mut reached)
        .with(LineSizeFilter::new(1).unwrap());
    let commits = collect(&test, filter);
    assert!(commits.contains(two));
    assert!(!commits.contains(single));
    assert_eq!(commits.commits().len(), 1);
    assert_eq!(reached.count(), 1);
}

#[test]
fn test_copies_add_no_lines() {
    let mut test = TestRepo::new();
    test.add("a.txt", "a\nb\nc\n");
    let copied = test.rewrite(&["a.txt"], &[("b.txt", "a\nb\nc\n"), ("c.txt", "a\nb\nc\n")]);

    let detected = collect(&test, LineSizeFilter::new(1).unwrap());
    assert!(!detected.contains(copied));

    let undetected = collect(&test, LineSizeFilter::with_renames(false, 9).unwrap());
    assert!(undetected.contains(copied));
}

#[test]
fn test_clone_filter() {
    let filter = LineSizeFilter::new(10).unwrap();
    let clone = filter.clone();
    assert_eq!(filter.total(), clone.total());
    assert!(!std::ptr::eq(&filter, &clone));

    let boxed = filter.clone_box();
    assert_eq!(boxed.name(), "LineSizeFilter");
}

#[test]
fn test_negative_threshold() {
    assert!(matches!(
        LineSizeFilter::new(-1),
        Err(FilterError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        FileSizeFilter::new(-1),
        Err(FilterError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_reusing_tree_across_walks() {
    let mut test = TestRepo::new();
    test.add("file.txt", "a\nb\nc");
    test.add("file.txt", "a\nb2\nc");

    let mut commits = ListFilter::new();
    {
        let mut root = AllFilter::new().with(
            AndFilter::new()
                .with(LineSizeFilter::new(3).unwrap())
                .with(&mut commits),
        );
        let finder = CommitFinder::new(&test.git);
        finder.find(&mut root).unwrap();
        finder.find(&mut root).unwrap();
    }
    assert_eq!(commits.commits().len(), 1);
}
