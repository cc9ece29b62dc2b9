use maternal_api::domain::shared::pagination::{PageQuery, Pager, PaginationError};

fn rows(n: u32) -> Vec<u32> {
    (1..=n).collect()
}

fn query(raw: &str) -> Option<i64> {
    PageQuery {
        page: Some(raw.to_string()),
    }
    .requested_page()
}

#[tokio::test]
async fn empty_source_yields_single_empty_page() {
    let page = Pager::new(10, 5)
        .unwrap()
        .paginate(&Vec::<u32>::new(), Some(1))
        .await
        .unwrap();
    assert_eq!(page.total_pages, 1);
    assert!(page.items.is_empty());
    assert!(!page.has_previous);
    assert!(!page.has_next);
    assert_eq!(page.page_range, vec![1]);
}

#[tokio::test]
async fn last_partial_page() {
    let page = Pager::new(10, 5)
        .unwrap()
        .paginate(&rows(25), Some(3))
        .await
        .unwrap();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
    assert!(page.has_previous);
    assert!(!page.has_next);
    assert_eq!(page.previous_page_number, Some(2));
    assert_eq!(page.next_page_number, None);
}

#[tokio::test]
async fn page_past_the_end_clamps_to_last() {
    let pager = Pager::new(10, 5).unwrap();
    let clamped = pager.paginate(&rows(25), Some(99)).await.unwrap();
    let last = pager.paginate(&rows(25), Some(3)).await.unwrap();
    assert_eq!(clamped, last);

    let beyond_i64 = pager
        .paginate(&rows(25), query("99999999999999999999"))
        .await
        .unwrap();
    assert_eq!(beyond_i64, last);
}

#[tokio::test]
async fn zero_and_junk_pages_fall_back_to_first() {
    let pager = Pager::new(10, 5).unwrap();
    for requested in [
        Some(0),
        Some(-4),
        query("-99999999999999999999"),
        query("abc"),
        query(""),
        None,
    ] {
        let page = pager.paginate(&rows(25), requested).await.unwrap();
        assert_eq!(page.page_number, 1);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0], 1);
    }
}

#[tokio::test]
async fn pages_cover_every_item_once() {
    let pager = Pager::new(7, 3).unwrap();
    let source = rows(50);
    let mut seen = Vec::new();
    for n in 1..=pager.total_pages(50) as i64 {
        seen.extend(pager.paginate(&source, Some(n)).await.unwrap().items);
    }
    assert_eq!(seen, source);
}

#[test]
fn window_stays_within_bounds() {
    let pager = Pager::new(10, 5).unwrap();
    assert_eq!(pager.page_range(1, 20), vec![1, 2, 3, 4, 5]);
    assert_eq!(pager.page_range(10, 20), vec![8, 9, 10, 11, 12]);
    assert_eq!(pager.page_range(20, 20), vec![16, 17, 18, 19, 20]);
    assert_eq!(pager.page_range(2, 3), vec![1, 2, 3]);
}

#[test]
fn zero_sizes_are_configuration_errors() {
    assert!(matches!(
        Pager::new(0, 5),
        Err(PaginationError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Pager::new(10, 0),
        Err(PaginationError::InvalidConfiguration(_))
    ));
}
