// Cursor-following retrieval shared by the timeline, friends and muted-ids endpoints.

use std::fmt::Debug;
use std::future::Future;

use twitter_client::Cursored;

/// Position in a paginated list.
pub trait PageCursor: Copy + Debug {
    /// Cursor requesting the first page.
    fn first() -> Self;
    /// Whether a returned cursor means there are no more pages.
    fn is_end(&self) -> bool;
}

/// Opaque cursor of the friends and muted-ids endpoints.
/// `-1` requests the first page. A returned `0` or `-1` means the list is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListCursor(pub i64);

impl ListCursor {
    pub const FIRST: ListCursor = ListCursor(-1);
}

impl PageCursor for ListCursor {
    fn first() -> Self {
        Self::FIRST
    }

    fn is_end(&self) -> bool {
        self.0 == -1 || self.0 == 0
    }
}

/// Inclusive upper bound on item ids, walking a timeline backwards.
/// Never ends by itself; the timeline is exhausted when a page comes back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxId(pub u64);

impl MaxId {
    pub const FIRST: MaxId = MaxId(i64::MAX as u64);

    /// Request parameter, omitted for the first page.
    pub fn as_param(&self) -> Option<u64> {
        (*self != Self::FIRST).then_some(self.0)
    }
}

impl PageCursor for MaxId {
    fn first() -> Self {
        Self::FIRST
    }

    fn is_end(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T, C> {
    pub items: Vec<T>,
    pub next: C,
}

impl<T> Page<T, MaxId> {
    /// Build a timeline page whose next bound is one below the smallest id in it.
    pub fn by_max_id(items: Vec<T>, id: impl Fn(&T) -> u64) -> Self {
        let next = items
            .iter()
            .map(id)
            .min()
            .map(|min| MaxId(min.saturating_sub(1)))
            .unwrap_or(MaxId(0));
        Page { items, next }
    }
}

impl<T> From<Cursored<T>> for Page<T, ListCursor> {
    fn from(cursored: Cursored<T>) -> Self {
        Page {
            items: cursored.items,
            next: ListCursor(cursored.next_cursor),
        }
    }
}

/// Fetch pages starting from the first cursor and hand each non-empty page to `visit`, in order.
/// Stops after an empty page or an end cursor. The first error aborts the walk.
/// Returns the number of requests made.
pub async fn for_each_page<T, C, E, F, Fut, V>(mut fetch: F, mut visit: V) -> Result<usize, E>
where
    C: PageCursor,
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<Page<T, C>, E>>,
    V: FnMut(Vec<T>),
{
    let mut cursor = C::first();
    let mut requests = 0;
    loop {
        let page = fetch(cursor).await?;
        requests += 1;
        if page.items.is_empty() {
            break;
        }
        let next = page.next;
        visit(page.items);
        if next.is_end() {
            break;
        }
        cursor = next;
    }
    Ok(requests)
}

/// Fetch every page and concatenate the items in the order received.
pub async fn fetch_all<T, C, E, F, Fut>(fetch: F) -> Result<Vec<T>, E>
where
    C: PageCursor,
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<Page<T, C>, E>>,
{
    let mut items = Vec::new();
    let requests = for_each_page(fetch, |page| items.extend(page)).await?;
    tracing::debug!("Fetched {} items in {} requests", items.len(), requests);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn list_pages(pages: Vec<(Vec<u32>, i64)>) -> impl FnMut(ListCursor) -> std::future::Ready<Result<Page<u32, ListCursor>, String>> {
        move |cursor: ListCursor| {
            let index = if cursor == ListCursor::FIRST { 0 } else { cursor.0 as usize };
            let (items, next) = pages.get(index).cloned().unwrap_or_default();
            std::future::ready(Ok(Page { items, next: ListCursor(next) }))
        }
    }

    #[tokio::test]
    async fn test_fetch_all_follows_cursor() {
        let fetch = list_pages(vec![(vec![1, 2], 1), (vec![3], 2), (vec![4, 5], 0)]);
        let items = fetch_all(fetch).await.unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_on_minus_one() {
        let cursors = RefCell::new(vec![]);
        let fetch = |cursor: ListCursor| {
            cursors.borrow_mut().push(cursor);
            std::future::ready(Ok::<_, String>(Page {
                items: vec![cursor.0],
                next: ListCursor(-1),
            }))
        };
        let items = fetch_all(fetch).await.unwrap();
        assert_eq!(items, vec![-1]);
        assert_eq!(*cursors.borrow(), vec![ListCursor::FIRST]);
    }

    #[tokio::test]
    async fn test_stops_on_empty_page() {
        let requests = RefCell::new(0);
        let fetch = |_: MaxId| {
            *requests.borrow_mut() += 1;
            let items = if *requests.borrow() < 3 { vec![10u64, 9] } else { vec![] };
            std::future::ready(Ok::<_, String>(Page::by_max_id(items, |id| *id)))
        };
        let mut visited = vec![];
        let count = for_each_page(fetch, |page| visited.push(page)).await.unwrap();
        assert_eq!(count, 3);
        assert_eq!(visited, vec![vec![10, 9], vec![10, 9]]);
    }

    #[tokio::test]
    async fn test_error_aborts() {
        let fetch = |cursor: ListCursor| {
            let result = if cursor == ListCursor::FIRST {
                Ok(Page { items: vec![1], next: ListCursor(7) })
            } else {
                Err("boom".to_string())
            };
            std::future::ready(result)
        };
        let result: Result<Vec<u32>, String> = fetch_all(fetch).await;
        assert_eq!(result, Err("boom".to_string()));
    }

    #[test]
    fn test_page_by_max_id() {
        let page = Page::by_max_id(vec![30u64, 12, 25], |id| *id);
        assert_eq!(page.next, MaxId(11));

        let page = Page::by_max_id(Vec::<u64>::new(), |id| *id);
        assert_eq!(page.next, MaxId(0));
    }

    #[test]
    fn test_max_id_param() {
        assert_eq!(MaxId::FIRST.as_param(), None);
        assert_eq!(MaxId(41).as_param(), Some(41));
        assert_eq!(MaxId::first().0, i64::MAX as u64);
    }

    #[test]
    fn test_list_cursor_end() {
        assert!(ListCursor(0).is_end());
        assert!(ListCursor(-1).is_end());
        assert!(!ListCursor(1489467234237774933).is_end());
    }
}
