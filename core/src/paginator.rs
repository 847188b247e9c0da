use std::fmt;

/// A contiguous run of items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    items: &'a [T],
}

impl<'a, T> Page<'a, T> {
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Split `items` into pages of at most `page_size` items. A zero page size yields no pages.
pub fn paginate<T>(items: &[T], page_size: usize) -> Vec<Page<'_, T>> {
    if page_size == 0 {
        return Vec::new();
    }
    items.chunks(page_size).map(|items| Page { items }).collect()
}
