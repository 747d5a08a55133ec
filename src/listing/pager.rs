use super::query::ListingQuery;

/// Previous/next navigation state for a listing page.
///
/// "Previous" is enabled exactly when the current page is past the first;
/// "next" exactly when it is before the last. An enabled move changes the
/// page by exactly 1 and never leaves `[1, total_pages]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Pager {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Descriptor for the previous page, if the control is enabled.
    pub fn prev(&self, query: &ListingQuery) -> Option<ListingQuery> {
        self.has_prev().then(|| query.with_page(self.current_page - 1))
    }

    /// Descriptor for the next page, if the control is enabled.
    pub fn next(&self, query: &ListingQuery) -> Option<ListingQuery> {
        self.has_next().then(|| query.with_page(self.current_page + 1))
    }
}
