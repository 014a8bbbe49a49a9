use serde::Serialize;

/// One page of rows plus the numbers a pager needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// 1-based; 1 when there are no rows.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}

impl<T> Page<T> {
    /// Slices out page `requested` (1-based). Requests past the end land on the last page.
    pub fn slice(rows: Vec<T>, requested: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_rows = rows.len();
        let total_pages = total_rows.div_ceil(page_size);
        let page = requested.clamp(1, total_pages.max(1));

        let rows = rows
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        Self {
            rows,
            page,
            page_size,
            total_pages,
            total_rows,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_rows: self.total_rows,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
