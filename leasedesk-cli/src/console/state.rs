//! View state for the admin console.
//!
//! Holds the last fetched result set, the active filter, client-side
//! pagination, per-row memo drafts and the record open in the detail
//! view. Render functions read it; the [`Console`](super::Console)
//! controller is the only writer outside tests.

use std::collections::HashMap;

use leasedesk_core::{Inquiry, StatusFilter};

/// Rows per page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Memo being edited for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoDraft {
    /// Last value persisted on the server
    pub saved: Option<String>,
    /// Text currently in the editor
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ConsoleState {
    inquiries: Vec<Inquiry>,
    filter: StatusFilter,
    page: usize,
    page_size: usize,
    drafts: HashMap<i64, MemoDraft>,
    detail: Option<i64>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ConsoleState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            inquiries: Vec::new(),
            filter: StatusFilter::All,
            page: 1,
            page_size: page_size.max(1),
            drafts: HashMap::new(),
            detail: None,
        }
    }

    /// Replace the cache with a fresh result set and go back to page 1.
    ///
    /// Open drafts are dropped. The detail view survives only if its
    /// record is still present.
    pub fn replace(&mut self, filter: StatusFilter, inquiries: Vec<Inquiry>) {
        self.inquiries = inquiries;
        self.filter = filter;
        self.page = 1;
        self.drafts.clear();
        if let Some(id) = self.detail {
            if self.find(id).is_none() {
                self.detail = None;
            }
        }
    }

    pub fn inquiries(&self) -> &[Inquiry] {
        &self.inquiries
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total(&self) -> usize {
        self.inquiries.len()
    }

    /// Number of pages; zero when the cache is empty.
    pub fn total_pages(&self) -> usize {
        self.total().div_ceil(self.page_size)
    }

    /// Rows visible on the current page
    pub fn current_page(&self) -> &[Inquiry] {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total());
        self.inquiries.get(start..end).unwrap_or_default()
    }

    /// 1-based row number of the first row on the current page
    pub fn first_row_number(&self) -> usize {
        (self.page - 1) * self.page_size + 1
    }

    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a page, clamped to the valid range.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn find(&self, id: i64) -> Option<&Inquiry> {
        self.inquiries.iter().find(|inquiry| inquiry.id == id)
    }

    /// Open a memo draft seeded with the cached memo.
    ///
    /// An already open draft is returned untouched.
    pub fn begin_memo_edit(&mut self, id: i64) -> Option<&MemoDraft> {
        let saved = self.find(id)?.memo.clone();
        Some(self.drafts.entry(id).or_insert_with(|| MemoDraft {
            text: saved.clone().unwrap_or_default(),
            saved,
        }))
    }

    pub fn edit_memo(&mut self, id: i64, text: impl Into<String>) -> bool {
        match self.drafts.get_mut(&id) {
            Some(draft) => {
                draft.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn memo_draft(&self, id: i64) -> Option<&MemoDraft> {
        self.drafts.get(&id)
    }

    /// Discard the draft and hand back the last saved memo.
    pub fn cancel_memo_edit(&mut self, id: i64) -> Option<Option<String>> {
        self.drafts.remove(&id).map(|draft| draft.saved)
    }

    /// Record a memo the server accepted. Touches only the cached row.
    pub fn memo_saved(&mut self, id: i64, memo: Option<String>) {
        self.drafts.remove(&id);
        if let Some(inquiry) = self.inquiries.iter_mut().find(|i| i.id == id) {
            inquiry.memo = memo;
        }
    }

    pub fn open_detail(&mut self, id: i64) -> Option<&Inquiry> {
        let found = self.inquiries.iter().position(|i| i.id == id)?;
        self.detail = Some(id);
        self.inquiries.get(found)
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&Inquiry> {
        self.detail.and_then(|id| self.find(id))
    }
}
