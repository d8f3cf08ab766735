//! Cursor paging over `GET /shipment-jobs`.
//!
//! [`PagingState`] decides what to request next and folds each returned page
//! into the accumulated shipments. The HTTP loop lives with the runtime crate.

use thiserror::Error;

use crate::contract::{Shipment, ShipmentPage};

pub const DEFAULT_FETCH_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub first: usize,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PagingError {
    #[error("upstream returned an empty page but reported more pages after cursor {cursor:?}")]
    EmptyPage { cursor: Option<String> },
    #[error("upstream reported more pages without an end cursor")]
    MissingCursor,
}

#[derive(Debug, Clone)]
pub struct PagingState {
    limit: usize,
    shipments: Vec<Shipment>,
    cursor: Option<String>,
    has_next_page: bool,
}

impl PagingState {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            shipments: Vec::new(),
            cursor: None,
            has_next_page: true,
        }
    }

    /// Next page to ask for, or `None` once the limit is reached or upstream
    /// has no more pages.
    pub fn next_request(&self) -> Option<PageRequest> {
        if !self.has_next_page || self.remaining() == 0 {
            return None;
        }

        Some(PageRequest {
            first: self.remaining(),
            after: self.cursor.clone(),
        })
    }

    /// Appends a page and returns how many shipments were kept from it.
    ///
    /// Shipments past the limit are dropped. A page that would leave the
    /// loop requesting the same cursor again is rejected.
    pub fn absorb(&mut self, page: ShipmentPage) -> Result<usize, PagingError> {
        let received = page.data.len();
        let kept = received.min(self.remaining());
        self.shipments.extend(page.data.into_iter().take(kept));

        self.has_next_page = page.page_info.has_next_page;
        let previous_cursor = std::mem::replace(&mut self.cursor, page.page_info.end_cursor);

        if self.has_next_page && self.remaining() > 0 {
            if received == 0 {
                return Err(PagingError::EmptyPage {
                    cursor: previous_cursor,
                });
            }
            if self.cursor.is_none() {
                return Err(PagingError::MissingCursor);
            }
        }

        Ok(kept)
    }

    pub fn accumulated(&self) -> usize {
        self.shipments.len()
    }

    pub fn into_shipments(self) -> Vec<Shipment> {
        self.shipments
    }

    fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.shipments.len())
    }
}
