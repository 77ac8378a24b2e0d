//! ListState: the Source Store plus the ephemeral UI state of one list page.
//!
//! Every read recomputes the view from the Source Store through filter,
//! sort and window. Nothing is cached between calls, so a view can never
//! reflect stale criteria.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::SearchFilter;
use crate::overlay::{SpeculativeOverlay, VoteTicket};
use crate::page::PageConfig;
use crate::sort::{SortKey, sort_owned};
use crate::window::{PageView, Window, paginate};
use catalog::{ListItem, Votable};
use tracing::debug;

type ItemId<P> = <<P as PageConfig>::Item as ListItem>::Id;

pub struct ListState<P: PageConfig> {
    source: Vec<P::Item>,
    criteria: P::Criteria,
    sort: P::Sort,
    query: String,
    window: Window,
    overlay: SpeculativeOverlay<ItemId<P>>,
}

impl<P: PageConfig> ListState<P> {
    /// Empty state with default criteria, default sort and the page's size.
    pub fn new() -> Self {
        Self {
            source: Vec::new(),
            criteria: P::Criteria::default(),
            sort: P::Sort::default(),
            query: String::new(),
            window: Window::new(P::PAGE_SIZE),
            overlay: SpeculativeOverlay::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.window = Window::new(page_size);
        self
    }

    /// Replace the Source Store with an authoritative result set.
    ///
    /// Pending optimistic deltas are dropped and the window goes back to
    /// page 1. Returns how many speculative entries were discarded.
    pub fn replace_source(&mut self, items: Vec<P::Item>) -> usize {
        let discarded = self.overlay.clear();
        if discarded > 0 {
            debug!(
                "{}: authoritative fetch replaced {} speculative entries",
                P::NAME,
                discarded
            );
        }
        self.source = items;
        self.window.reset();
        discarded
    }

    pub fn source(&self) -> &[P::Item] {
        &self.source
    }

    pub fn find(&self, id: &ItemId<P>) -> Option<&P::Item> {
        self.source.iter().find(|item| &item.id() == id)
    }

    pub fn criteria(&self) -> &P::Criteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: P::Criteria) {
        self.criteria = criteria;
        self.window.reset();
    }

    /// Change some criteria in place, e.g. `state.update_criteria(|c| c.rating = Criterion::Only(5))`.
    pub fn update_criteria(&mut self, update: impl FnOnce(&mut P::Criteria)) {
        update(&mut self.criteria);
        self.window.reset();
    }

    pub fn sort(&self) -> P::Sort {
        self.sort
    }

    pub fn set_sort(&mut self, sort: P::Sort) {
        self.sort = sort;
        self.window.reset();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.window.reset();
    }

    pub fn window(&self) -> Window {
        self.window
    }

    fn pipeline(&self) -> FilterPipeline<P::Item> {
        P::filters(&self.criteria).add_filter(SearchFilter::new(&self.query, P::search_fields()))
    }

    /// The full filtered and sorted sequence, ignoring the window.
    pub fn filtered_sorted(&self) -> Vec<P::Item> {
        let filtered = self.pipeline().apply(self.source.clone());
        debug!(
            "{}: {} of {} items pass filters, sorting by {}",
            P::NAME,
            filtered.len(),
            self.source.len(),
            self.sort.label()
        );
        sort_owned(filtered, self.sort)
    }

    /// The currently displayed window.
    pub fn view(&self) -> PageView<P::Item> {
        paginate(self.filtered_sorted(), &self.window)
    }

    /// Reveal the next page, returning only the newly appended items.
    pub fn load_more(&mut self) -> Vec<P::Item> {
        let mut sorted = self.filtered_sorted();
        let range = self.window.load_more(sorted.len());
        debug!("{}: load more revealed {:?}", P::NAME, range);
        sorted.truncate(range.end);
        sorted.split_off(range.start)
    }

    /// Take an item out of the Source Store, remembering where it was.
    pub fn remove(&mut self, id: &ItemId<P>) -> Option<(usize, P::Item)> {
        let index = self.source.iter().position(|item| &item.id() == id)?;
        Some((index, self.source.remove(index)))
    }

    /// Put back an item taken out by [`ListState::remove`].
    pub fn restore(&mut self, index: usize, item: P::Item) {
        let index = index.min(self.source.len());
        self.source.insert(index, item);
    }
}

impl<P: PageConfig> ListState<P>
where
    P::Item: Votable,
{
    /// Apply a vote speculatively.
    ///
    /// Returns the displayed count and the ticket to revert or confirm the
    /// vote with, or `None` when no item has `id`.
    pub fn apply_vote(&mut self, id: &ItemId<P>, delta: i64) -> Option<(i64, VoteTicket<ItemId<P>>)> {
        let item = self.source.iter_mut().find(|item| &item.id() == id)?;
        let count = item.votes().unwrap_or(0) + delta;
        item.set_votes(count);
        Some((count, self.overlay.record(id.clone(), delta)))
    }

    /// Undo a speculative vote the server rejected.
    ///
    /// A no-op (returning `None`) once an authoritative fetch replaced the
    /// record, since the server's count already excludes the vote. Votes
    /// cast after that fetch stay applied.
    pub fn revert_vote(&mut self, ticket: &VoteTicket<ItemId<P>>) -> Option<i64> {
        if !self.overlay.retract(ticket) {
            return None;
        }
        let item = self.source.iter_mut().find(|item| &item.id() == ticket.key())?;
        let count = item.votes().unwrap_or(0) - ticket.delta();
        item.set_votes(count);
        Some(count)
    }

    /// Adopt the count the server reported for a vote.
    ///
    /// Ignored (returning `None`) when an authoritative fetch replaced the
    /// record after the vote was cast; that fetch's count stands.
    pub fn confirm_vote(&mut self, ticket: &VoteTicket<ItemId<P>>, authoritative: i64) -> Option<i64> {
        if !self.overlay.settle(ticket) {
            return None;
        }
        let item = self.source.iter_mut().find(|item| &item.id() == ticket.key())?;
        item.set_votes(authoritative);
        Some(authoritative)
    }

    /// The count currently displayed for `id`.
    pub fn votes(&self, id: &ItemId<P>) -> Option<i64> {
        self.find(id).and_then(Votable::votes)
    }

    pub fn pending_votes(&self, id: &ItemId<P>) -> i64 {
        self.overlay.pending(id)
    }
}

impl<P: PageConfig> Default for ListState<P> {
    fn default() -> Self {
        Self::new()
    }
}
