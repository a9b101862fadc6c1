//! Creator dashboard gigs, bucketed by tab.
//!
//! Every tab switch stamps a new generation. A response is applied only if its
//! stamp is still the newest, so a slow response for a tab the user already
//! left can never overwrite what is on screen.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::stamp::Generation;
use crate::api::MarketplaceApi;
use crate::error::ApiResult;
use crate::model::{Gig, GigStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub tab: GigStatus,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GigBoard {
    active: GigStatus,
    generation: Generation,
    buckets: BTreeMap<GigStatus, Vec<Gig>>,
    loading: bool,
    error: Option<String>,
}

impl Default for GigBoard {
    fn default() -> Self {
        Self::new(GigStatus::Recommended)
    }
}

impl GigBoard {
    pub fn new(active: GigStatus) -> Self {
        Self {
            active,
            generation: Generation::default(),
            buckets: BTreeMap::new(),
            loading: false,
            error: None,
        }
    }

    pub fn active(&self) -> GigStatus {
        self.active
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn bucket(&self, tab: GigStatus) -> &[Gig] {
        self.buckets.get(&tab).map(Vec::as_slice).unwrap_or(&[])
    }

    /// What the dashboard shows: the active tab's bucket and nothing else.
    pub fn visible(&self) -> &[Gig] {
        self.bucket(self.active)
    }

    /// Switches to `tab` and stamps the request about to be made for it.
    pub fn begin_load(&mut self, tab: GigStatus) -> LoadTicket {
        self.active = tab;
        self.loading = true;
        self.error = None;
        LoadTicket { tab, generation: self.generation.bump() }
    }

    /// Applies a response. Returns false when the ticket is stale and the
    /// response was dropped.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: ApiResult<Vec<Gig>>) -> bool {
        if !self.generation.is_current(ticket.generation) {
            tracing::debug!(
                tab = ticket.tab.slug(),
                stale = ticket.generation,
                current = self.generation.current(),
                "dropping stale gig response"
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(gigs) => {
                tracing::debug!(tab = ticket.tab.slug(), count = gigs.len(), "gig bucket replaced");
                self.buckets.insert(ticket.tab, gigs);
            }
            Err(e) => {
                tracing::warn!(tab = ticket.tab.slug(), error = %e, "loading gigs failed");
                self.error = Some(e.user_message());
            }
        }
        true
    }
}

/// One network call for `tab`, applied to `board` if still current.
pub async fn load_tab(api: &dyn MarketplaceApi, board: &RefCell<GigBoard>, tab: GigStatus) -> bool {
    let ticket = board.borrow_mut().begin_load(tab);
    let result = api.list_gigs(tab).await;
    board.borrow_mut().finish_load(ticket, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{gig, FakeApi};
    use crate::error::ApiError;

    #[test]
    fn slow_response_for_an_abandoned_tab_is_dropped() {
        let mut board = GigBoard::default();
        let applied = board.begin_load(GigStatus::Applied);
        let saved = board.begin_load(GigStatus::Saved);

        assert!(board.finish_load(saved, Ok(vec![gig("s1", GigStatus::Saved)])));
        assert!(!board.finish_load(applied, Ok(vec![gig("a1", GigStatus::Applied)])));

        assert_eq!(board.active(), GigStatus::Saved);
        let ids: Vec<&str> = board.visible().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["s1"]);
        assert!(board.bucket(GigStatus::Applied).is_empty());
        assert!(!board.is_loading());
    }

    #[test]
    fn in_order_responses_replace_the_bucket() {
        let mut board = GigBoard::default();
        let t = board.begin_load(GigStatus::Recommended);
        board.finish_load(t, Ok(vec![gig("r1", GigStatus::Recommended), gig("r2", GigStatus::Recommended)]));
        let t = board.begin_load(GigStatus::Recommended);
        board.finish_load(t, Ok(vec![gig("r3", GigStatus::Recommended)]));
        assert_eq!(board.visible().len(), 1);
        assert_eq!(board.visible()[0].id, "r3");
    }

    #[test]
    fn failure_keeps_previous_bucket_and_sets_error() {
        let mut board = GigBoard::default();
        let t = board.begin_load(GigStatus::Saved);
        board.finish_load(t, Ok(vec![gig("s1", GigStatus::Saved)]));
        let t = board.begin_load(GigStatus::Saved);
        board.finish_load(t, Err(ApiError::Network("offline".into())));
        assert_eq!(board.visible().len(), 1);
        assert!(board.error().is_some());
    }

    #[test]
    fn switching_tabs_only_shows_that_tabs_bucket() {
        let mut board = GigBoard::default();
        let t = board.begin_load(GigStatus::Applied);
        board.finish_load(t, Ok(vec![gig("a1", GigStatus::Applied)]));
        let t = board.begin_load(GigStatus::Canceled);
        assert!(board.visible().is_empty());
        board.finish_load(t, Ok(vec![gig("c1", GigStatus::Canceled)]));
        assert!(board.visible().iter().all(|g| g.status == GigStatus::Canceled));
    }

    #[tokio::test]
    async fn load_tab_fetches_once_and_fills_bucket() {
        let api = FakeApi::with_gigs(vec![
            gig("r1", GigStatus::Recommended),
            gig("s1", GigStatus::Saved),
        ]);
        let board = RefCell::new(GigBoard::default());
        assert!(load_tab(&api, &board, GigStatus::Saved).await);
        assert_eq!(api.calls(), ["list_gigs saved"]);
        let board = board.borrow();
        assert_eq!(board.visible().len(), 1);
        assert_eq!(board.visible()[0].id, "s1");
    }
}
