//! Brand side: creators who applied to one of the brand's campaigns.

use std::cell::RefCell;

use super::stamp::Generation;
use crate::api::MarketplaceApi;
use crate::error::ApiResult;
use crate::model::{BrandCampaign, CreatorApplication};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTicket {
    pub campaign_id: String,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    campaigns: Vec<BrandCampaign>,
    campaign_id: Option<String>,
    generation: Generation,
    applications: Vec<CreatorApplication>,
    loading: bool,
    error: Option<String>,
}

impl Roster {
    pub fn campaigns(&self) -> &[BrandCampaign] {
        &self.campaigns
    }

    pub fn campaign_id(&self) -> Option<&str> {
        self.campaign_id.as_deref()
    }

    pub fn applications(&self) -> &[CreatorApplication] {
        &self.applications
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Stores the campaign list. Returns the campaign to open first, if any.
    pub fn set_campaigns(&mut self, result: ApiResult<Vec<BrandCampaign>>) -> Option<String> {
        match result {
            Ok(list) => {
                self.campaigns = list;
                match &self.campaign_id {
                    Some(id) if self.campaigns.iter().any(|c| &c.id == id) => Some(id.clone()),
                    _ => self.campaigns.first().map(|c| c.id.clone()),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading brand campaigns failed");
                self.error = Some(e.user_message());
                None
            }
        }
    }

    pub fn begin_load(&mut self, campaign_id: &str) -> RosterTicket {
        if self.campaign_id.as_deref() != Some(campaign_id) {
            self.applications.clear();
        }
        self.campaign_id = Some(campaign_id.to_string());
        self.loading = true;
        self.error = None;
        RosterTicket { campaign_id: campaign_id.to_string(), generation: self.generation.bump() }
    }

    pub fn finish_load(&mut self, ticket: RosterTicket, result: ApiResult<Vec<CreatorApplication>>) -> bool {
        if !self.generation.is_current(ticket.generation) {
            tracing::debug!(campaign = %ticket.campaign_id, "dropping stale roster response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(apps) => self.applications = apps,
            Err(e) => {
                tracing::warn!(campaign = %ticket.campaign_id, error = %e, "loading applications failed");
                self.error = Some(e.user_message());
            }
        }
        true
    }
}

pub async fn load_campaign(api: &dyn MarketplaceApi, roster: &RefCell<Roster>, campaign_id: &str) -> bool {
    let ticket = roster.borrow_mut().begin_load(campaign_id);
    let result = api.list_applications(campaign_id).await;
    roster.borrow_mut().finish_load(ticket, result)
}

/// Loads the campaign list, then the roster of the first (or current) campaign.
pub async fn load_all(api: &dyn MarketplaceApi, roster: &RefCell<Roster>) {
    let result = api.list_brand_campaigns().await;
    let first = roster.borrow_mut().set_campaigns(result);
    if let Some(id) = first {
        load_campaign(api, roster, &id).await;
    }
}
