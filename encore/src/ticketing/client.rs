use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::TicketingConfig;
use crate::error::{EncoreError, Result};
use crate::ingest::DateWindow;
use crate::models::{Borough, Event};

const VENUE_FALLBACK: &str = "Unknown Venue";
const INFO_FALLBACK: &str = "No description available";

/// One page of upstream results: the mapped events plus the total page
/// count the API reports for the current filter.
#[derive(Debug)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct DiscoveryResponse {
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedEvents>,
    page: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedEvents {
    #[serde(default)]
    events: Vec<ApiEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct ApiEvent {
    id: String,
    name: String,
    dates: EventDates,
    url: String,
    info: Option<String>,
    #[serde(default)]
    images: Vec<EventImage>,
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedVenues>,
}

#[derive(Debug, Deserialize)]
struct EventDates {
    start: EventStart,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventStart {
    local_date: String,
}

#[derive(Debug, Deserialize)]
struct EventImage {
    url: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddedVenues {
    #[serde(default)]
    venues: Vec<Venue>,
}

#[derive(Debug, Deserialize)]
struct Venue {
    name: Option<String>,
}

impl ApiEvent {
    fn into_event(self, borough: Borough) -> Event {
        let venue = self
            .embedded
            .and_then(|e| e.venues.into_iter().next())
            .and_then(|v| v.name)
            .unwrap_or_else(|| VENUE_FALLBACK.to_string());

        let info = self
            .info
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(|| INFO_FALLBACK.to_string());

        Event {
            id: self.id,
            name: self.name,
            date: self.dates.start.local_date,
            url: self.url,
            venue,
            info,
            borough,
            image: self.images.into_iter().next().map(|i| i.url),
        }
    }
}

/// Client for the upstream event discovery API.
#[derive(Clone)]
pub struct TicketingClient {
    client: Client,
    config: TicketingConfig,
}

impl TicketingClient {
    pub fn new(config: &TicketingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EncoreError::Ticketing(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Fetch one page of events for a (borough, window) pair, filtered
    /// server-side by genre, city, state, and the window's date bounds.
    pub async fn fetch_page(
        &self,
        borough: Borough,
        window: &DateWindow,
        page: u32,
    ) -> Result<EventPage> {
        let url = format!("{}/events.json", self.config.base_url);
        let query = [
            ("classificationName", self.config.classification.clone()),
            ("city", borough.city_name().to_string()),
            ("stateCode", self.config.state_code.clone()),
            ("apikey", self.config.api_key.clone()),
            ("page", page.to_string()),
            ("size", self.config.page_size.to_string()),
            ("startDateTime", window.start_date_time()),
            ("endDateTime", window.end_date_time()),
        ];

        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EncoreError::Ticketing(format!(
                "Upstream returned {status}: {body}"
            )));
        }

        let body: DiscoveryResponse = response
            .json()
            .await
            .map_err(|e| EncoreError::Ticketing(format!("Failed to parse response: {e}")))?;

        let total_pages = body.page.map(|p| p.total_pages).unwrap_or(1);
        let events = body
            .embedded
            .map(|e| {
                e.events
                    .into_iter()
                    .map(|ev| ev.into_event(borough))
                    .collect()
            })
            .unwrap_or_default();

        Ok(EventPage {
            events,
            total_pages,
        })
    }
}
