use std::collections::HashSet;
use std::sync::Arc;

use crate::config::TicketingConfig;
use crate::ingest::rate::RatePolicy;
use crate::ingest::windows::{month_windows, DateWindow};
use crate::models::{Borough, Event};
use crate::ticketing::TicketingClient;

/// Sequential paginated fetch across every (borough, window) pair.
///
/// The dedup set spans the whole run, so a listing that appears in several
/// windows or boroughs is attributed to the first pair that returned it.
pub struct EventFetcher {
    client: TicketingClient,
    config: TicketingConfig,
    rate: Arc<dyn RatePolicy>,
}

impl EventFetcher {
    pub fn new(
        client: TicketingClient,
        config: TicketingConfig,
        rate: Arc<dyn RatePolicy>,
    ) -> Self {
        Self {
            client,
            config,
            rate,
        }
    }

    /// Fetch every window for every borough, strictly in sequence. Failures
    /// are confined to their window; the run always continues.
    pub async fn fetch_all(&self) -> Vec<Event> {
        let windows = month_windows(self.config.start_date, self.config.end_date);

        let mut all_events = Vec::new();
        let mut seen = HashSet::new();

        for borough in Borough::ALL {
            for window in &windows {
                let events = self.fetch_window(borough, window, &mut seen).await;

                tracing::info!(
                    "Fetched {} unique events from {} ({} - {})",
                    events.len(),
                    borough,
                    window.start,
                    window.end
                );
                all_events.extend(events);

                tokio::time::sleep(self.rate.window_delay()).await;
            }
        }

        all_events
    }

    /// One (borough, window) pass: page through results until the reported
    /// page count or the per-window cap is reached. `seen` is the run-wide
    /// id set threaded through every window. An upstream error ends the
    /// window early, keeping whatever pages already arrived.
    async fn fetch_window(
        &self,
        borough: Borough,
        window: &DateWindow,
        seen: &mut HashSet<String>,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        let mut page = 0u32;
        let mut total_pages = 1u32;

        while page < total_pages
            && page * self.config.page_size < self.config.max_results_per_window
        {
            let fetched = match self.client.fetch_page(borough, window, page).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    tracing::warn!(
                        "Error fetching events for {} ({} - {}): {}",
                        borough,
                        window.start,
                        window.end,
                        e
                    );
                    break;
                }
            };

            total_pages = fetched.total_pages;

            for event in fetched.events {
                if seen.insert(event.id.clone()) {
                    events.push(event);
                }
            }

            page += 1;
            tokio::time::sleep(self.rate.page_delay()).await;
        }

        events
    }
}
