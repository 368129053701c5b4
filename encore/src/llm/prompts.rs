//! Prompt templates for the search summarizer.

use crate::models::EventMatch;

/// Render the retrieved matches into the context block the model sees.
fn event_context(matches: &[EventMatch]) -> String {
    matches
        .iter()
        .map(|m| {
            format!(
                "Event: {}\nDate: {}\nVenue: {}\nURL: {}",
                m.metadata.name, m.metadata.date, m.metadata.venue, m.metadata.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prompt instructing the model to answer with exactly two labeled
/// sections: a short `**Response:**` summary citing 2-3 events and a
/// `**Data:**` list of the cited URLs, one per line.
pub fn event_summary_prompt(query: &str, matches: &[EventMatch]) -> String {
    format!(
        r#"You are an AI assistant answering questions based on event data.

You MUST output your response in two clearly separated sections:
1. A "**Response:**" section with fun descriptions of exactly 2-3 events.
2. A "**Data:**" section listing ONLY the URLs of events mentioned in the Response section.

STRICT RULES (DO NOT DEVIATE):
- DO NOT list more than 3 events.
- DO NOT include extra commentary before or after the two sections.
- Failure to include the "**Data:**" section with URLs will be considered an invalid response.

EXAMPLE OUTPUT FORMAT (DO NOT CHANGE):
**Response:**
[An engaging summary of 2-3 specific events with their names, dates, and venues. Give some fun and exciting details about each event. Keep the response under 700 characters.]

**Data:**
[The URLs of the events mentioned in the response, each on a new line.]

---
**Event Data:**
{context}

**Query:**
{query}"#,
        context = event_context(matches),
    )
}
