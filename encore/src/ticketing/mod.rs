mod client;

pub use client::{EventPage, TicketingClient};
