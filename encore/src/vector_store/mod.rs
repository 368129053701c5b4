mod client;

pub use client::{VectorIndex, VectorStoreClient};
