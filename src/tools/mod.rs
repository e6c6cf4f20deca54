pub mod serpapi;

pub use serpapi::{search_web, SearchError, WebSearch};
