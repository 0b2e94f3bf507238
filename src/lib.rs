//! Embeddable search bar.
//!
//! Fetches a JSON document from a URL, optionally descends a dot-separated
//! path to a list of records, and keeps the records whose configured field
//! contains the query, ignoring case. Rendering is left to a [`Host`].

pub mod config;
pub mod error;
pub mod filter;
pub mod host;
pub mod search;
pub mod source;
pub mod state;
pub mod types;

pub use config::Configuration;
pub use error::{FetchError, SearchError};
pub use host::Host;
pub use search::{MountedSearchBar, SearchBar};
pub use source::{DataSource, HttpDataSource};
pub use types::{HostEvent, Record, ResultSet, SearchPhase, Trigger};
