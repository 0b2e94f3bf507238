use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::Configuration;
use crate::error::{Result, SearchError};
use crate::filter::{as_records, extract, match_records};
use crate::host::Host;
use crate::source::DataSource;
use crate::state::ResultState;
use crate::types::{HostEvent, ResultSet, SearchPhase, Trigger};

// Called after every committed search, successful or not.
pub type ResultsCallback = Box<dyn Fn() + Send + Sync>;

/// A search bar bound to one remote dataset and one field.
///
/// Every search fetches the dataset again, extracts the configured path,
/// and replaces the results with the records whose field contains the
/// query. Failures are logged and leave the results empty.
///
/// Searches may run concurrently from several tasks. They are not
/// coordinated: an in-flight fetch is never cancelled and the search that
/// completes last overwrites the results, regardless of start order.
pub struct SearchBar {
    config: Configuration,
    source: Box<dyn DataSource>,
    callback: Option<ResultsCallback>,
    state: ResultState,
}

impl SearchBar {
    pub fn new(config: Configuration, source: impl DataSource + 'static) -> Self {
        Self {
            config,
            source: Box::new(source),
            callback: None,
            state: ResultState::default(),
        }
    }

    pub fn from_options(options: Value, source: impl DataSource + 'static) -> Result<Self> {
        Ok(Self::new(Configuration::from_options(options)?, source))
    }

    pub fn on_results(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn results(&self) -> Arc<ResultSet> {
        self.state.snapshot()
    }

    // One slot shared by all searches: concurrent searches overwrite each
    // other, so this is the phase of whichever search last changed it.
    pub fn phase(&self) -> SearchPhase {
        self.state.phase()
    }

    // The returned error has already been logged and the results reset.
    pub async fn search(&self, query: &str) -> Result<usize> {
        let outcome = self.update_results(query).await;
        self.notify();
        outcome
    }

    pub async fn update_results(&self, query: &str) -> Result<usize> {
        let search_id = self.state.begin_search();
        self.state.set_phase(SearchPhase::Idle);

        // Configuration problems abort before any I/O and leave results as they are.
        if let Err(err) = self.config.ensure_searchable() {
            self.fail(search_id, &err);
            return Err(err);
        }

        match self.run(search_id, query).await {
            Ok(results) => {
                let count = results.len();
                self.state.replace(results);
                self.state.set_phase(SearchPhase::Done);
                info!(search_id, query, matches = count, "search completed");
                Ok(count)
            }
            Err(err) => {
                self.state.reset();
                self.fail(search_id, &err);
                Err(err)
            }
        }
    }

    async fn run(&self, search_id: u64, query: &str) -> Result<ResultSet> {
        let url = self.config.url();
        let path = self.config.path();

        self.enter(search_id, SearchPhase::Fetching);
        let dataset = self.source.fetch(url).await?;

        self.enter(search_id, SearchPhase::Extracting);
        let items = as_records(extract(&dataset, path)?, path)?;

        self.enter(search_id, SearchPhase::Matching);
        match_records(items, self.config.field(), query)
    }

    fn enter(&self, search_id: u64, phase: SearchPhase) {
        debug!(search_id, ?phase, "search phase");
        self.state.set_phase(phase);
    }

    fn fail(&self, search_id: u64, err: &SearchError) {
        self.state.set_phase(SearchPhase::Failed);
        error!(search_id, kind = err.kind(), "{err}");
    }

    fn notify(&self) {
        match &self.callback {
            Some(callback) => callback(),
            None => error!("no results callback registered, create one with on_results"),
        }
    }

    /// Render the controls through `host` and wire them to this search bar.
    /// An unrecognized trigger aborts before anything is rendered.
    pub fn mount<H: Host>(self: Arc<Self>, mut host: H) -> Result<MountedSearchBar<H>> {
        let trigger = self.config.trigger().map_err(|err| {
            error!(kind = err.kind(), "{err}");
            err
        })?;

        host.render_toggle_control();
        host.render_input();
        debug!(trigger = trigger.as_str(), "search bar mounted");

        Ok(MountedSearchBar { bar: self, host, trigger })
    }
}

pub struct MountedSearchBar<H: Host> {
    bar: Arc<SearchBar>,
    host: H,
    trigger: Trigger,
}

impl<H: Host> MountedSearchBar<H> {
    pub fn bar(&self) -> &Arc<SearchBar> {
        &self.bar
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    // Failures are reported through the log, never returned.
    pub async fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::IconClicked => {
                self.host.toggle_expanded();
                if self.trigger == Trigger::Click {
                    let query = self.host.input_value();
                    if query.is_empty() {
                        return;
                    }
                    let _ = self.bar.update_results(&query).await;
                    self.host.clear_input();
                    self.bar.notify();
                }
            }
            HostEvent::ClearClicked => {
                self.host.toggle_expanded();
                self.host.clear_input();
            }
            HostEvent::KeyUp => {
                if self.trigger != Trigger::Keyup {
                    return;
                }
                let query = self.host.input_value();
                if query.is_empty() {
                    return;
                }
                let _ = self.bar.search(&query).await;
            }
        }
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
