//! Debounced city suggestions.
//!
//! Keystrokes are fed to a background worker which waits for the input to go
//! idle, issues at most one search per idle period and publishes the mapped
//! suggestions through a watch channel. Every issued search gets a new
//! generation number and only the response of the latest generation is
//! published, so a slow response can never overwrite a newer list.
//!
//! Each input is numbered, and every input that settles is answered by
//! exactly one publication carrying its number, even when no request was
//! needed (text too short, or unchanged since the last search).

use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{Instant, sleep_until},
};

use crate::{
    api::WeatherApi,
    model::{CityQuery, CitySuggestion},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteSettings {
    /// Minimum number of characters before a search is issued.
    pub min_length: usize,
    /// Idle time after the last keystroke before searching.
    #[serde(rename = "delay_ms", with = "millis")]
    pub delay: Duration,
}

impl Default for AutocompleteSettings {
    fn default() -> Self {
        Self { min_length: 3, delay: Duration::from_millis(500) }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Suggestions currently offered, tagged with the search that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionList {
    pub generation: u64,
    /// Number of the latest input this list answers.
    pub input: u64,
    pub query: String,
    pub items: Vec<CitySuggestion>,
}

#[derive(Debug)]
enum Event {
    Input(u64, String),
    Selected(String),
}

struct Completed {
    generation: u64,
    query: String,
    items: Vec<CitySuggestion>,
}

/// Handle to the suggestion worker. Dropping it stops the worker.
#[derive(Debug)]
pub struct Autocomplete {
    input: mpsc::UnboundedSender<Event>,
    suggestions: watch::Receiver<SuggestionList>,
    worker: JoinHandle<()>,
    last_input: u64,
}

impl Autocomplete {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(api: Arc<dyn WeatherApi>, settings: AutocompleteSettings) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (publish, suggestions) = watch::channel(SuggestionList::default());

        let worker = tokio::spawn(run(api, settings, input_rx, publish));

        Self { input: input_tx, suggestions, worker, last_input: 0 }
    }

    /// Report the current content of the city field after a keystroke.
    /// Returns the number the answering list will carry.
    pub fn input(&mut self, text: impl Into<String>) -> u64 {
        self.last_input += 1;
        self.send(Event::Input(self.last_input, text.into()));
        self.last_input
    }

    /// A suggestion was picked: its label becomes the current term, the
    /// list closes and any pending or in-flight search is abandoned.
    pub fn selected(&self, label: impl Into<String>) {
        self.send(Event::Selected(label.into()));
    }

    fn send(&self, event: Event) {
        if self.input.send(event).is_err() {
            tracing::warn!("autocomplete worker is gone, dropping input");
        }
    }

    /// Latest published list.
    pub fn current(&self) -> SuggestionList {
        self.suggestions.borrow().clone()
    }

    /// Wait until a new list is published. Returns `None` once the worker
    /// has stopped.
    pub async fn changed(&mut self) -> Option<SuggestionList> {
        self.suggestions.changed().await.ok()?;
        Some(self.suggestions.borrow_and_update().clone())
    }

    /// Wait for the list answering input number `input` or a later one.
    /// Returns `None` once the worker has stopped.
    pub async fn answer(&mut self, input: u64) -> Option<SuggestionList> {
        let list = self.suggestions.wait_for(|list| list.input >= input).await.ok()?;
        Some(list.clone())
    }
}

impl Drop for Autocomplete {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run(
    api: Arc<dyn WeatherApi>,
    settings: AutocompleteSettings,
    mut input: mpsc::UnboundedReceiver<Event>,
    publish: watch::Sender<SuggestionList>,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completed>();

    let mut pending: Option<(u64, String, Instant)> = None;
    let mut last_term: Option<String> = None;
    let mut generation: u64 = 0;
    // input number the in-flight search of `generation` will answer
    let mut awaiting: Option<u64> = None;

    loop {
        let deadline = pending.as_ref().map(|(_, _, at)| *at);

        tokio::select! {
            event = input.recv() => match event {
                Some(Event::Input(seq, text)) => {
                    pending = Some((seq, text, Instant::now() + settings.delay));
                }
                Some(Event::Selected(label)) => {
                    let dropped = pending.take().map(|(seq, _, _)| seq);
                    generation += 1;
                    awaiting = None;
                    last_term = Some(label);
                    publish.send_modify(|list| close(list, generation, dropped));
                }
                None => break,
            },

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                let Some((seq, text, _)) = pending.take() else { continue };
                let query = CityQuery::new(text);

                if query.len() < settings.min_length {
                    // close the list and invalidate anything still in flight
                    generation += 1;
                    awaiting = None;
                    last_term = None;
                    publish.send_modify(|list| close(list, generation, Some(seq)));
                    continue;
                }

                if last_term.as_deref() == Some(query.as_str()) {
                    match awaiting {
                        Some(_) => awaiting = Some(seq),
                        None => publish.send_modify(|list| list.input = seq),
                    }
                    continue;
                }

                generation += 1;
                awaiting = Some(seq);
                last_term = Some(query.to_string());
                tracing::debug!(%query, generation, "searching cities");

                tokio::spawn(search(Arc::clone(&api), query, generation, done_tx.clone()));
            }

            Some(done) = done_rx.recv() => {
                let current = done.generation == generation;
                let Some(seq) = awaiting.filter(|_| current) else {
                    tracing::debug!(query = %done.query, generation = done.generation, "discarding stale suggestions");
                    continue;
                };
                awaiting = None;

                publish.send_replace(SuggestionList {
                    generation: done.generation,
                    input: seq,
                    query: done.query,
                    items: done.items,
                });
            }
        }
    }
}

/// Empty the list, marking it as the answer to input `seq` when given.
fn close(list: &mut SuggestionList, generation: u64, seq: Option<u64>) {
    list.generation = generation;
    list.items.clear();
    if let Some(seq) = seq {
        list.input = seq;
    }
}

async fn search(
    api: Arc<dyn WeatherApi>,
    query: CityQuery,
    generation: u64,
    done: mpsc::UnboundedSender<Completed>,
) {
    let items = match api.cities(&query).await {
        Ok(cities) => cities.into_iter().map(CitySuggestion::from).collect(),
        Err(err) => {
            tracing::debug!(%query, error = %err, "city search failed");
            Vec::new()
        }
    };

    let _ = done.send(Completed { generation, query: query.to_string(), items });
}
