use std::sync::Arc;

use crate::{
    api::WeatherApi,
    autocomplete::{Autocomplete, AutocompleteSettings},
    lookup::{self, LookupOutcome},
    model::CitySuggestion,
    navigation::Transition,
    page::Page,
};

/// One loaded page with all of its interactions wired up.
///
/// Created once per page load; owns the page state, so every handler runs
/// against it sequentially.
#[derive(Debug)]
pub struct Session {
    api: Arc<dyn WeatherApi>,
    page: Page,
    autocomplete: Autocomplete,
    /// Number of the last city-field input still waiting for its list.
    typed: Option<u64>,
}

impl Session {
    /// Must be called from within a tokio runtime.
    pub fn start(api: Arc<dyn WeatherApi>, settings: AutocompleteSettings, page: Page) -> Self {
        let autocomplete = Autocomplete::spawn(Arc::clone(&api), settings);
        Self { api, page, autocomplete, typed: None }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn toggle_menu(&mut self) -> Transition {
        self.page.toggle_navigation()
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.page.set_language(language);
    }

    /// Keystroke in the city field.
    pub fn type_city(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.page.set_city_text(text.clone());
        self.typed = Some(self.autocomplete.input(text));
    }

    /// Wait for the list answering the latest input and render it into the
    /// page. Lists published for earlier inputs or selections are skipped.
    /// Without a pending input the rendered list is returned as is.
    pub async fn next_suggestions(&mut self) -> &[CitySuggestion] {
        if let Some(seq) = self.typed.take() {
            if let Some(list) = self.autocomplete.answer(seq).await {
                self.page.render_suggestions(list.items);
            }
        }
        self.page.suggestions()
    }

    pub fn select(&mut self, suggestion: &CitySuggestion) {
        self.page.select_suggestion(suggestion);
        self.typed = None;
        self.autocomplete.selected(suggestion.label.clone());
    }

    /// Select the suggestion at `index` of the rendered list.
    pub fn select_index(&mut self, index: usize) -> Option<CitySuggestion> {
        let suggestion = self.page.suggestions().get(index).cloned()?;
        self.select(&suggestion);
        Some(suggestion)
    }

    pub async fn submit(&mut self) -> LookupOutcome {
        lookup::submit(&mut self.page, self.api.as_ref()).await
    }
}
