use crate::{
    api::WeatherApi,
    model::{WeatherRequest, WeatherResult},
    page::Page,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// No city was selected, so nothing was requested.
    Skipped,
    Rendered(WeatherResult),
    /// The lookup failed; carries the message now shown in the error element.
    Failed(String),
}

/// Handle a submission of the find-location form.
///
/// The request is keyed off the hidden city identifier, never the visible
/// text, so free text that was not picked from the suggestions never reaches
/// the backend.
pub async fn submit(page: &mut Page, api: &dyn WeatherApi) -> LookupOutcome {
    let Some(city_id) = page.city_value() else {
        tracing::debug!(text = page.city_text(), "no city selected, skipping lookup");
        return LookupOutcome::Skipped;
    };

    let request = WeatherRequest::new(city_id).with_language(page.language().map(str::to_owned));

    match api.weather(&request).await {
        Ok(weather) => {
            page.render_weather(&weather);
            LookupOutcome::Rendered(weather)
        }
        Err(err) => {
            tracing::warn!(city_id = %city_id, error = %err, "weather lookup failed");
            let message = err.user_message();
            page.render_error(message.clone());
            LookupOutcome::Failed(message)
        }
    }
}
