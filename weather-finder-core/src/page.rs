//! Headless model of the weather page markup.
//!
//! The flows only ever read form fields and write element text/visibility,
//! so the page is kept as plain state that any front end can render.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::{
    model::{CityId, CitySuggestion, WeatherResult},
    navigation::{MenuItem, Navigation, Transition},
};

/// Output elements of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Location,
    Degree,
    Description,
    MinTemp,
    MaxTemp,
    Humidity,
    WindSpeed,
    WindDirection,
    Pressure,
    Placeholder,
    WeatherData,
    Error,
}

impl Element {
    pub const ALL: [Element; 12] = [
        Element::Location,
        Element::Degree,
        Element::Description,
        Element::MinTemp,
        Element::MaxTemp,
        Element::Humidity,
        Element::WindSpeed,
        Element::WindDirection,
        Element::Pressure,
        Element::Placeholder,
        Element::WeatherData,
        Element::Error,
    ];

    /// Elements filled from a `WeatherResult`.
    pub const WEATHER_FIELDS: [Element; 9] = [
        Element::Location,
        Element::Degree,
        Element::Description,
        Element::MinTemp,
        Element::MaxTemp,
        Element::Humidity,
        Element::WindSpeed,
        Element::WindDirection,
        Element::Pressure,
    ];

    fn initially_visible(self) -> bool {
        !matches!(self, Element::WeatherData | Element::Error)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub text: String,
    pub visible: bool,
}

/// Day and date shown at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub day: String,
    pub date: String,
}

impl Header {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            day: date.format("%A").to_string(),
            date: date.format("%d %b %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    header: Header,
    navigation: Navigation,
    city_text: String,
    city_value: Option<CityId>,
    language: Option<String>,
    elements: HashMap<Element, ElementState>,
    suggestions: Vec<CitySuggestion>,
}

impl Page {
    /// Page as it looks right after loading: placeholder shown, weather
    /// panel and error hidden, mobile menu cloned from `menu` and collapsed.
    pub fn ready(menu: Vec<MenuItem>, today: NaiveDate) -> Self {
        let elements = Element::ALL
            .into_iter()
            .map(|el| (el, ElementState { text: String::new(), visible: el.initially_visible() }))
            .collect();

        Self {
            header: Header::for_date(today),
            navigation: Navigation::new(menu),
            city_text: String::new(),
            city_value: None,
            language: None,
            elements,
            suggestions: Vec::new(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn toggle_navigation(&mut self) -> Transition {
        self.navigation.toggle()
    }

    pub fn city_text(&self) -> &str {
        &self.city_text
    }

    pub fn set_city_text(&mut self, text: impl Into<String>) {
        self.city_text = text.into();
    }

    /// Hidden identifier field; only suggestion selection writes it.
    pub fn city_value(&self) -> Option<CityId> {
        self.city_value
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
    }

    pub fn element(&self, el: Element) -> &ElementState {
        // every element is inserted in `ready`
        &self.elements[&el]
    }

    pub fn text(&self, el: Element) -> &str {
        &self.element(el).text
    }

    pub fn is_visible(&self, el: Element) -> bool {
        self.element(el).visible
    }

    pub fn set_text(&mut self, el: Element, text: impl Into<String>) {
        self.elements.entry(el).or_default().text = text.into();
    }

    pub fn show(&mut self, el: Element) {
        self.elements.entry(el).or_default().visible = true;
    }

    pub fn hide(&mut self, el: Element) {
        self.elements.entry(el).or_default().visible = false;
    }

    pub fn suggestions(&self) -> &[CitySuggestion] {
        &self.suggestions
    }

    /// Replace the suggestion container's items.
    pub fn render_suggestions(&mut self, items: Vec<CitySuggestion>) {
        self.suggestions = items;
    }

    /// Fill the visible and hidden city fields from a chosen suggestion and
    /// close the suggestion list.
    pub fn select_suggestion(&mut self, suggestion: &CitySuggestion) {
        self.city_text = suggestion.label.clone();
        self.city_value = Some(suggestion.value);
        self.suggestions.clear();
    }

    /// Write every weather attribute into its element and swap the
    /// placeholder for the weather panel.
    pub fn render_weather(&mut self, weather: &WeatherResult) {
        self.set_text(Element::Location, &weather.city);
        self.set_text(Element::Degree, weather.temperature.average.to_string());
        self.set_text(Element::Description, &weather.description);
        self.set_text(Element::MinTemp, weather.temperature.min.to_string());
        self.set_text(Element::MaxTemp, weather.temperature.max.to_string());
        self.set_text(Element::Humidity, weather.humidity.to_string());
        self.set_text(Element::WindSpeed, weather.wind.speed.to_string());
        self.set_text(Element::WindDirection, weather.wind.direction.to_string());
        self.set_text(Element::Pressure, weather.pressure.to_string());

        self.hide(Element::Placeholder);
        self.show(Element::WeatherData);
        self.hide(Element::Error);
    }

    pub fn render_error(&mut self, message: impl Into<String>) {
        self.set_text(Element::Error, message);
        self.show(Element::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Reading, Temperature, Wind, WindDirection};

    fn page() -> Page {
        Page::ready(vec![MenuItem::new("Home", "/")], NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
    }

    #[test]
    fn ready_page_shows_placeholder_only() {
        let page = page();

        assert!(page.is_visible(Element::Placeholder));
        assert!(!page.is_visible(Element::WeatherData));
        assert!(!page.is_visible(Element::Error));
        assert_eq!(page.city_value(), None);
        assert!(page.suggestions().is_empty());
    }

    #[test]
    fn header_uses_day_name_and_short_date() {
        let page = page();
        assert_eq!(page.header().day, "Saturday");
        assert_eq!(page.header().date, "17 Oct 2026");
    }

    #[test]
    fn render_weather_fills_every_field() {
        let mut page = page();
        page.render_error("previous failure");

        let weather = WeatherResult {
            city: "Springfield".into(),
            temperature: Temperature { average: 20_i64.into(), min: 15_i64.into(), max: 25_i64.into() },
            description: "Clear".into(),
            humidity: 40_i64.into(),
            wind: Wind { speed: Reading::from("5 m/s"), direction: WindDirection("N".into()) },
            pressure: 1012_i64.into(),
        };
        page.render_weather(&weather);

        let texts: Vec<&str> = Element::WEATHER_FIELDS.iter().map(|el| page.text(*el)).collect();
        assert_eq!(
            texts,
            ["Springfield", "20", "Clear", "15", "25", "40", "5 m/s", "N", "1012"]
        );
        assert!(!page.is_visible(Element::Placeholder));
        assert!(page.is_visible(Element::WeatherData));
        assert!(!page.is_visible(Element::Error));
    }

    #[test]
    fn selecting_sets_both_fields_and_closes_list() {
        let mut page = page();
        let suggestion = CitySuggestion { label: "Springfield".into(), value: CityId(42) };
        page.render_suggestions(vec![suggestion.clone()]);
        page.set_city_text("Spr");

        page.select_suggestion(&suggestion);

        assert_eq!(page.city_text(), "Springfield");
        assert_eq!(page.city_value(), Some(CityId(42)));
        assert!(page.suggestions().is_empty());
    }

    #[test]
    fn typing_keeps_selected_identifier() {
        let mut page = page();
        page.select_suggestion(&CitySuggestion { label: "Springfield".into(), value: CityId(42) });

        page.set_city_text("Springfiel");

        assert_eq!(page.city_value(), Some(CityId(42)));
    }
}
