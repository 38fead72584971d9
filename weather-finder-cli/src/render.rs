use std::fmt;

use weather_finder_core::{CitySuggestion, Element, Page};

const PLACEHOLDER: &str = "Search for a city to see its weather.";

/// Terminal rendering of the page: header, mobile menu, weather panel or
/// placeholder, and the error line.
pub struct PageView<'a>(pub &'a Page);

impl fmt::Display for PageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        let header = page.header();
        writeln!(f, "{}, {}", header.day, header.date)?;

        let nav = page.navigation();
        if nav.is_mobile_visible() {
            for item in nav.mobile_menu() {
                writeln!(f, "  > {} ({})", item.label, item.href)?;
            }
        }

        if page.is_visible(Element::WeatherData) {
            writeln!(f)?;
            writeln!(f, "{}", page.text(Element::Location))?;
            writeln!(f, "  {}  {}", page.text(Element::Degree), page.text(Element::Description))?;
            writeln!(f, "  min {}  max {}", page.text(Element::MinTemp), page.text(Element::MaxTemp))?;
            writeln!(f, "  humidity  {}", page.text(Element::Humidity))?;
            writeln!(
                f,
                "  wind      {} {}",
                page.text(Element::WindSpeed),
                page.text(Element::WindDirection)
            )?;
            writeln!(f, "  pressure  {}", page.text(Element::Pressure))?;
        } else if page.is_visible(Element::Placeholder) {
            writeln!(f)?;
            writeln!(f, "{PLACEHOLDER}")?;
        }

        if page.is_visible(Element::Error) {
            writeln!(f)?;
            writeln!(f, "error: {}", page.text(Element::Error))?;
        }

        Ok(())
    }
}

pub fn page(page: &Page) -> String {
    PageView(page).to_string()
}

pub fn suggestion(s: &CitySuggestion) -> String {
    format!("{} (id {})", s.label, s.value)
}
