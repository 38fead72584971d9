use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use std::{sync::Arc, time::Duration};
use weather_finder_core::{
    CityId, CityQuery, CitySuggestion, Config, HttpWeatherApi, LookupOutcome, Page, Session,
    Transition, WeatherApi,
};

use crate::render;

/// Extra time granted to a search on top of the debounce delay.
const SEARCH_WAIT: Duration = Duration::from_secs(30);

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-finder", version, about = "Find the weather for a city")]
pub struct Cli {
    /// Backend URL; overrides the configured one.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the backend URL and default language.
    Configure,

    /// List city suggestions for a partial name.
    Cities {
        /// Partial city name, e.g. "Spr".
        query: String,
    },

    /// Show the weather for a city id.
    Show {
        city_id: CityId,

        /// Language code for the description, e.g. "de".
        #[arg(long)]
        language: Option<String>,
    },

    /// Search interactively, pick a city and show its weather (default).
    Find {
        #[arg(long)]
        language: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    ToggleMenu,
    Quit,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Action::Search => "Search for a city",
            Action::ToggleMenu => "Toggle menu",
            Action::Quit => "Quit",
        })
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(url) = self.base_url {
            config.set_base_url(url);
        }

        match self.command.unwrap_or(Command::Find { language: None }) {
            Command::Configure => configure(config),
            Command::Cities { query } => cities(&config, query).await,
            Command::Show { city_id, language } => show(&config, city_id, language).await,
            Command::Find { language } => find(&config, language).await,
        }
    }
}

fn api(config: &Config) -> anyhow::Result<Arc<dyn WeatherApi>> {
    Ok(Arc::new(HttpWeatherApi::new(config.base_url()?)))
}

fn start_session(config: &Config, language: Option<String>) -> anyhow::Result<Session> {
    let today = chrono::Local::now().date_naive();
    let page = Page::ready(config.menu.clone(), today);

    let mut session = Session::start(api(config)?, config.autocomplete, page);
    session.set_language(language.or_else(|| config.language.clone()));
    Ok(session)
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current_url = config.base_url.clone().unwrap_or_default();
    let url = Text::new("Backend URL:")
        .with_default(&current_url)
        .with_help_message("e.g. http://localhost:8000")
        .prompt()
        .context("Failed to read backend URL")?;

    let current_language = config.language.clone().unwrap_or_default();
    let language = Text::new("Default language (blank for none):")
        .with_default(&current_language)
        .prompt()
        .context("Failed to read language")?;

    config.set_base_url(url.trim());
    config.set_language(Some(language));
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn cities(config: &Config, query: String) -> anyhow::Result<()> {
    let query = CityQuery::new(query);
    let min_length = config.autocomplete.min_length;
    if query.len() < min_length {
        println!("Type at least {min_length} characters to search.");
        return Ok(());
    }

    let found = api(config)?.cities(&query).await.unwrap_or_else(|err| {
        tracing::debug!(error = %err, "city search failed");
        Vec::new()
    });

    for city in found {
        println!("{}", render::suggestion(&CitySuggestion::from(city)));
    }
    Ok(())
}

async fn show(config: &Config, city_id: CityId, language: Option<String>) -> anyhow::Result<()> {
    let mut session = start_session(config, language)?;
    session.select(&CitySuggestion { label: city_id.to_string(), value: city_id });

    let outcome = session.submit().await;
    print!("{}", render::page(session.page()));

    match outcome {
        LookupOutcome::Failed(message) => Err(anyhow::anyhow!(message)),
        _ => Ok(()),
    }
}

async fn find(config: &Config, language: Option<String>) -> anyhow::Result<()> {
    let mut session = start_session(config, language)?;
    print!("{}", render::page(session.page()));

    loop {
        let action = Select::new("Action:", vec![Action::Search, Action::ToggleMenu, Action::Quit])
            .prompt_skippable()?
            .unwrap_or(Action::Quit);

        match action {
            Action::Search => search(&mut session, config).await?,
            Action::ToggleMenu => {
                if session.toggle_menu() == Transition::SlideUp {
                    println!("Menu closed.");
                }
            }
            Action::Quit => return Ok(()),
        }

        print!("{}", render::page(session.page()));
    }
}

async fn search(session: &mut Session, config: &Config) -> anyhow::Result<()> {
    let Some(text) = Text::new("City:").prompt_skippable()? else {
        return Ok(());
    };

    let min_length = config.autocomplete.min_length;
    if text.trim().chars().count() < min_length {
        println!("Type at least {min_length} characters to search.");
        return Ok(());
    }

    session.type_city(text.trim());
    let wait = config.autocomplete.delay + SEARCH_WAIT;
    if tokio::time::timeout(wait, session.next_suggestions()).await.is_err() {
        tracing::debug!("no new suggestions arrived");
    }

    let options: Vec<String> = session.page().suggestions().iter().map(render::suggestion).collect();
    if options.is_empty() {
        return Ok(());
    }

    let Some(picked) = Select::new("Pick a city:", options).raw_prompt_skippable()? else {
        return Ok(());
    };

    if session.select_index(picked.index).is_some() {
        session.submit().await;
    }
    Ok(())
}
