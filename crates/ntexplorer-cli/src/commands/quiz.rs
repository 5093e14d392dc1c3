use std::io::{BufRead, Write};

use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use ntexplorer_core::imagery::photo_url;
use ntexplorer_core::{
    Config, Event, Filter, FilterKey, GeminiProvider, Locale, QuizFlow, RecommendationCard,
    Session, Step, UiStrings,
};

use super::{CmdResult, LocationArgs};

#[derive(Args, Debug)]
pub struct QuizArgs {
    /// Display language (en or zh); defaults to the configured locale
    #[arg(long)]
    pub lang: Option<Locale>,
    #[command(flatten)]
    pub location: LocationArgs,
    /// Print every flow event as JSON on stderr
    #[arg(long)]
    pub events: bool,
}

/// Line-oriented terminal input. `None` means stdin closed or the user quit.
struct Terminal {
    lines: std::io::Lines<std::io::StdinLock<'static>>,
    events: bool,
}

impl Terminal {
    fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{} ", prompt.bold());
        std::io::stdout().flush()?;
        match self.lines.next().transpose()? {
            Some(line) if line.trim().eq_ignore_ascii_case("q") => Ok(None),
            Some(line) => Ok(Some(line.trim().to_string())),
            None => Ok(None),
        }
    }

    fn emit(&self, event: &Event) -> CmdResult {
        if self.events {
            eprintln!("{}", serde_json::to_string(event)?);
        }
        Ok(())
    }
}

pub fn run(args: QuizArgs) -> CmdResult {
    let config = Config::load_or_default();
    let locale = args.lang.unwrap_or(config.locale);
    let location = args.location.resolve(&config);
    let provider = GeminiProvider::from_config(&config.gemini).unwrap_or_else(|err| {
        // The fetch itself reports the failure to the user.
        tracing::warn!(error = %err, "no API key configured");
        GeminiProvider::new("")
            .with_model(config.gemini.model.clone())
            .with_base_url(config.gemini.base_url.clone())
    });

    let runtime = tokio::runtime::Runtime::new()?;
    let flow = QuizFlow::default();
    let mut session = Session::new(locale);
    let mut term = Terminal {
        lines: std::io::stdin().lock().lines(),
        events: args.events,
    };

    loop {
        let locale = session.locale();
        let strings = UiStrings::for_locale(locale);
        let step = session.step();
        let question = flow.current_question(&session).cloned();

        let prompt = match step {
            Step::Welcome => {
                print_welcome(strings);
                format!("[{}]", strings.start_btn)
            }
            Step::Quiz(_) => {
                let Some(question) = &question else {
                    term.emit(&flow.go_to_filters(&mut session)?)?;
                    continue;
                };
                let progress = flow.progress_pct(&session).unwrap_or_default();
                println!();
                println!("{} {:.0}%", strings.question.dimmed(), progress);
                println!("{}", question.prompt_text(locale).bold());
                for (i, option) in question.options.iter().enumerate() {
                    println!("  {}. {}", i + 1, option.label.get(locale));
                }
                ">".to_string()
            }
            Step::Filters => {
                print_filters(&session, strings);
                format!("[{}] key=value >", strings.find_btn)
            }
            Step::Loading => {
                // Only reachable if a fetch was interrupted.
                term.emit(&flow.go_to_welcome(&mut session))?;
                continue;
            }
            Step::Results => {
                println!();
                println!("{}", strings.results_title.bold());
                for (i, card) in session.results().iter().enumerate() {
                    print_card(card, i, locale, strings);
                }
                format!("[{}]", strings.restart_btn)
            }
        };

        let Some(input) = term.ask(&prompt)? else {
            return Ok(());
        };

        // Accepted at every prompt.
        if input.eq_ignore_ascii_case("w") {
            term.emit(&flow.go_to_welcome(&mut session))?;
            continue;
        }
        if let Ok(switched) = input.parse::<Locale>() {
            tracing::debug!(locale = %switched, "switching language");
            session.set_locale(switched);
            continue;
        }

        match step {
            Step::Welcome => term.emit(&flow.start(&mut session))?,
            Step::Quiz(_) => {
                let Some(question) = question else { continue };
                let chosen = input
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| question.options.get(i));
                match chosen {
                    Some(option) => {
                        term.emit(&flow.answer(&mut session, &question.id, &option.value)?)?
                    }
                    None => println!("{}", format!("1-{}", question.options.len()).yellow()),
                }
            }
            Step::Filters if input.is_empty() => {
                let spinner = loading_spinner(strings)?;
                let fetched = runtime.block_on(flow.fetch(&mut session, &provider, location));
                spinner.finish_and_clear();
                let (started, finished) = fetched?;
                term.emit(&started)?;
                term.emit(&finished)?;
            }
            Step::Filters => {
                let change = input
                    .split_once('=')
                    .map(|(k, v)| Filter::parse(k, v.trim()));
                match change {
                    Some(Ok(filter)) => term.emit(&flow.set_filter(&mut session, filter)?)?,
                    Some(Err(err)) => println!("{}", err.to_string().yellow()),
                    None => println!("{}", FILTER_HINT.yellow()),
                }
            }
            Step::Results => term.emit(&flow.go_to_welcome(&mut session))?,
            Step::Loading => {}
        }
    }
}

const FILTER_HINT: &str = "transport=MRT, price=$$, duration=3-5h, timeOfDay=Anytime";
const GLOBAL_HINT: &str = "w = welcome, en/zh = language, q = quit";

fn print_welcome(strings: &UiStrings) {
    println!();
    println!("{}", strings.brand.bold().red());
    println!("{}", strings.welcome_title.bold());
    println!("{}", strings.welcome_subtitle.dimmed());
    println!("{}", strings.welcome_desc);
    println!("{}", GLOBAL_HINT.dimmed());
}

fn print_filters(session: &Session, strings: &UiStrings) {
    println!();
    println!("{}", strings.refine_title.bold());
    println!("{}", strings.refine_subtitle.dimmed());
    if let Some(message) = session.error() {
        println!("{}", message.red());
    }
    for key in FilterKey::ALL {
        let current = session.preferences().filter(key).label();
        println!(
            "  {:<12} {}  ({})",
            filter_title(strings, key),
            current.cyan(),
            key.options().join(" / ").dimmed()
        );
    }
}

fn filter_title(strings: &UiStrings, key: FilterKey) -> &'static str {
    match key {
        FilterKey::Transport => strings.transport,
        FilterKey::Price => strings.price,
        FilterKey::Duration => strings.duration,
        FilterKey::TimeOfDay => strings.time_of_day,
    }
}

fn loading_spinner(strings: &UiStrings) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.red} {msg}")?);
    spinner.set_message(format!(
        "{} {}",
        strings.loading_title,
        strings.loading_subtitle.dimmed()
    ));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(spinner)
}

fn print_card(card: &RecommendationCard, index: usize, locale: Locale, strings: &UiStrings) {
    println!();
    println!(
        "{}. {}  {}",
        index + 1,
        card.name(locale).bold(),
        card.alt_name(locale).dimmed()
    );
    println!(
        "   {} {}  {}",
        "★".yellow(),
        card.rating,
        card.category.to_uppercase().cyan()
    );
    if !card.highlight(locale).is_empty() {
        println!("   {}", card.highlight(locale).italic());
    }
    println!("   {}", photo_url(&card.image_keyword, index).dimmed());
    if !card.map_uri.is_empty() {
        println!("   {}: {}", strings.view_on_maps, card.map_uri.underline());
    }
}
