use clap::Args;
use ntexplorer_core::{build_request, Config, Filter, FilterKey, UserPreferences, ValidationError};

use super::{CmdResult, LocationArgs};

#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Quiz answer as question_id=value (repeatable, in answer order)
    #[arg(long = "answer", value_name = "ID=VALUE")]
    pub answers: Vec<String>,
    /// MRT, Bus, Walking or Car
    #[arg(long)]
    pub transport: Option<String>,
    /// $, $$ or $$$
    #[arg(long)]
    pub price: Option<String>,
    /// 1-2h, 3-5h or "Full Day"
    #[arg(long)]
    pub duration: Option<String>,
    /// Daytime, Nightlife or Anytime
    #[arg(long)]
    pub time_of_day: Option<String>,
    #[command(flatten)]
    pub location: LocationArgs,
}

fn split_answer(raw: &str) -> Result<(&str, &str), ValidationError> {
    match raw.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => Ok((id.trim(), value.trim())),
        _ => Err(ValidationError::InvalidValue {
            field: "answer".to_string(),
            message: format!("expected ID=VALUE, got '{raw}'"),
        }),
    }
}

pub fn run(args: PromptArgs) -> CmdResult {
    let mut preferences = UserPreferences::reset();
    for raw in &args.answers {
        let (id, value) = split_answer(raw)?;
        preferences.record_answer(id, value);
    }

    let filters = [
        (FilterKey::Transport, &args.transport),
        (FilterKey::Price, &args.price),
        (FilterKey::Duration, &args.duration),
        (FilterKey::TimeOfDay, &args.time_of_day),
    ];
    for (key, value) in filters {
        if let Some(value) = value {
            preferences.set_filter(Filter::parse(key.name(), value)?);
        }
    }

    let config = Config::load_or_default();
    let request = build_request(&preferences, args.location.resolve(&config));
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_equals() {
        assert_eq!(split_answer("food=a=b").unwrap(), ("food", "a=b"));
        assert_eq!(split_answer(" social = solo ").unwrap(), ("social", "solo"));
    }

    #[test]
    fn rejects_missing_id() {
        assert!(split_answer("=solo").is_err());
        assert!(split_answer("solo").is_err());
    }
}
