use clap::Args;
use ntexplorer_core::{Locale, QuizCatalog, QuizQuestion};
use serde::Serialize;

use super::CmdResult;

#[derive(Args, Debug)]
pub struct QuestionsArgs {
    /// Print only the text for this locale (en or zh)
    #[arg(long)]
    pub lang: Option<Locale>,
}

#[derive(Serialize)]
struct LocalizedQuestion<'a> {
    id: &'a str,
    prompt: &'a str,
    options: Vec<LocalizedOption<'a>>,
}

#[derive(Serialize)]
struct LocalizedOption<'a> {
    value: &'a str,
    label: &'a str,
}

#[derive(Serialize)]
struct LocalizedCatalog<'a> {
    linear: Vec<LocalizedQuestion<'a>>,
    solo_branch: LocalizedQuestion<'a>,
    group_branch: LocalizedQuestion<'a>,
}

fn localize(question: &QuizQuestion, locale: Locale) -> LocalizedQuestion<'_> {
    LocalizedQuestion {
        id: &question.id,
        prompt: question.prompt_text(locale),
        options: question
            .options
            .iter()
            .map(|o| LocalizedOption {
                value: &o.value,
                label: o.label.get(locale),
            })
            .collect(),
    }
}

pub fn run(args: QuestionsArgs) -> CmdResult {
    let catalog = QuizCatalog::northern_taiwan();
    let json = match args.lang {
        Some(locale) => serde_json::to_string_pretty(&LocalizedCatalog {
            linear: catalog.linear.iter().map(|q| localize(q, locale)).collect(),
            solo_branch: localize(&catalog.solo_branch, locale),
            group_branch: localize(&catalog.group_branch, locale),
        })?,
        None => serde_json::to_string_pretty(&catalog)?,
    };
    println!("{json}");
    Ok(())
}
