use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing_subscriber::EnvFilter;

use settings::AppState;
use storage::{ImportOutcome, Storage, WordEntry};
use streak::StreakTransition;
use utilities::{confirm, input};

mod quiz;
mod settings;
mod storage;
mod streak;
mod utilities;

#[cfg(test)]
mod tests;

/// Bundled word list documents imported on first launch, one per category.
const WORD_LIST_DIR: &str = "data";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::builder().from_env_lossy())
        .init();

    let storage = Storage::initialize().await?;
    let mut state = AppState::load(&storage).await?;

    record_login(&storage, &mut state, Local::now().date_naive()).await?;

    if !state.first_launch_done {
        seed_word_lists(&storage).await?;
        state.first_launch_done = true;
        state.save(&storage).await?;
    }

    println!("Current streak: {} day(s).", state.streak);
    loop {
        let line = input(">> ")?;
        let line = line.trim();
        let mut command_parts = line.split_ascii_whitespace();
        if let Some(command) = command_parts.next() {
            match command {
                "exit" | "leave" | "quit" | "e" | "q" | "l" => {
                    break;
                }
                "import" => {
                    let path = command_parts.next().map(str::to_owned);
                    let label = command_parts.next();
                    match path {
                        Some(path) => {
                            import_command(&storage, Path::new(&path), label).await?;
                        }
                        None => println!("Usage: import <file> [category]"),
                    }
                }
                "categories" => {
                    list_categories(&storage).await?;
                }
                "list" => {
                    let label = command_parts.collect::<Vec<&str>>().join(" ");
                    if label.is_empty() {
                        println!("Usage: list <category>");
                    } else {
                        list_category(&storage, &label).await?;
                    }
                }
                "browse" => {
                    let label = command_parts.collect::<Vec<&str>>().join(" ");
                    if label.is_empty() {
                        println!("Usage: browse <category>");
                    } else {
                        browse(&storage, &mut state, &label).await?;
                    }
                }
                "saved" => {
                    list_saved(&storage).await?;
                }
                "favorite" | "fav" | "save" => {
                    let word = command_parts.collect::<Vec<&str>>().join(" ");
                    if word.is_empty() {
                        println!("Usage: favorite <word>");
                    } else {
                        toggle_favorite(&storage, &word).await?;
                    }
                }
                "streak" => {
                    println!(
                        "Current streak: {} day(s). Last login: {}.",
                        state.streak, state.last_login
                    );
                }
                "quiz" | "practice" => {
                    practice(&storage).await?;
                }
                _ => {
                    println!("Unknown command {command}.");
                }
            }
        }
    }
    Ok(())
}

/// Applies the streak policy for a launch on `today` and stores the date
/// back, so the next launch diffs against this one.
async fn record_login(
    storage: &Storage,
    state: &mut AppState,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let delta = streak::streak_delta(&state.last_login, today);
    let transition = StreakTransition::from_delta(delta);
    state.streak = transition.apply(state.streak);
    state.last_login = today.format(streak::DATE_FORMAT).to_string();
    state.save(storage).await?;
    tracing::info!(delta, streak = state.streak, "recorded login");
    Ok(())
}

/// First-launch import of every bundled word list document. A document that
/// fails to load or parse is reported and skipped; it does not abort the
/// launch or the other documents.
async fn seed_word_lists(storage: &Storage) -> anyhow::Result<()> {
    let entries = match std::fs::read_dir(WORD_LIST_DIR) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(%error, "no bundled word lists to import");
            return Ok(());
        }
    };
    for entry in entries {
        let path = entry?.path();
        if path.extension().map(|ext| ext == "json").unwrap_or(false) {
            let Some(label) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match import_document(storage, &path, label).await {
                Ok(outcome) => {
                    println!("Imported {} word(s) into '{label}'.", outcome.words_inserted);
                }
                Err(error) => {
                    eprintln!("Failed to import {}: {error}", path.display());
                }
            }
        }
    }
    Ok(())
}

async fn import_document(
    storage: &Storage,
    path: &Path,
    label: &str,
) -> anyhow::Result<ImportOutcome> {
    let bytes = wordlist::load_document(path)?;
    let records = wordlist::parse(&bytes)?;
    Ok(storage.import_batch(&records, label).await?)
}

async fn import_command(
    storage: &Storage,
    path: &Path,
    label: Option<&str>,
) -> anyhow::Result<()> {
    let label = match label {
        Some(label) => label.to_owned(),
        None => match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => stem.to_owned(),
            None => {
                println!("Cannot derive a category from {}.", path.display());
                return Ok(());
            }
        },
    };
    if storage.category_by_label(&label).await?.is_some() {
        let proceed = confirm(
            &format!("Category '{label}' already exists, import into it anyway? (y/N): "),
            false,
        )?;
        if !proceed {
            return Ok(());
        }
    }
    match import_document(storage, path, &label).await {
        Ok(outcome) => {
            println!("Imported {} word(s) into '{label}'.", outcome.words_inserted);
        }
        Err(error) => {
            eprintln!("Failed to import {}: {error}", path.display());
        }
    }
    Ok(())
}

async fn list_categories(storage: &Storage) -> anyhow::Result<()> {
    let categories = storage.categories().await?;
    if categories.is_empty() {
        println!("No categories yet.");
        return Ok(());
    }
    for category in categories {
        let count = storage.words_in_category(category.uid).await?.len();
        println!("{} ({count} words)", category.label);
    }
    Ok(())
}

async fn list_category(storage: &Storage, label: &str) -> anyhow::Result<()> {
    match storage.category_by_label(label).await? {
        Some(category) => {
            let words = storage.words_in_category(category.uid).await?;
            if words.is_empty() {
                println!("Category '{label}' has no words yet.");
            }
            for (index, word) in words.iter().enumerate() {
                if index != 0 {
                    println!("----------------------------------------");
                }
                print_card(word);
            }
        }
        None => println!("No category named '{label}'."),
    }
    Ok(())
}

/// Pages through a category one card at a time, resuming from wherever the
/// user left off last time.
async fn browse(storage: &Storage, state: &mut AppState, label: &str) -> anyhow::Result<()> {
    let Some(category) = storage.category_by_label(label).await? else {
        println!("No category named '{label}'.");
        return Ok(());
    };
    let mut words = storage.words_in_category(category.uid).await?;
    if words.is_empty() {
        println!("Category '{label}' has no words yet.");
        return Ok(());
    }
    let mut index = usize::try_from(state.last_scroll_index)
        .unwrap_or(0)
        .min(words.len() - 1);
    loop {
        println!("--- {}/{} in {label} ---", index + 1, words.len());
        print_card(&words[index]);
        let action = input("[n]ext, [p]rev, [f]avorite, [b]ack: ")?;
        match action.trim() {
            "n" | "next" => index = (index + 1).min(words.len() - 1),
            "p" | "prev" => index = index.saturating_sub(1),
            "f" | "fav" | "favorite" => {
                let word = &mut words[index];
                word.is_favorite = storage.toggle_favorite(word.uid).await?;
            }
            "b" | "back" | "q" => break,
            other => println!("Unknown action {other}."),
        }
    }
    state.last_scroll_index = index as i64;
    state.save(storage).await?;
    Ok(())
}

async fn list_saved(storage: &Storage) -> anyhow::Result<()> {
    let words = storage.favorite_words().await?;
    if words.is_empty() {
        println!("No saved words yet.");
        return Ok(());
    }
    for word in words {
        println!("{}: {}", word.word, word.definition);
    }
    Ok(())
}

async fn toggle_favorite(storage: &Storage, word: &str) -> anyhow::Result<()> {
    match storage.word_by_text(word).await? {
        Some(entry) => {
            let saved = storage.toggle_favorite(entry.uid).await?;
            if saved {
                println!("Added '{}' to saved words.", entry.word);
            } else {
                println!("Removed '{}' from saved words.", entry.word);
            }
        }
        None => println!("This word is not imported."),
    }
    Ok(())
}

async fn practice(storage: &Storage) -> anyhow::Result<()> {
    let words = storage.sample_words(4).await?;
    if words.is_empty() {
        println!("No words imported yet.");
        return Ok(());
    }
    let mut asked = 0;
    let mut correct_count = 0;
    for (index, word) in words.iter().enumerate() {
        if index != 0 {
            println!("----------------------------------------");
        }
        let Some(mut question) = quiz::generate_definition_question(storage, word).await? else {
            continue;
        };
        match quiz::ask_question(&mut question)? {
            Some(correct) => {
                asked += 1;
                if correct {
                    correct_count += 1;
                    println!("The answer is correct. Well done!");
                } else {
                    println!("The answer is incorrect. The right answer is {}.", word.word);
                }
            }
            None => {}
        }
    }
    if asked > 0 {
        println!("You got {correct_count}/{asked} right.");
    }
    Ok(())
}

fn print_card(word: &WordEntry) {
    let marker = if word.is_favorite { "*" } else { " " };
    println!("[{marker}] {}", word.word);
    println!("    {}", word.phonetic);
    println!("    ({}) {}", word.word_type, word.definition);
    println!("    {}", word.example);
    if !word.audio.is_empty() {
        println!("    audio: {}", word.audio);
    }
}
