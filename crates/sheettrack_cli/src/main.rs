//! Command-line composition root.
//!
//! # Responsibility
//! - Own the store instance and wire it to the durable database.
//! - Expose the sheet operations for inspection and scripting.

use sheettrack_core::db::open_db;
use sheettrack_core::{
    bundled_topics, default_log_level, export_to_file, fetch_default_sheet, import_from_file,
    init_logging, Progress, SheetStore, SqliteRecordRepository, Theme, Topic, EXPORT_FILE_NAME,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const DB_FILE_NAME: &str = "sheettrack.sqlite3";
const LOG_DIR: &str = "logs";

fn main() -> ExitCode {
    if let Err(err) = init_logging(default_log_level(), LOG_DIR, false) {
        eprintln!("warning: logging disabled: {err}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let command = args.first().map(String::as_str).unwrap_or("summary");
    match command {
        "summary" => summary(),
        "export" => export(args.get(1).map(String::as_str)),
        "import" => import(required(args.get(1), "import <file>")?),
        "toggle" => toggle(
            required(args.get(1), "toggle <topic-id> <sub-id> <question-id>")?,
            required(args.get(2), "toggle <topic-id> <sub-id> <question-id>")?,
            required(args.get(3), "toggle <topic-id> <sub-id> <question-id>")?,
        ),
        "theme" => theme(args.get(1).map(String::as_str)),
        "reset" => reset(),
        "fetch" => fetch(),
        "help" | "--help" | "-h" => {
            print!("{}", usage());
            Ok(())
        }
        other => Err(format!("unknown command `{other}`\n{}", usage()).into()),
    }
}

fn required<'a>(value: Option<&'a String>, form: &str) -> Result<&'a str, Box<dyn Error>> {
    value
        .map(String::as_str)
        .ok_or_else(|| format!("usage: sheettrack {form}").into())
}

fn usage() -> String {
    [
        "usage: sheettrack <command>",
        "",
        "commands:",
        "  summary                               progress overview (default)",
        "  export [file]                         write progress JSON",
        "  import <file>                         replace the sheet from JSON",
        "  toggle <topic-id> <sub-id> <q-id>     flip one question's solved flag",
        "  theme [light|dark]                    show or set the theme",
        "  reset                                 restore the bundled sheet",
        "  fetch                                 preview the remote public sheet",
        "",
        "The database file defaults to ./sheettrack.sqlite3; override with",
        "the SHEETTRACK_DB environment variable.",
        "",
    ]
    .join("\n")
}

fn db_path() -> PathBuf {
    std::env::var_os("SHEETTRACK_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

fn summary() -> Result<(), Box<dyn Error>> {
    let conn = open_db(db_path())?;
    let repo = SqliteRecordRepository::try_new(&conn)?;
    let store = SheetStore::load(repo, bundled_topics())?;

    let progress = store.progress();
    println!(
        "{}/{} solved ({}%)",
        progress.solved,
        progress.total,
        progress.percent()
    );
    for topic in store.topics() {
        println!(
            "  {} [{}]: {}/{}",
            topic.title,
            topic.id,
            topic.solved_count(),
            topic.question_count()
        );
    }
    Ok(())
}

fn export(path: Option<&str>) -> Result<(), Box<dyn Error>> {
    let conn = open_db(db_path())?;
    let repo = SqliteRecordRepository::try_new(&conn)?;
    let store = SheetStore::load(repo, bundled_topics())?;

    let path = path.unwrap_or(EXPORT_FILE_NAME);
    export_to_file(store.topics(), path)?;
    println!("exported to {path}");
    Ok(())
}

fn import(path: &str) -> Result<(), Box<dyn Error>> {
    let topics = import_from_file(path)?;

    let conn = open_db(db_path())?;
    let repo = SqliteRecordRepository::try_new(&conn)?;
    let mut store = SheetStore::load(repo, bundled_topics())?;
    store.set_topics(topics)?;

    let progress = store.progress();
    println!(
        "imported {} topics, {}/{} solved",
        store.topics().len(),
        progress.solved,
        progress.total
    );
    Ok(())
}

fn toggle(topic_id: &str, sub_id: &str, question_id: &str) -> Result<(), Box<dyn Error>> {
    let conn = open_db(db_path())?;
    let repo = SqliteRecordRepository::try_new(&conn)?;
    let mut store = SheetStore::load(repo, bundled_topics())?;

    store.toggle_question(topic_id, sub_id, question_id)?;
    match find_question(store.topics(), topic_id, sub_id, question_id) {
        Some(question) => println!(
            "{}: {}",
            question.title,
            if question.solved { "solved" } else { "unsolved" }
        ),
        None => println!("no question at {topic_id}/{sub_id}/{question_id}; nothing changed"),
    }
    Ok(())
}

fn find_question<'a>(
    topics: &'a [Topic],
    topic_id: &str,
    sub_id: &str,
    question_id: &str,
) -> Option<&'a sheettrack_core::Question> {
    topics
        .iter()
        .find(|topic| topic.id == topic_id)?
        .sub_topics
        .iter()
        .find(|sub| sub.id == sub_id)?
        .questions
        .iter()
        .find(|question| question.id == question_id)
}

fn theme(value: Option<&str>) -> Result<(), Box<dyn Error>> {
    let conn = open_db(db_path())?;
    let repo = SqliteRecordRepository::try_new(&conn)?;
    let mut store = SheetStore::load(repo, bundled_topics())?;

    match value {
        None => println!("{}", store.theme()?.as_str()),
        Some(raw) => {
            let theme =
                Theme::parse(raw).ok_or_else(|| format!("unknown theme `{raw}`; use light|dark"))?;
            store.set_theme(theme)?;
            println!("theme set to {}", theme.as_str());
        }
    }
    Ok(())
}

fn reset() -> Result<(), Box<dyn Error>> {
    let conn = open_db(db_path())?;
    let repo = SqliteRecordRepository::try_new(&conn)?;
    let mut store = SheetStore::load(repo, bundled_topics())?;

    store.reset_to_bundled(bundled_topics())?;
    println!("restored bundled sheet ({} topics)", store.topics().len());
    Ok(())
}

fn fetch() -> Result<(), Box<dyn Error>> {
    let topics = fetch_default_sheet()?;
    let progress = Progress::of(&topics);
    println!("fetched {} topics, {} questions", topics.len(), progress.total);
    for topic in &topics {
        println!("  {} ({} questions)", topic.title, topic.question_count());
    }
    Ok(())
}
