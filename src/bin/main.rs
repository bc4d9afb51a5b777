use autocorrect_core::{AutocorrectEngine, EngineConfig, WordSource};
use crossterm::style::Stylize;
use std::env;
use std::io::{stdin, stdout, BufRead, Write};
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let Some(word_list) = args.next() else {
        eprintln!("usage: autocorrect_repl <word-list> [config.json]");
        process::exit(2);
    };
    let config = match args.next() {
        Some(path) => match EngineConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[ERROR] Could not read config '{}': {}", path, e);
                process::exit(2);
            }
        },
        None => EngineConfig::default(),
    };

    let engine = AutocorrectEngine::open(config);
    if let Err(e) = engine.start_loading(WordSource::Path(PathBuf::from(word_list))) {
        eprintln!("[ERROR] {}", e);
    }

    println!("Autocorrect REPL. Type a word to correct it, '?prefix' for completions,");
    println!("'!undo <word>' to restore what a correction replaced, 'exit' to quit.");
    println!("---------------------------------------------------------------");

    let mut position: i64 = 0;
    prompt();
    for line in stdin().lock().lines() {
        let Ok(line) = line else { break };
        let cmd = line.trim();

        if !engine.is_ready() {
            match engine.load_failure() {
                Some(reason) => println!("{}", format!("Lexicon failed to load: {}", reason).red()),
                None => println!(
                    "{}",
                    format!("Lexicon still loading ({} words so far)...", engine.loaded_words_count()).yellow()
                ),
            }
        }

        match cmd {
            "exit" => break,
            "" => {}
            s if s.starts_with('?') => {
                let suggestions = engine.suggest_prefix(&s[1..]);
                if suggestions.is_empty() {
                    println!("No suggestions found.");
                }
                for (i, word) in suggestions.iter().enumerate() {
                    println!("  {}: {}", i + 1, word.as_str().cyan());
                }
            }
            s if s.starts_with("!undo") => {
                let target = s["!undo".len()..].trim();
                let key = if target.is_empty() { None } else { Some(target) };
                match engine.last_correction(key) {
                    Some(record) => {
                        println!(
                            "{} -> {} (at {})",
                            record.corrected_word.as_str().green(),
                            record.original_word.as_str().yellow(),
                            record.text_position
                        );
                        engine.clear_correction(&record.corrected_word);
                    }
                    None => println!("Nothing to undo."),
                }
            }
            word => {
                position += word.chars().count() as i64;
                match engine.correct(word, position) {
                    Some(corrected) => println!("{} -> {}", word.red(), corrected.as_str().green()),
                    None if engine.is_known(word) => println!("{}", word.green()),
                    None => println!("{} (no correction)", word.yellow()),
                }
                position += 1;
            }
        }
        prompt();
    }

    if let Err(e) = engine.close() {
        eprintln!("[ERROR] Could not save lexicon: {}", e);
    }
}

fn prompt() {
    print!("> ");
    let _ = stdout().flush();
}
