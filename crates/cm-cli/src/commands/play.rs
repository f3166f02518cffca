use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use crate::session::Session;
use crate::store;

pub fn run(save: &Path, seed: Option<u64>) -> Result<(), String> {
    let engine = super::open_engine(save, seed)?;
    let name = engine
        .character()
        .map(|c| c.name().to_string())
        .ok_or_else(|| format!("{} has no character; run 'cm new' first", save.display()))?;
    let mut session = Session::new(engine);

    println!("  {} {name}'s adventure", "Resuming".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    println!("{}\n", session.status());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Err(e) => {
                println!("{}\n", e.yellow());
            }
        }
        store::save(save, &session.engine().snapshot())?;

        if matches!(input.to_lowercase().as_str(), "quit" | "q" | "exit") {
            break;
        }
    }

    store::save(save, &session.engine().snapshot())
}
