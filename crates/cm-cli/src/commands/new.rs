use std::path::Path;

use colored::Colorize;

use cm_campaign::{Catalog, Engine, EngineConfig, NewCharacter};
use cm_mechanics::{Alignment, ClassName, Race, Sex, StatGenMode};

use crate::store;

/// Creation flags as typed on the command line.
pub struct Options {
    pub name: String,
    pub sex: String,
    pub race: String,
    pub class: String,
    pub alignment: String,
    pub stats: String,
}

pub fn run(options: &Options, save: &Path, seed: Option<u64>) -> Result<(), String> {
    let request = parse_request(options)?;
    let mut engine = Engine::new(Catalog::builtin(), EngineConfig::default().with_seed(super::resolve_seed(seed)));
    let background = engine.create(&request).map_err(|e| e.to_string())?;
    store::save(save, &engine.snapshot())?;

    if let Some(c) = engine.character() {
        println!(
            "  {} {}, level {} {} {}",
            "Created".bold(),
            c.name(),
            c.level(),
            c.identity.race,
            c.class()
        );
    }
    println!("\n{background}\n");
    println!("  Saved to {}. Run 'cm play' to begin.", save.display());

    Ok(())
}

fn parse_request(options: &Options) -> Result<NewCharacter, String> {
    let sex = Sex::parse(&options.sex).map_err(|e| e.to_string())?;
    let race = Race::parse(&options.race).map_err(|e| e.to_string())?;
    let class = ClassName::parse(&options.class).map_err(|e| e.to_string())?;
    let alignment = Alignment::parse(&options.alignment).map_err(|e| e.to_string())?;
    let mode = StatGenMode::parse(&options.stats)
        .ok_or_else(|| format!("unknown stat mode '{}' (weighted, chaos)", options.stats))?;
    Ok(NewCharacter::new(sex, race, class, alignment)
        .named(options.name.clone())
        .with_stat_mode(mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Options {
        Options {
            name: "Tamsin Quill".into(),
            sex: "female".into(),
            race: "half-elf".into(),
            class: "Paladin".into(),
            alignment: "good".into(),
            stats: "chaos".into(),
        }
    }

    #[test]
    fn parses_labels_loosely() {
        let request = parse_request(&options()).unwrap();
        assert_eq!(request.race, Race::HalfElf);
        assert_eq!(request.class, ClassName::Paladin);
        assert_eq!(request.stat_mode, StatGenMode::Chaos);
        assert_eq!(request.name, "Tamsin Quill");
    }

    #[test]
    fn rejects_unknown_values() {
        let mut bad = options();
        bad.class = "accountant".into();
        assert!(parse_request(&bad).is_err());

        let mut bad = options();
        bad.stats = "vibes".into();
        assert!(parse_request(&bad).unwrap_err().contains("unknown stat mode"));
    }
}
