use std::path::Path;

pub fn run(save: &Path, markdown: bool) -> Result<(), String> {
    let (snapshot, character) = super::load_character(save)?;
    let title = format!("The Adventures of {}", character.name());
    let out = if markdown {
        snapshot.log.export_markdown(&title)
    } else {
        snapshot.log.export_text(&title)
    };
    print!("{out}");
    Ok(())
}
