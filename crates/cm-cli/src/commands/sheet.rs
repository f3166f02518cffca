use std::path::Path;

use colored::Colorize;

use cm_mechanics::stats::format_modifier;
use cm_mechanics::{Character, StatKey};

pub fn run(save: &Path) -> Result<(), String> {
    let (_, character) = super::load_character(save)?;
    println!("{}", render_sheet(&character));
    Ok(())
}

/// The full character sheet.
pub fn render_sheet(c: &Character) -> String {
    let id = &c.identity;
    let mut out = format!(
        "{}\n{} {} {} ({}), level {}\n",
        c.name().bold(),
        id.sex,
        id.race,
        c.class(),
        id.alignment,
        c.level()
    );
    out.push_str(&format!(
        "XP {} | Day {} | Gold {}\n{} | {} ({}) | {}\n\n",
        c.xp(),
        c.day,
        c.gold,
        c.hp,
        c.hit_dice,
        c.hit_die,
        c.spell_slots
    ));

    let stats: Vec<String> = StatKey::ALL
        .iter()
        .map(|key| {
            format!(
                "{} {:>2} ({})",
                key,
                c.stats.get(*key),
                format_modifier(c.modifier(*key))
            )
        })
        .collect();
    out.push_str(&stats.join("  "));
    out.push('\n');

    let campaign = &c.campaign;
    out.push_str(&format!(
        "\nCampaign: {} | Act {} | Progress {}%\n",
        campaign.arc(),
        campaign.act(),
        campaign.progress()
    ));
    if !c.inventory.is_empty() {
        out.push_str(&format!("Inventory: {}\n", c.inventory.join(", ")));
    }
    for companion in &c.companions {
        out.push_str(&format!(
            "Companion: {} ({}/100)\n",
            companion.name,
            companion.relationship()
        ));
    }
    if c.is_dead() {
        out.push_str(&format!("{}\n", "DEAD".red().bold()));
    }
    out
}
