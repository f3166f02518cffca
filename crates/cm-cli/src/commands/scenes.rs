use colored::Colorize;

use cm_campaign::Catalog;
use cm_campaign::lint::lint_catalog;

pub fn run(lint: bool) -> Result<(), String> {
    let catalog = Catalog::builtin();

    for (arc, content) in catalog.arcs() {
        println!(
            "  {} ({arc}, weight {}): {}",
            content.title.bold(),
            content.weight,
            content.blurb
        );
    }
    println!();

    for scene in catalog.scenes() {
        println!(
            "  {:<28} {:<10} {} ({} choices)",
            scene.id,
            scene.category.to_string(),
            scene.title,
            scene.choices.len()
        );
    }
    println!("\n  {} scenes, {} arcs", catalog.len(), catalog.arcs().count());

    if !lint {
        return Ok(());
    }

    let mut issues = catalog.validate();
    issues.extend(lint_catalog(&catalog));
    if issues.is_empty() {
        println!("  {}", "No issues found.".green());
        return Ok(());
    }
    for issue in &issues {
        if issue.is_error {
            eprintln!("  {}", issue.to_string().red());
        } else {
            eprintln!("  {}", issue.to_string().yellow());
        }
    }
    let errors = issues.iter().filter(|i| i.is_error).count();
    if errors > 0 {
        Err(format!("catalog has {errors} error(s)"))
    } else {
        Ok(())
    }
}
