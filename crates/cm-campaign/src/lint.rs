//! Authoring lint for hp loss that should probably be a fight.
//!
//! Outcomes hand off to combat only through an explicit trigger. This lint
//! flags outcomes that cost hp, carry no trigger, and either read like an
//! attack or sit in a scene where someone is usually doing the hitting.

use crate::catalog::{Catalog, ValidationIssue};
use crate::effect::Outcome;
use crate::scene::{Scene, SceneChoice};

const ATTACK_WORDS: &[&str] = &[
    "hit", "hits", "hitting", "stab", "stabs", "stabbed", "bite", "bites", "bit", "bitten",
    "biting", "ambush", "ambushed", "ambushes", "punch", "punches", "punched", "slash", "slashes",
    "slashed", "jab", "jabs", "jabbed", "swing", "swings", "swung", "strike", "strikes", "struck",
    "claw", "claws", "clawed", "kick", "kicks", "kicked",
];

const ENVIRONMENTAL: &[&str] = &[
    "falling masonry",
    "freezing water",
    "smoke",
    "fire",
    "paperwork",
    "bureaucracy",
    "emotional",
];

/// Whether the text describes someone attacking.
pub fn reads_like_attack(text: &str) -> bool {
    let lower = text.to_lowercase();
    if ENVIRONMENTAL.iter().any(|e| lower.contains(e)) {
        return false;
    }
    lower
        .split(|c: char| !c.is_alphabetic())
        .any(|word| ATTACK_WORDS.contains(&word))
}

/// Report untriggered hp loss across the catalog. Every finding is a
/// warning.
pub fn lint_catalog(catalog: &Catalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for scene in catalog.scenes() {
        for choice in &scene.choices {
            lint_outcome(scene, choice, "success", &choice.on_success, &mut issues);
            lint_outcome(scene, choice, "failure", &choice.on_failure, &mut issues);
        }
    }
    issues
}

fn lint_outcome(
    scene: &Scene,
    choice: &SceneChoice,
    branch: &str,
    outcome: &Outcome,
    issues: &mut Vec<ValidationIssue>,
) {
    let loss = -outcome.hp_delta();
    if loss <= 0 || outcome.combat.is_some() {
        return;
    }
    let reason = if reads_like_attack(&outcome.text) {
        "reads like an attack".to_string()
    } else if scene.category.is_adversarial() {
        format!("happens in a {} scene", scene.category)
    } else {
        return;
    };
    issues.push(ValidationIssue::warning(
        scene.id.as_str(),
        format!(
            "choice '{}' {branch} loses {loss} HP and {reason}; consider a combat trigger",
            choice.id
        ),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::CombatTrigger;
    use crate::scene::SceneCategory;
    use cm_mechanics::{CombatEnding, EnemyKind, StatKey};

    fn single(category: SceneCategory, failure: Outcome) -> Catalog {
        let mut catalog = Catalog::new("test.scene");
        catalog.insert_scene(
            Scene::new("test.scene", category, "Test", "Body").choice(SceneChoice::new(
                "go",
                "Go",
                StatKey::Str,
                12,
                Outcome::new("Fine."),
                failure,
            )),
        );
        catalog
    }

    #[test]
    fn attack_words_match_whole_words() {
        assert!(reads_like_attack("Something sharp stabbed you."));
        assert!(reads_like_attack("He jabs you in the ribs."));
        assert!(!reads_like_attack("You find a habit of whittling."));
        assert!(!reads_like_attack("You get hit by falling masonry."));
        assert!(!reads_like_attack("Smoke fills your lungs and something bites."));
    }

    #[test]
    fn flags_attack_text_in_quiet_scenes() {
        let catalog = single(
            SceneCategory::Vault,
            Outcome::new("A guardian punches you. -2 HP.").hp(-2),
        );
        let issues = lint_catalog(&catalog);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error);
        assert!(issues[0].message.contains("loses 2 HP and reads like an attack"));
    }

    #[test]
    fn flags_any_loss_in_adversarial_scenes() {
        let catalog = single(
            SceneCategory::Road,
            Outcome::new("You slip into freezing water. -2 HP.").hp(-2),
        );
        let issues = lint_catalog(&catalog);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("happens in a Road scene"));
    }

    #[test]
    fn triggered_and_harmless_outcomes_pass() {
        let trigger = CombatTrigger::new(
            EnemyKind::Thug,
            CombatEnding::new("won"),
            CombatEnding::new("lost"),
            CombatEnding::new("fled"),
        );
        let fight = single(
            SceneCategory::Tavern,
            Outcome::new("A thug swings at you.").hp(-1).fight(trigger),
        );
        assert!(lint_catalog(&fight).is_empty());
        let quiet = single(SceneCategory::Tavern, Outcome::new("You lose a coin.").gold(-1));
        assert!(lint_catalog(&quiet).is_empty());
        let scraped = single(
            SceneCategory::Magic,
            Outcome::new("The spellbook whacks you. -2 HP.").hp(-2),
        );
        assert!(lint_catalog(&scraped).is_empty());
    }

    /// Untriggered hp loss in the built-in catalog that was reviewed and kept:
    /// the harm comes from terrain, traps, the player, or a mimic that is
    /// about to become a companion.
    const ALLOWED: &[(&str, &str, &str)] = &[
        ("street.map_drop", "return", "failure"),
        ("street.paperwork", "read", "failure"),
        ("street.paperwork", "eat", "failure"),
        ("road.bridge_toll", "ford", "failure"),
        ("vault.lantern_room", "take", "failure"),
        ("vault.final_lock", "pick", "failure"),
        ("manor.closed_doors", "climb", "failure"),
        ("manor.confrontation", "burn", "failure"),
        ("dungeon.mimic_intro", "hit", "failure"),
        ("camp.mimic_followup", "boundaries", "failure"),
        ("camp.mimic_finale", "party", "failure"),
        ("lab.safety", "feed", "failure"),
    ];

    fn allows(issue: &ValidationIssue, (scene, choice, branch): (&str, &str, &str)) -> bool {
        issue.entity == scene
            && issue
                .message
                .starts_with(&format!("choice '{choice}' {branch} loses"))
    }

    #[test]
    fn builtin_catalog_warns_only_on_reviewed_outcomes() {
        let issues = lint_catalog(&Catalog::builtin());
        assert!(issues.iter().all(|i| !i.is_error));
        for issue in &issues {
            assert!(
                ALLOWED.iter().any(|&entry| allows(issue, entry)),
                "unreviewed hp loss: {}: {}",
                issue.entity,
                issue.message
            );
        }
        for &entry in ALLOWED {
            assert!(
                issues.iter().any(|i| allows(i, entry)),
                "allowed entry no longer warns: {entry:?}"
            );
        }
        assert_eq!(issues.len(), ALLOWED.len());
    }

    #[test]
    fn builtin_fights_start_where_someone_attacks() {
        let catalog = Catalog::builtin();
        for (scene, choice) in [
            ("tavern.rumor_black_road", "mock"),
            ("street.map_drop", "take"),
            ("road.first_blood", "press"),
            ("road.bridge_toll", "talk"),
            ("road.witness", "threaten"),
            ("road.hired_blade", "talk"),
            ("road.hired_blade", "sneak"),
            ("manor.confrontation", "kill"),
        ] {
            let failure = &catalog
                .scene(scene)
                .and_then(|s| s.find_choice(choice))
                .unwrap_or_else(|| panic!("missing {scene}/{choice}"))
                .on_failure;
            assert!(failure.combat.is_some(), "{scene}/{choice} should start a fight");
            assert_eq!(failure.hp_delta(), 0, "{scene}/{choice}");
        }
    }
}
