//! Reply builders
//!
//! Precision: percentages one decimal, SkillMod and multipliers four,
//! category factors three, formation SkillMod three.

use crate::bot::reply::{Reply, Tone};
use crate::calc::{Comparison, SkillModResult, Winner};
use crate::catalog::{Hero, HeroCatalog};
use crate::core::types::EffectCategory;
use crate::formation::{FormationCandidate, Recommendation};
use crate::team::TeamComposition;

/// Changes smaller than this read as "same as neutral"
const NEUTRAL_EPSILON: f64 = 0.01;

pub const HELP_TEXT: &str = "\
**SkillMod Bot Help**

Use `/skillmod` to calculate how your joiner lineup affects battle performance.

**Core Commands**
- `/skillmod` - SkillMod for up to 4 heroes.
   Example: `/skillmod hero1:Chenko count1:2 hero2:Amane count2:2`
- `/skillmod Chenko:2,Amane:2` - the same, as one team string.
- `/heroes` - every hero with its effects.
- `/hero <name>` - buff type, effect_op and contribution of a hero.
   Example: `/hero Hilde`
- `/compare team_a:<team> team_b:<team>` - compare two teams.
   Example: `/compare team_a:Chenko:4 team_b:Amane:2,Chenko:2`
- `/autocomplete <fragment>` - hero names containing the fragment.

**Preset Commands**
- `/savepreset name:<name> heroes:<team>` - save a team for later.
   Example: `/savepreset name:AttackA heroes:Chenko:2,Amane:2`
- `/loadpreset name:<name>` - load and calculate a saved team.
- `/listpresets` - your saved presets.

**Recommendation Command**
- `/recommend` - top 2 formations for Attack and Garrison from all heroes.
- `/recommend heroes:Chenko:3,Amane:2,Hilde:1` - only heroes you own.

**Tips**
- Heroes with the same effect but a different effect_op (Chenko and Amane) stack multiplicatively.
- Heroes sharing an effect_op add up before stacking.
- Presets are saved per user.";

/// Pick the accent for an analysis reply
pub fn analysis_tone(result: &SkillModResult) -> Tone {
    let offense = result.skill_mod > 1.0;
    let defense = result.final_damage_taken_multiplier < 1.0;
    match (offense, defense) {
        (true, true) => Tone::Gold,
        (true, false) => Tone::Red,
        (false, true) => Tone::Blue,
        (false, false) => Tone::Neutral,
    }
}

/// Full SkillMod analysis of one team
pub fn analysis_reply(title: &str, team: &TeamComposition, result: &SkillModResult) -> Reply {
    let damage_line = if result.damage_percent_increase.abs() < NEUTRAL_EPSILON {
        "You deal the same damage as a neutral (no-joiner) setup.".to_string()
    } else {
        format!(
            "You deal {:+.1}% damage compared to a neutral setup.",
            result.damage_percent_increase
        )
    };
    let taken_line = if result.damage_taken_percent_change.abs() < NEUTRAL_EPSILON {
        "You take the same damage as a neutral (no-joiner) setup.".to_string()
    } else {
        format!(
            "You take {:+.1}% damage compared to a neutral setup.",
            result.damage_taken_percent_change
        )
    };

    let mut body = format!("**Quick Summary**\n{}\n{}\n\n", damage_line, taken_line);

    body.push_str(&format!(
        "**SkillMod (combined multiplier)**\n\
         Damage dealt: **{:.4}x**\n\
         Damage taken: **{:.4}x**\n\n",
        result.skill_mod, result.final_damage_taken_multiplier
    ));

    body.push_str("**Breakdown (for advanced users)**\n");
    for category in EffectCategory::ALL {
        body.push_str(&format!(
            "{} factor: {:.3}\n",
            category,
            result.factors.get(category)
        ));
    }
    body.push('\n');

    body.push_str("**Per-effect_op totals**\n");
    if result.totals.is_empty() {
        body.push_str("none\n");
    }
    for (category, variant, sum) in result.totals.iter() {
        body.push_str(&format!("{} op{}: {:.1}%\n", category, variant, sum * 100.0));
    }

    if result.division_guarded {
        body.push_str("\n_A zero factor was replaced by 1.0 to avoid dividing by zero._\n");
    }

    body.push_str(
        "\n_'Neutral' means a base setup with no joiner heroes on either side._\n\
         _Positive % = you deal or take more damage than neutral; \
         negative % = you deal or take less damage than neutral._",
    );

    let team_list = if team.is_empty() {
        "None".to_string()
    } else {
        team.iter()
            .map(|(name, count)| format!("{}: {}", name, count))
            .collect::<Vec<_>>()
            .join("\n")
    };

    Reply::embed(title, body, analysis_tone(result)).with_field(
        "Team Composition",
        team_list,
        false,
    )
}

/// Effects of a single hero
pub fn hero_reply(hero: &Hero) -> Reply {
    let lines: Vec<String> = hero
        .effects
        .iter()
        .map(|e| format!("- **{}** (op{}): {:.0}%", e.category, e.variant, e.magnitude * 100.0))
        .collect();
    Reply::text(format!("**{}**\n{}", hero.name, lines.join("\n")))
}

/// Every hero as `Category:op(pct%)`, plus the stacking rule
pub fn heroes_reply(catalog: &HeroCatalog) -> Reply {
    let rows: Vec<String> = catalog
        .iter()
        .map(|hero| {
            let effects: Vec<String> = hero
                .effects
                .iter()
                .map(|e| format!("{}:{}({:.0}%)", e.category, e.variant, e.magnitude * 100.0))
                .collect();
            format!("**{}** - {}", hero.name, effects.join(", "))
        })
        .collect();

    Reply::text(format!(
        "Available heroes (format = Category:effect_op(percent)):\n\n{}\n\n\
         Note: joiners with the same effect but a different effect_op multiply, \
         so they give a stronger SkillMod than joiners sharing one effect_op, which only add up.",
        rows.join("\n")
    ))
}

/// Side-by-side comparison of two teams
pub fn compare_reply(team_a: &str, team_b: &str, cmp: &Comparison) -> Reply {
    let side = |raw: &str, result: &SkillModResult| {
        format!(
            "`{}`\nSkillMod: `{:.4}`\nDamage: `{:+.1}%`",
            raw, result.skill_mod, result.damage_percent_increase
        )
    };

    let verdict = match cmp.winner {
        Winner::Tie => "Tie (both teams have the same SkillMod)".to_string(),
        winner => format!(
            "{} wins (Team B is {:.1}% {} than Team A)",
            winner,
            cmp.delta_pct.abs(),
            if cmp.delta_pct > 0.0 { "higher" } else { "lower" }
        ),
    };

    Reply::embed("Team Comparison", "", Tone::Teal)
        .with_field("Team A", side(team_a, &cmp.team_a), true)
        .with_field("Team B", side(team_b, &cmp.team_b), true)
        .with_field("Result", verdict, false)
}

/// Numbered formation list
pub fn format_formations(formations: &[FormationCandidate]) -> String {
    if formations.is_empty() {
        return "No valid formations found.".to_string();
    }
    formations
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let heroes = f
                .heroes
                .iter()
                .map(|(name, count)| format!("{}x{}", name, count))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "**{}.** {} | SkillMod `{:.3}x`\nDamage: `{:+.1}%`, Damage Taken: `{:+.1}%`",
                i + 1,
                heroes,
                f.skill_mod,
                f.damage_pct,
                f.taken_pct
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn recommend_reply(recommendation: &Recommendation, note: &str) -> Reply {
    Reply::embed("Recommended Formations", note, Tone::Gold)
        .with_field(
            "Attack Focus (Damage Output)",
            format_formations(&recommendation.best_attack),
            false,
        )
        .with_field(
            "Garrison Focus (Damage Reduction)",
            format_formations(&recommendation.best_garrison),
            false,
        )
}

pub fn preset_list_reply(names: &[String]) -> Reply {
    if names.is_empty() {
        return Reply::text("You have no saved presets yet. Use /savepreset.");
    }
    let lines: Vec<String> = names.iter().map(|n| format!("- {}", n)).collect();
    Reply::text(format!("Your presets:\n{}", lines.join("\n")))
}
