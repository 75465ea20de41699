//! Chat command parsing
//!
//! Lines look like slash commands: `/skillmod hero1:Chenko count1:2`.
//! Options are `name:value`; a token whose prefix is not an option of the
//! command fills the next unset option in declaration order, so
//! `/savepreset AttackA Chenko:2,Amane:2` works too. Double quotes group
//! values containing spaces: `team_a:"Chenko 2 Amane 2"`.
//!
//! `/skillmod` also takes a whole team string (`/skillmod Chenko:4,Amane:2`)
//! when no `heroN`/`countN` option is given and the arguments carry a `:` or `,`.

use std::collections::BTreeMap;

use crate::core::error::{Result, SkillModError};

/// Hero/count slots accepted by `/skillmod`
pub const SKILLMOD_SLOTS: usize = 4;

/// A parsed chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SkillMod { slots: Vec<(Option<String>, i64)> },
    /// `/skillmod` given a compact team string
    SkillModTeam { team: String },
    Heroes,
    Hero { name: String },
    Compare { team_a: String, team_b: String },
    SavePreset { name: String, heroes: String },
    LoadPreset { name: String },
    ListPresets,
    Recommend { heroes: Option<String> },
    Autocomplete { fragment: String },
    Help,
}

/// Option names per command, in positional order
fn options_for(command: &str) -> Option<&'static [&'static str]> {
    let options: &'static [&'static str] = match command {
        "skillmod" => &[
            "hero1", "count1", "hero2", "count2", "hero3", "count3", "hero4", "count4",
        ],
        "heroes" => &[],
        "hero" => &["name"],
        "compare" => &["team_a", "team_b"],
        "savepreset" => &["name", "heroes"],
        "loadpreset" => &["name"],
        "listpresets" => &[],
        "recommend" => &["heroes"],
        "autocomplete" => &["fragment"],
        "help_skillmod" | "help" => &[],
        _ => return None,
    };
    Some(options)
}

impl Command {
    /// Parse one chat line
    pub fn parse(line: &str) -> Result<Command> {
        let tokens = tokenize(line)?;
        let Some((head, rest)) = tokens.split_first() else {
            return Err(SkillModError::parse(line, "empty command"));
        };

        let name = head
            .trim_start_matches(|c: char| c == '/' || c == '!')
            .to_lowercase();
        let options =
            options_for(&name).ok_or_else(|| SkillModError::UnknownCommand(head.clone()))?;

        if name == "skillmod" && is_team_string(options, rest) {
            return Ok(Command::SkillModTeam {
                team: rest.join(" "),
            });
        }

        let mut args = bind_options(&name, options, rest)?;

        let command = match name.as_str() {
            "skillmod" => {
                let mut slots = Vec::with_capacity(SKILLMOD_SLOTS);
                for i in 1..=SKILLMOD_SLOTS {
                    let hero = args.remove(format!("hero{}", i).as_str());
                    let count = match args.remove(format!("count{}", i).as_str()) {
                        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                            SkillModError::parse(
                                format!("count{}:{}", i, raw),
                                "count must be a whole number",
                            )
                        })?,
                        None => 1,
                    };
                    slots.push((hero, count));
                }
                Command::SkillMod { slots }
            }
            "heroes" => Command::Heroes,
            "hero" => Command::Hero {
                name: required(&mut args, &name, "name")?,
            },
            "compare" => Command::Compare {
                team_a: required(&mut args, &name, "team_a")?,
                team_b: required(&mut args, &name, "team_b")?,
            },
            "savepreset" => Command::SavePreset {
                name: required(&mut args, &name, "name")?,
                heroes: required(&mut args, &name, "heroes")?,
            },
            "loadpreset" => Command::LoadPreset {
                name: required(&mut args, &name, "name")?,
            },
            "listpresets" => Command::ListPresets,
            "recommend" => Command::Recommend {
                heroes: args.remove("heroes").filter(|h| !h.trim().is_empty()),
            },
            "autocomplete" => Command::Autocomplete {
                fragment: args.remove("fragment").unwrap_or_default(),
            },
            _ => Command::Help,
        };
        Ok(command)
    }
}

/// `name:value` token whose name is one of `options`
fn keyed_option(options: &'static [&'static str], token: &str) -> Option<(&'static str, String)> {
    let (key, value) = token.split_once(':')?;
    let key = key.to_lowercase();
    options
        .iter()
        .find(|&&opt| opt == key)
        .map(|&opt| (opt, value.to_string()))
}

/// No token names an option, but some token looks like part of a team string
fn is_team_string(options: &'static [&'static str], tokens: &[String]) -> bool {
    tokens.iter().any(|t| t.contains(':') || t.contains(','))
        && tokens.iter().all(|t| keyed_option(options, t).is_none())
}

/// Match tokens to option names, either `name:value` or positionally
fn bind_options(
    command: &str,
    options: &'static [&'static str],
    tokens: &[String],
) -> Result<BTreeMap<&'static str, String>> {
    let mut args = BTreeMap::new();

    for token in tokens {
        let (option, value) = match keyed_option(options, token) {
            Some(pair) => pair,
            None => {
                let next = options
                    .iter()
                    .find(|opt| !args.contains_key(**opt))
                    .ok_or_else(|| {
                        SkillModError::parse(
                            token.as_str(),
                            format!("unexpected argument for /{}", command),
                        )
                    })?;
                (*next, token.clone())
            }
        };

        if args.insert(option, value).is_some() {
            return Err(SkillModError::parse(
                token.as_str(),
                format!("option {} given twice", option),
            ));
        }
    }

    Ok(args)
}

fn required(
    args: &mut BTreeMap<&'static str, String>,
    command: &str,
    option: &str,
) -> Result<String> {
    args.remove(option)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SkillModError::parse(format!("/{}", command), format!("missing {}", option)))
}

/// Split on whitespace, keeping double-quoted runs together (quotes dropped)
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(SkillModError::parse(line, "unterminated quote"));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}
