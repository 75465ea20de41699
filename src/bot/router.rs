//! Command router - executes parsed commands for a user
//!
//! Every domain error is turned into a user-facing reply here; nothing a
//! user types can take the session down.

use chrono::{DateTime, Duration, Utc};

use crate::bot::command::Command;
use crate::bot::format::{
    analysis_reply, compare_reply, hero_reply, heroes_reply, preset_list_reply, recommend_reply,
    HELP_TEXT,
};
use crate::bot::reply::Reply;
use crate::calc::{compare, evaluate};
use crate::catalog::{load_catalog, HeroCatalog};
use crate::core::config::BotConfig;
use crate::core::error::{Result, SkillModError};
use crate::formation::{fingerprint, recommend, RecommendationCache, Roster};
use crate::presets::PresetStore;
use crate::team::{parse_slots, parse_team, TeamComposition};

/// Who sent a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identity presets are keyed by
    pub id: String,
    pub display_name: String,
}

impl User {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

pub struct CommandRouter {
    catalog: HeroCatalog,
    config: BotConfig,
    presets: PresetStore,
    cache: RecommendationCache,
}

impl CommandRouter {
    pub fn new(catalog: HeroCatalog, config: BotConfig) -> Self {
        let presets = PresetStore::new(config.presets_path());
        let cache = RecommendationCache::new(
            config.recommend_cache_path(),
            Duration::hours(config.recommend_cache_ttl_hours),
            fingerprint(&catalog, config.max_team_size, config.top_n),
        );
        Self {
            catalog,
            config,
            presets,
            cache,
        }
    }

    /// Build from config, loading the catalog file if one is configured
    pub fn from_config(config: BotConfig) -> Result<Self> {
        config.validate()?;
        let catalog = match config.catalog_path() {
            Some(path) => load_catalog(&path)?,
            None => HeroCatalog::builtin(),
        };
        Ok(Self::new(catalog, config))
    }

    pub fn catalog(&self) -> &HeroCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Parse and run one chat line
    pub fn handle_line(&self, user: &User, line: &str) -> Reply {
        match Command::parse(line) {
            Ok(command) => self.handle(user, command),
            Err(e) => error_reply(&e),
        }
    }

    /// Run a command, converting failures into error replies
    pub fn handle(&self, user: &User, command: Command) -> Reply {
        self.handle_at(user, command, Utc::now())
    }

    /// `handle` with an explicit clock for the recommendation cache
    pub fn handle_at(&self, user: &User, command: Command, now: DateTime<Utc>) -> Reply {
        tracing::debug!("{} -> {:?}", user.id, command);
        match self.execute(user, command, now) {
            Ok(reply) => reply,
            Err(e) => error_reply(&e),
        }
    }

    fn execute(&self, user: &User, command: Command, now: DateTime<Utc>) -> Result<Reply> {
        match command {
            Command::SkillMod { slots } => {
                let team = parse_slots(&self.catalog, slots)?;
                self.analyse(user, &team)
            }

            Command::SkillModTeam { team } => {
                let team = parse_team(&self.catalog, &team)?;
                self.analyse(user, &team)
            }

            Command::Heroes => Ok(heroes_reply(&self.catalog)),

            Command::Hero { name } => {
                let hero = self.catalog.resolve(&name)?;
                Ok(hero_reply(hero))
            }

            Command::Compare { team_a, team_b } => {
                let a = parse_team(&self.catalog, &team_a)?;
                let b = parse_team(&self.catalog, &team_b)?;
                let cmp = compare(&self.catalog, &a, &b)?;
                Ok(compare_reply(&team_a, &team_b, &cmp))
            }

            Command::SavePreset { name, heroes } => {
                let team = parse_team(&self.catalog, &heroes)?;
                if team.is_empty() {
                    return Err(SkillModError::EmptyComposition);
                }
                self.presets.save(&user.id, &name, &heroes)?;
                Ok(Reply::text(format!("Preset `{}` saved!", name.trim())))
            }

            Command::LoadPreset { name } => {
                let saved = match self.presets.load(&user.id, &name) {
                    Ok(saved) => saved,
                    Err(SkillModError::PresetNotFound(_)) => {
                        let available = self.presets.list(&user.id)?;
                        let mut msg = "You have no preset by that name.".to_string();
                        if !available.is_empty() {
                            msg.push_str(&format!(" Your presets: {}", available.join(", ")));
                        }
                        return Ok(Reply::error(msg));
                    }
                    Err(e) => return Err(e),
                };
                let team = parse_team(&self.catalog, &saved)?;
                let result = evaluate(&self.catalog, &team)?;
                Ok(analysis_reply(&format!("Preset: {}", name.trim()), &team, &result))
            }

            Command::ListPresets => Ok(preset_list_reply(&self.presets.list(&user.id)?)),

            Command::Recommend { heroes: Some(raw) } => {
                let roster = Roster::parse(&self.catalog, &raw)?;
                if roster.is_empty() {
                    return Err(SkillModError::EmptyComposition);
                }
                let rec = recommend(
                    &self.catalog,
                    &roster,
                    self.config.max_team_size,
                    self.config.top_n,
                )?;
                Ok(recommend_reply(&rec, &format!("*(Based on your roster: {})*", raw)))
            }

            Command::Recommend { heroes: None } => {
                let (rec, _status) = self.cache.get_or_refresh(now, || {
                    let roster = Roster::full(&self.catalog, self.config.max_team_size);
                    recommend(&self.catalog, &roster, self.config.max_team_size, self.config.top_n)
                })?;
                Ok(recommend_reply(&rec, "*(Based on all heroes, cached global best)*"))
            }

            Command::Autocomplete { fragment } => {
                let names = self.catalog.autocomplete(&fragment, self.config.autocomplete_limit);
                if names.is_empty() {
                    Ok(Reply::text(format!("No heroes match `{}`.", fragment)))
                } else {
                    Ok(Reply::text(names.join("\n")))
                }
            }

            Command::Help => Ok(Reply::text(HELP_TEXT)),
        }
    }

    fn analyse(&self, user: &User, team: &TeamComposition) -> Result<Reply> {
        if team.is_empty() {
            return Err(SkillModError::EmptyComposition);
        }
        let result = evaluate(&self.catalog, team)?;
        let title = format!("SkillMod Analysis for {}", user.display_name);
        Ok(analysis_reply(&title, team, &result))
    }
}

/// User-facing message for an error
pub fn error_reply(err: &SkillModError) -> Reply {
    match err {
        SkillModError::UnknownHero(name) => Reply::error(format!(
            "Unknown hero `{}`. Use /autocomplete or /help_skillmod.",
            name
        )),
        SkillModError::ParseError { fragment, reason } => Reply::error(format!(
            "Parse error near `{}`: {}. Use format: Chenko:4,Amane:2",
            fragment, reason
        )),
        SkillModError::UnknownCommand(_) => {
            Reply::error("Unknown command. Type /help_skillmod for the list of commands.")
        }
        SkillModError::EmptyComposition => {
            Reply::error("No heroes provided. Pick at least one hero with a positive count.")
        }
        SkillModError::PresetNotFound(name) => {
            Reply::error(format!("You have no preset named `{}`.", name))
        }
        SkillModError::IoError(_) | SkillModError::SerdeError(_) => {
            tracing::error!("Storage failure: {}", err);
            Reply::error(format!("Could not access saved data: {}", err))
        }
        other => {
            tracing::error!("Command failed: {}", other);
            Reply::error(format!("Something went wrong: {}", other))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::reply::Tone;

    fn router() -> (tempfile::TempDir, CommandRouter) {
        let dir = tempfile::tempdir().unwrap();
        let config = BotConfig {
            data_dir: dir.path().to_path_buf(),
            ..BotConfig::default()
        };
        (dir, CommandRouter::new(HeroCatalog::builtin(), config))
    }

    fn tester() -> User {
        User::new("42", "tester")
    }

    #[test]
    fn test_skillmod_command() {
        let (_dir, router) = router();
        let line = "/skillmod hero1:chenko count1:2 hero2:Amane count2:2";
        let reply = router.handle_line(&tester(), line);
        assert_eq!(reply.title.as_deref(), Some("SkillMod Analysis for tester"));
        assert!(reply.body.contains("Damage dealt: **2.2500x**"));
    }

    #[test]
    fn test_skillmod_team_string() {
        let (_dir, router) = router();
        let reply = router.handle_line(&tester(), "/skillmod Chenko:2,Amane:2");
        assert!(!reply.is_error());
        assert!(reply.body.contains("Damage dealt: **2.2500x**"));

        let reply = router.handle_line(&tester(), "/skillmod Chenko:1,Zed:1");
        assert!(reply.body.contains("Unknown hero `Zed`"));
    }

    #[test]
    fn test_heroes_lists_catalog() {
        let (_dir, router) = router();
        let reply = router.handle_line(&tester(), "/heroes");
        assert!(reply.body.contains("**Gordon** - DefenseUp:113(25%)"));
    }

    #[test]
    fn test_skillmod_without_heroes_is_empty_composition() {
        let (_dir, router) = router();
        let reply = router.handle_line(&tester(), "/skillmod hero1:Chenko count1:0");
        assert!(reply.is_error());
        assert!(reply.body.contains("No heroes provided"));
    }

    #[test]
    fn test_unknown_hero_reply() {
        let (_dir, router) = router();
        let reply = router.handle_line(&tester(), "/hero Zed");
        assert!(reply.is_error());
        assert!(reply.body.contains("Unknown hero `Zed`"));
    }

    #[test]
    fn test_unknown_command_reply() {
        let (_dir, router) = router();
        let reply = router.handle_line(&tester(), "/dance");
        assert!(reply.is_error());
        assert!(reply.body.contains("/help_skillmod"));
    }

    #[test]
    fn test_preset_lifecycle() {
        let (_dir, router) = router();
        let user = tester();

        let reply = router.handle_line(&user, "/savepreset name:AttackA heroes:Chenko:2,Amane:2");
        assert_eq!(reply.body, "Preset `AttackA` saved!");

        let reply = router.handle_line(&user, "/listpresets");
        assert_eq!(reply.body, "Your presets:\n- AttackA");

        let reply = router.handle_line(&user, "/loadpreset AttackA");
        assert_eq!(reply.title.as_deref(), Some("Preset: AttackA"));
        assert_eq!(reply.tone, Tone::Red);

        let reply = router.handle_line(&user, "/loadpreset Missing");
        assert!(reply.is_error());
        assert_eq!(reply.body, "You have no preset by that name. Your presets: AttackA");
    }

    #[test]
    fn test_invalid_preset_not_saved() {
        let (_dir, router) = router();
        let user = tester();
        let reply = router.handle_line(&user, "/savepreset name:Bad heroes:Chenko4");
        assert!(reply.is_error());
        assert!(router.handle_line(&user, "/listpresets").body.contains("no saved presets"));
    }

    #[test]
    fn test_recommend_global_is_cached() {
        let (dir, router) = router();
        let now = Utc::now();
        let first = router.handle_at(&tester(), Command::Recommend { heroes: None }, now);
        assert!(!first.is_error());
        assert!(dir.path().join("recommend_cache.json").exists());

        let second = router.handle_at(&tester(), Command::Recommend { heroes: None }, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_recommend_cache_follows_catalog_and_limits() {
        let (dir, router) = router();
        let now = Utc::now();
        let first = router.handle_at(&tester(), Command::Recommend { heroes: None }, now);
        assert!(first.field("Attack Focus (Damage Output)").unwrap().value.contains("Chenko"));

        let breaker = crate::catalog::parse_catalog_toml(
            r#"
            [[hero]]
            name = "Breaker"
            effects = [{ category = "OppDefenseDown", variant = 301, magnitude = 0.5 }]
            "#,
        )
        .unwrap();
        let config = BotConfig {
            data_dir: dir.path().to_path_buf(),
            top_n: 1,
            ..BotConfig::default()
        };
        let changed = CommandRouter::new(breaker, config);

        let reply = changed.handle_at(&tester(), Command::Recommend { heroes: None }, now);
        let attack = &reply.field("Attack Focus (Damage Output)").unwrap().value;
        assert!(!attack.contains("Chenko"));
        assert!(attack.starts_with("**1.** Breakerx4"));
        assert!(!attack.contains("**2.**"));
    }

    #[test]
    fn test_recommend_for_roster() {
        let (_dir, router) = router();
        let reply = router.handle_line(&tester(), "/recommend heroes:Chenko:3,Amane:1");
        let attack = &reply.field("Attack Focus (Damage Output)").unwrap().value;
        assert!(attack.starts_with("**1.** Amanex1, Chenkox3 | SkillMod `2.188x`"));
    }

    #[test]
    fn test_autocomplete() {
        let (_dir, router) = router();
        assert_eq!(router.handle_line(&tester(), "/autocomplete am").body, "Amadeus\nAmane");
        let reply = router.handle_line(&tester(), "/autocomplete zz");
        assert!(reply.body.starts_with("No heroes match"));
    }
}
