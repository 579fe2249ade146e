//! Name to builder registry turning configured actions into [`Action`]s

use std::collections::HashMap;
use std::time::Duration;

use image::Rgba;

use super::action::Action;
use super::afk::AfkAction;
use super::fish::FishAction;
use crate::config::{ActionDefinition, Params};
use crate::error::{BuildError, ParamError};

/// Builds one kind of action from its merged parameters
pub trait ActionBuilder {
    fn build(&self, params: &Params) -> Result<Action, ParamError>;
}

impl<F> ActionBuilder for F
where
    F: Fn(&Params) -> Result<Action, ParamError>,
{
    fn build(&self, params: &Params) -> Result<Action, ParamError> {
        self(params)
    }
}

/// Registry of action builders, filled before the robot is built
#[derive(Default)]
pub struct ActionRegistry {
    builders: HashMap<String, Box<dyn ActionBuilder>>,
}

impl ActionRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry knowing every action shipped with the bot
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("fish", FishAction::build_action);
        registry.register("afk", AfkAction::build_action);
        registry
    }

    /// Associate a name with a builder. The last registration wins.
    pub fn register(&mut self, name: impl Into<String>, builder: impl ActionBuilder + 'static) {
        self.builders.insert(name.into(), Box::new(builder));
    }

    pub fn builder_for(&self, name: &str) -> Option<&dyn ActionBuilder> {
        self.builders.get(name).map(|b| b.as_ref())
    }

    /// Build every definition in order. The first failure aborts the build.
    pub fn build_all(&self, defs: &[ActionDefinition]) -> Result<Vec<Action>, BuildError> {
        defs.iter()
            .map(|def| {
                let builder = self
                    .builder_for(&def.name)
                    .ok_or_else(|| BuildError::NoBuilder(def.name.clone()))?;
                let action = builder.build(&def.params).map_err(|source| BuildError::Action {
                    name: def.name.clone(),
                    source,
                })?;
                tracing::debug!("[BUILD] Built action {:?}: {:?}", def.name, action);
                Ok(action)
            })
            .collect()
    }
}

/// Defaults overlaid with the user's parameters; user values always win
pub fn merge_params(defaults: &Params, user: &Params) -> Params {
    let mut merged = defaults.clone();
    for (key, value) in user {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Build a parameter map from string pairs
pub fn params<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Params {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn get<'a>(params: &'a Params, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or_default()
}

pub(crate) fn parse_u64(params: &Params, key: &str) -> Result<u64, ParamError> {
    let value = get(params, key);
    value.trim().parse().map_err(|source| ParamError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
        source,
    })
}

pub(crate) fn parse_u8(params: &Params, key: &str) -> Result<u8, ParamError> {
    let value = get(params, key);
    value.trim().parse().map_err(|source| ParamError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
        source,
    })
}

pub(crate) fn parse_bool(params: &Params, key: &str) -> Result<bool, ParamError> {
    let value = get(params, key);
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" | "" => Ok(false),
        _ => Err(ParamError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// `150`, `150ms` and `2s` forms; a bare number is milliseconds
pub(crate) fn parse_duration(params: &Params, key: &str) -> Result<Duration, ParamError> {
    let value = get(params, key);
    let invalid = || ParamError::InvalidDuration {
        key: key.to_string(),
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let (digits, unit_ms) = if let Some(ms) = trimmed.strip_suffix("ms") {
        (ms, 1)
    } else if let Some(s) = trimmed.strip_suffix('s') {
        (s, 1000)
    } else {
        (trimmed, 1)
    };

    let amount: u64 = digits.trim().parse().map_err(|_| invalid())?;
    Ok(Duration::from_millis(amount.checked_mul(unit_ms).ok_or_else(invalid)?))
}

/// `"R,G,B"` with each component a byte
pub(crate) fn parse_color(params: &Params, key: &str) -> Result<Rgba<u8>, ParamError> {
    let value = get(params, key);
    let invalid = || ParamError::InvalidColor {
        key: key.to_string(),
        value: value.to_string(),
    };

    let channels = value
        .split(',')
        .map(|c| c.trim().parse::<u8>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    match channels.as_slice() {
        [r, g, b] => Ok(Rgba([*r, *g, *b, 255])),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::gate::Frequency;

    fn defs(names: &[&str]) -> Vec<ActionDefinition> {
        names
            .iter()
            .map(|name| ActionDefinition::new(*name, Params::new()))
            .collect()
    }

    #[test]
    fn test_merge_params_user_wins() {
        let defaults = params([("happens", "always"), ("catch_threshold", "2000")]);
        let user = params([("catch_threshold", "2500"), ("spell_key", "f7")]);
        let merged = merge_params(&defaults, &user);
        assert_eq!(merged["happens"], "always");
        assert_eq!(merged["catch_threshold"], "2500");
        assert_eq!(merged["spell_key"], "f7");
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_build_all_keeps_order() {
        let registry = ActionRegistry::with_defaults();
        let actions = registry.build_all(&defs(&["afk", "fish", "afk"])).unwrap();
        let names: Vec<_> = actions.iter().map(Action::name).collect();
        assert_eq!(names, ["afk", "fish", "afk"]);
    }

    #[test]
    fn test_build_all_unknown_action() {
        let registry = ActionRegistry::with_defaults();
        let err = registry.build_all(&defs(&["fish", "dance"])).unwrap_err();
        assert!(matches!(err, BuildError::NoBuilder(ref name) if name == "dance"));
        assert_eq!(err.to_string(), "no builder for action \"dance\"");
    }

    #[test]
    fn test_build_all_wraps_param_errors() {
        let registry = ActionRegistry::with_defaults();
        let bad = vec![ActionDefinition::new("fish", params([("catch_threshold", "lots")]))];
        let err = registry.build_all(&bad).unwrap_err();
        match err {
            BuildError::Action { name, source } => {
                assert_eq!(name, "fish");
                assert!(matches!(
                    source,
                    ParamError::InvalidNumber { ref key, .. } if key == "catch_threshold"
                ));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = ActionRegistry::with_defaults();
        registry.register("fish", |_: &Params| AfkAction::build_action(&Params::new()));
        let actions = registry.build_all(&defs(&["fish"])).unwrap();
        assert_eq!(actions[0].name(), "afk");
        assert!(registry.builder_for("afk").is_some());
        assert!(registry.builder_for("swim").is_none());
    }

    #[test]
    fn test_custom_builder() {
        let mut registry = ActionRegistry::new();
        registry.register("nap", |_: &Params| -> Result<Action, ParamError> {
            Ok(AfkAction::new(Frequency::Always).into())
        });
        let actions = registry.build_all(&defs(&["nap"])).unwrap();
        assert!(matches!(&actions[0], Action::Afk(a) if a.happens() == Frequency::Always));
    }

    #[test]
    fn test_parse_numbers() {
        let p = params([("a", "2000"), ("b", "-5"), ("c", "256"), ("d", " 100 ")]);
        assert_eq!(parse_u64(&p, "a").unwrap(), 2000);
        assert!(parse_u64(&p, "b").is_err());
        assert!(parse_u8(&p, "c").is_err());
        assert_eq!(parse_u8(&p, "d").unwrap(), 100);
        assert!(parse_u64(&p, "missing").is_err());
    }

    #[test]
    fn test_parse_duration() {
        let p = params([("a", "150"), ("b", "150ms"), ("c", "2s"), ("d", "soon")]);
        assert_eq!(parse_duration(&p, "a").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration(&p, "b").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration(&p, "c").unwrap(), Duration::from_secs(2));
        assert!(matches!(parse_duration(&p, "d"), Err(ParamError::InvalidDuration { .. })));
    }

    #[test]
    fn test_parse_color() {
        let p = params([("a", "183,119,88"), ("b", "1,2"), ("c", "1,2,300")]);
        assert_eq!(parse_color(&p, "a").unwrap(), Rgba([183, 119, 88, 255]));
        assert!(parse_color(&p, "b").is_err());
        assert!(parse_color(&p, "c").is_err());
    }

    #[test]
    fn test_parse_bool() {
        let p = params([("a", "true"), ("b", "No"), ("c", "maybe")]);
        assert!(parse_bool(&p, "a").unwrap());
        assert!(!parse_bool(&p, "b").unwrap());
        assert!(parse_bool(&p, "c").is_err());
    }
}
