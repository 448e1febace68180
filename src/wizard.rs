//! Interactive configuration wizard
//!
//! The wizard is a declarative list of field specifications consumed by one
//! generic prompt-runner. Minimal mode is a filter over the list, and a
//! field that only makes sense after an earlier "on" answer declares that
//! dependency instead of branching by hand. Raw answers are mapped onto
//! [`ServerProperties`] in a separate pure step.

use std::collections::BTreeMap;

use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, CustomUserError, Select, Text};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::properties::{parse_players, ServerProperties, Toggle};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("digits pattern"));

/// How much of the field list to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    /// Identity fields only; everything else keeps its default.
    Minimal,
    /// The whole list.
    Full,
}

/// How a field is asked.
#[derive(Debug, Clone, Copy)]
pub enum Widget {
    /// Free text, re-prompted while blank.
    Text {
        placeholder: Option<&'static str>,
        initial: Option<&'static str>,
    },
    /// Digit-only text with a numeric range check.
    Number { initial: &'static str },
    /// Two-option select recorded as on/off, with bespoke option labels.
    Toggle {
        yes: &'static str,
        no: &'static str,
        default_on: bool,
    },
}

/// One wizard question.
///
/// `key` doubles as the answer key: property keys for everything that lands
/// in `server.properties`, `players` for the allow-list names.
#[derive(Debug)]
pub struct FieldSpec {
    pub key: &'static str,
    pub prompt: &'static str,
    pub widget: Widget,
    /// Asked in minimal mode too.
    pub minimal: bool,
    /// Only asked once this earlier answer resolved to "on".
    pub requires_on: Option<&'static str>,
}

/// The full question list, in the order the operator sees it.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "motd",
        prompt: "Enter the server name:",
        widget: Widget::Text {
            placeholder: Some("PowerNukkitX Server"),
            initial: None,
        },
        minimal: true,
        requires_on: None,
    },
    FieldSpec {
        key: "sub-motd",
        prompt: "Enter the sub-motd:",
        widget: Widget::Text {
            placeholder: Some("v2.powernukkitx.com"),
            initial: None,
        },
        minimal: true,
        requires_on: None,
    },
    FieldSpec {
        key: "server-port",
        prompt: "Enter the server port:",
        widget: Widget::Number { initial: "19132" },
        minimal: true,
        requires_on: None,
    },
    FieldSpec {
        key: "white-list",
        prompt: "Do you want to enable the whitelist?",
        widget: Widget::Toggle {
            yes: "Yes (Attention, you need to add players to connect.)",
            no: "No",
            default_on: false,
        },
        minimal: false,
        requires_on: None,
    },
    FieldSpec {
        key: "players",
        prompt: "Enter the names of the players to be added to the whitelist, separated by commas:",
        widget: Widget::Text {
            placeholder: Some("AzaleeMc, Steve"),
            initial: None,
        },
        minimal: false,
        requires_on: Some("white-list"),
    },
    FieldSpec {
        key: "max-players",
        prompt: "Enter the maximum number of players that can connect:",
        widget: Widget::Number { initial: "20" },
        minimal: true,
        requires_on: None,
    },
    FieldSpec {
        key: "use-terra",
        prompt: "Do you want to use Terra, a custom world generator?",
        widget: Widget::Toggle {
            yes: "Yes (The world will have custom generation.)",
            no: "No",
            default_on: false,
        },
        minimal: false,
        requires_on: None,
    },
    FieldSpec {
        key: "enable-query",
        prompt: "Do you want to enable the query protocol?",
        widget: Widget::Toggle {
            yes: "Yes",
            no: "No",
            default_on: true,
        },
        minimal: false,
        requires_on: None,
    },
    FieldSpec {
        key: "enable-rcon",
        prompt: "Do you want to enable RCON remote administration?",
        widget: Widget::Toggle {
            yes: "Yes",
            no: "No",
            default_on: false,
        },
        minimal: false,
        requires_on: None,
    },
    FieldSpec {
        key: "rcon.password",
        prompt: "Enter the RCON password:",
        widget: Widget::Text {
            placeholder: None,
            initial: None,
        },
        minimal: false,
        requires_on: Some("enable-rcon"),
    },
    FieldSpec {
        key: "force-resources",
        prompt: "Do you want to force players to download the resource pack(s)?",
        widget: Widget::Toggle {
            yes: "Yes (This will force all players to download it/them.)",
            no: "No (The player has the choice.)",
            default_on: false,
        },
        minimal: false,
        requires_on: None,
    },
    FieldSpec {
        key: "xbox-auth",
        prompt: "Do you want to enable Xbox authentication?",
        widget: Widget::Toggle {
            yes: "Yes",
            no: "No",
            default_on: true,
        },
        minimal: false,
        requires_on: None,
    },
];

type Answers = BTreeMap<&'static str, String>;

/// What the wizard produced: typed settings plus the optional allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardOutput {
    pub properties: ServerProperties,
    pub whitelist_players: Option<Vec<String>>,
}

/// Offer the wizard. Returns `None` when the operator declines.
pub fn run() -> Result<Option<WizardOutput>> {
    let configure = Confirm::new("Do you want to configure the server?")
        .with_default(false)
        .with_help_message("Skipping keeps the stock settings; rerun this installer to change them")
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;

    if !configure {
        return Ok(None);
    }

    let mode = choose_mode()?;
    let answers = collect_answers(mode)?;
    Ok(Some(build_output(&answers)))
}

/// Minimal asks only the identity fields; Full walks the whole list.
fn choose_mode() -> Result<WizardMode> {
    let pick = Select::new(
        "Do you want a minimal configuration or a full configuration?",
        vec!["Minimal", "Full"],
    )
    .prompt()
    .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;

    Ok(match pick {
        "Full" => WizardMode::Full,
        _ => WizardMode::Minimal,
    })
}

/// Fields asked in `mode`, before answer-dependent gating.
pub fn fields_for(mode: WizardMode) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS
        .iter()
        .filter(move |f| mode == WizardMode::Full || f.minimal)
}

/// Answer-dependent gate: a conditional field is skipped until its
/// controlling answer is "on".
fn is_enabled(field: &FieldSpec, answers: &Answers) -> bool {
    match field.requires_on {
        Some(gate) => answers.get(gate).is_some_and(|v| v.as_str() == "on"),
        None => true,
    }
}

/// Walk the field list for `mode` and collect raw answers.
fn collect_answers(mode: WizardMode) -> Result<Answers> {
    let mut answers = Answers::new();
    for field in fields_for(mode) {
        if !is_enabled(field, &answers) {
            continue;
        }
        let value = ask(field)?;
        answers.insert(field.key, value);
    }
    Ok(answers)
}

/// Put one field's question to the operator.
fn ask(field: &FieldSpec) -> Result<String> {
    match field.widget {
        Widget::Text {
            placeholder,
            initial,
        } => {
            let mut prompt = Text::new(field.prompt).with_validator(require_input());
            if let Some(placeholder) = placeholder {
                prompt = prompt.with_placeholder(placeholder);
            }
            if let Some(initial) = initial {
                prompt = prompt.with_initial_value(initial);
            }
            prompt
                .prompt()
                .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))
        }
        Widget::Number { initial } => Text::new(field.prompt)
            .with_initial_value(initial)
            .with_validator(require_digits())
            .prompt()
            .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e)),
        Widget::Toggle {
            yes,
            no,
            default_on,
        } => {
            let start = if default_on { 0 } else { 1 };
            let pick = Select::new(field.prompt, vec![yes, no])
                .with_starting_cursor(start)
                .prompt()
                .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;
            Ok(Toggle::from_flag(pick == yes).to_string())
        }
    }
}

/// Blank input re-prompts instead of failing.
fn require_input() -> impl Fn(&str) -> Result<Validation, CustomUserError> + Clone {
    |input: &str| {
        if input.trim().is_empty() {
            Ok(Validation::Invalid("A value is required.".into()))
        } else {
            Ok(Validation::Valid)
        }
    }
}

/// Anything but a plain number re-prompts.
fn require_digits() -> impl Fn(&str) -> Result<Validation, CustomUserError> + Clone {
    |input: &str| {
        if is_numeric(input) {
            Ok(Validation::Valid)
        } else {
            Ok(Validation::Invalid("Please enter a valid number.".into()))
        }
    }
}

/// The rule behind the numeric prompts: digits only, within `u32` range.
pub fn is_numeric(input: &str) -> bool {
    DIGITS.is_match(input) && input.parse::<u32>().is_ok()
}

/// Pure mapping from raw answers onto the typed configuration.
///
/// Whatever the mode or gating skipped keeps its value from
/// `ServerProperties::default()`.
fn build_output(answers: &Answers) -> WizardOutput {
    let mut props = ServerProperties::default();

    if let Some(motd) = answers.get("motd") {
        props.motd = motd.clone();
    }
    if let Some(sub_motd) = answers.get("sub-motd") {
        props.sub_motd = sub_motd.clone();
    }
    if let Some(port) = answers.get("server-port").and_then(|v| v.parse().ok()) {
        props.server_port = port;
    }
    if let Some(max) = answers.get("max-players").and_then(|v| v.parse().ok()) {
        props.max_players = max;
    }
    props.white_list = toggle_answer(answers, "white-list", props.white_list);
    props.use_terra = toggle_answer(answers, "use-terra", props.use_terra);
    props.enable_query = toggle_answer(answers, "enable-query", props.enable_query);
    props.enable_rcon = toggle_answer(answers, "enable-rcon", props.enable_rcon);
    props.force_resources = toggle_answer(answers, "force-resources", props.force_resources);
    props.xbox_auth = toggle_answer(answers, "xbox-auth", props.xbox_auth);
    if let Some(password) = answers.get("rcon.password") {
        props.rcon_password = password.clone();
    }

    let whitelist_players = match props.white_list {
        Toggle::On => answers.get("players").map(|v| parse_players(v)),
        Toggle::Off => None,
    };

    WizardOutput {
        properties: props,
        whitelist_players,
    }
}

fn toggle_answer(answers: &Answers, key: &str, fallback: Toggle) -> Toggle {
    match answers.get(key).map(String::as_str) {
        Some("on") => Toggle::On,
        Some(_) => Toggle::Off,
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&'static str, &str)]) -> Answers {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn minimal_mode_asks_only_identity_fields() {
        let keys: Vec<&str> = fields_for(WizardMode::Minimal).map(|f| f.key).collect();
        assert_eq!(keys, ["motd", "sub-motd", "server-port", "max-players"]);
    }

    #[test]
    fn full_mode_walks_the_whole_list_in_order() {
        let keys: Vec<&str> = fields_for(WizardMode::Full).map(|f| f.key).collect();
        assert_eq!(
            keys,
            [
                "motd",
                "sub-motd",
                "server-port",
                "white-list",
                "players",
                "max-players",
                "use-terra",
                "enable-query",
                "enable-rcon",
                "rcon.password",
                "force-resources",
                "xbox-auth",
            ]
        );
    }

    #[test]
    fn conditional_fields_wait_for_their_gate() {
        let players = FIELDS.iter().find(|f| f.key == "players").unwrap();
        assert!(!is_enabled(players, &answers(&[])));
        assert!(!is_enabled(players, &answers(&[("white-list", "off")])));
        assert!(is_enabled(players, &answers(&[("white-list", "on")])));
    }

    #[test]
    fn numeric_rule_accepts_digits_only() {
        assert!(is_numeric("19132"));
        assert!(is_numeric("0"));
        assert!(!is_numeric("abc"));
        assert!(!is_numeric("19132a"));
        assert!(!is_numeric("-1"));
        assert!(!is_numeric("19 132"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("99999999999"));
    }

    #[test]
    fn port_validator_rejects_non_digits() {
        let validate = require_digits();
        assert!(matches!(validate("19132"), Ok(Validation::Valid)));
        assert!(matches!(validate("abc"), Ok(Validation::Invalid(_))));
    }

    #[test]
    fn blank_text_is_rejected() {
        let validate = require_input();
        assert!(matches!(validate("Test"), Ok(Validation::Valid)));
        assert!(matches!(validate("   "), Ok(Validation::Invalid(_))));
    }

    #[test]
    fn validators_attach_to_text_prompts() {
        // with_validator is where inquire demands its StringValidator bound.
        let _ = Text::new("Enter the server name:").with_validator(require_input());
        let _ = Text::new("Enter the server port:").with_validator(require_digits());
    }

    #[test]
    fn minimal_answers_map_onto_defaults() {
        let output = build_output(&answers(&[
            ("motd", "Test"),
            ("sub-motd", "x"),
            ("server-port", "19132"),
            ("max-players", "10"),
        ]));
        let props = &output.properties;
        assert_eq!(props.motd, "Test");
        assert_eq!(props.sub_motd, "x");
        assert_eq!(props.server_port, 19132);
        assert_eq!(props.max_players, 10);
        assert_eq!(props.white_list, Toggle::Off);
        assert_eq!(props.enable_query, Toggle::On);
        assert_eq!(props.xbox_auth, Toggle::On);
        assert!(output.whitelist_players.is_none());
    }

    #[test]
    fn whitelist_names_come_back_trimmed() {
        let output = build_output(&answers(&[
            ("white-list", "on"),
            ("players", "AzaleeMc, Steve"),
        ]));
        assert!(output.properties.white_list.is_on());
        assert_eq!(
            output.whitelist_players,
            Some(vec!["AzaleeMc".to_string(), "Steve".to_string()])
        );
    }

    #[test]
    fn rcon_password_rides_on_the_rcon_toggle() {
        let field = FIELDS.iter().find(|f| f.key == "rcon.password").unwrap();
        assert_eq!(field.requires_on, Some("enable-rcon"));

        let output = build_output(&answers(&[
            ("enable-rcon", "on"),
            ("rcon.password", "hunter2"),
        ]));
        assert!(output.properties.enable_rcon.is_on());
        assert_eq!(output.properties.rcon_password, "hunter2");
        assert!(output.properties.validate().is_ok());
    }
}
