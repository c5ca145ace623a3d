//! Pre-parsed command-line input handed to the router and to tasks.
//!
//! Parsing is schema-less: `--name` is a switch, `--name=value`
//! carries a value, `-abc` sets three switches, and everything after `--`
//! is positional. Tasks that need real option parsing do it themselves from
//! [`ParsedInput::task_arguments`].

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Value of a flag given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Switch,
    Value(String),
}

impl FlagValue {
    fn to_json(&self) -> Value {
        match self {
            FlagValue::Switch => Value::Bool(true),
            FlagValue::Value(v) => Value::String(v.clone()),
        }
    }
}

/// Positional tokens plus flags, as given to a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    positionals: Vec<String>,
    flags: BTreeMap<String, FlagValue>,
    raw: Vec<String>,
    /// Index in `raw` of the first positional (the task token).
    token_index: Option<usize>,
}

impl ParsedInput {
    /// Assemble an input directly. The raw argument list is synthesized as
    /// positionals followed by flags.
    pub fn new<I, S>(positionals: I, flags: BTreeMap<String, FlagValue>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let positionals: Vec<String> = positionals.into_iter().map(Into::into).collect();
        let mut raw = positionals.clone();
        for (name, value) in &flags {
            raw.push(match value {
                FlagValue::Switch => format!("--{name}"),
                FlagValue::Value(v) => format!("--{name}={v}"),
            });
        }
        let token_index = if positionals.is_empty() { None } else { Some(0) };
        Self {
            positionals,
            flags,
            raw,
            token_index,
        }
    }

    /// Split raw arguments into positionals and flags.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut input = Self {
            raw: raw.clone(),
            ..Default::default()
        };

        let mut i = 0;
        while i < raw.len() {
            let arg = &raw[i];
            match arg.as_str() {
                "--" => {
                    for rest in &raw[i + 1..] {
                        input.push_positional(rest.clone(), i + 1);
                    }
                    break;
                }
                "-" => input.push_positional(arg.clone(), i),
                _ if arg.starts_with("--") => {
                    let body = &arg[2..];
                    match body.split_once('=') {
                        Some((name, value)) => {
                            input
                                .flags
                                .insert(name.to_string(), FlagValue::Value(value.to_string()));
                        }
                        None => {
                            input.flags.insert(body.to_string(), FlagValue::Switch);
                        }
                    }
                }
                _ if arg.starts_with('-') => {
                    for short in arg[1..].chars() {
                        input.flags.insert(short.to_string(), FlagValue::Switch);
                    }
                }
                _ => input.push_positional(arg.clone(), i),
            }
            i += 1;
        }

        input
    }

    fn push_positional(&mut self, value: String, raw_index: usize) {
        if self.token_index.is_none() {
            self.token_index = Some(raw_index);
        }
        self.positionals.push(value);
    }

    /// The first positional: the task token as typed.
    pub fn task_token(&self) -> Option<&str> {
        self.positionals.first().map(String::as_str)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn flags(&self) -> &BTreeMap<String, FlagValue> {
        &self.flags
    }

    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }

    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Raw arguments that followed the task token, unchanged.
    pub fn task_arguments(&self) -> &[String] {
        match self.token_index {
            Some(index) if index < self.raw.len() => &self.raw[index + 1..],
            _ => &[],
        }
    }

    /// Raw arguments after the task token, joined by a space.
    pub fn raw_arguments(&self) -> String {
        self.task_arguments().join(" ")
    }

    /// Flags as a JSON object: switches are `true`, values are strings.
    pub fn flags_json(&self) -> Value {
        let map: Map<String, Value> = self
            .flags
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_splits_flags_and_positionals() {
        let input = ParsedInput::from_args(["build", "--watch", "--mode=prod", "-qv", "src"]);
        assert_eq!(input.task_token(), Some("build"));
        assert_eq!(input.positionals(), ["build", "src"]);
        assert_eq!(input.flag("watch"), Some(&FlagValue::Switch));
        assert_eq!(
            input.flag("mode"),
            Some(&FlagValue::Value("prod".to_string()))
        );
        assert_eq!(input.flag("q"), Some(&FlagValue::Switch));
        assert_eq!(input.flag("v"), Some(&FlagValue::Switch));
    }

    #[test]
    fn test_double_dash_ends_flags() {
        let input = ParsedInput::from_args(["test", "--", "--not-a-flag", "-x"]);
        assert!(!input.has_flags());
        assert_eq!(input.positionals(), ["test", "--not-a-flag", "-x"]);
    }

    #[test]
    fn test_task_arguments_follow_the_token() {
        let input = ParsedInput::from_args(["--early", "deploy", "prod", "--force"]);
        assert_eq!(input.task_token(), Some("deploy"));
        assert_eq!(input.task_arguments(), ["prod", "--force"]);
        assert_eq!(input.raw_arguments(), "prod --force");
    }

    #[test]
    fn test_empty_input() {
        let input = ParsedInput::from_args(Vec::<String>::new());
        assert_eq!(input.task_token(), None);
        assert!(input.task_arguments().is_empty());
        assert_eq!(input.raw_arguments(), "");
    }

    #[test]
    fn test_new_synthesizes_raw() {
        let mut flags = BTreeMap::new();
        flags.insert("env".to_string(), FlagValue::Value("ci".to_string()));
        flags.insert("force".to_string(), FlagValue::Switch);
        let input = ParsedInput::new(["db:m", "now"], flags);
        assert_eq!(input.raw(), ["db:m", "now", "--env=ci", "--force"]);
        assert_eq!(input.task_arguments(), ["now", "--env=ci", "--force"]);
    }

    #[test]
    fn test_flags_json() {
        let input = ParsedInput::from_args(["x", "--a", "--b=2"]);
        assert_eq!(input.flags_json(), serde_json::json!({"a": true, "b": "2"}));
    }
}
