//! Configuration loading helpers for the callmap CLI.
//!
//! Leading configuration flags are handed to `ortho_config`; everything from
//! the first unrecognised token onward is parsed as the command.

use std::ffi::{OsStr, OsString};

use callmap_config::Config;
use ortho_config::OrthoConfig;

use crate::{AppError, CONFIG_CLI_FLAGS};

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// Configuration flags (listed in `CONFIG_CLI_FLAGS`) must appear before
    /// the subcommand. Flags appearing later are parsed as command arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Stop,
}

fn classify_flag(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    if !text.starts_with("--") {
        return FlagAction::Stop;
    }

    let (flag, has_inline_value) = text
        .split_once('=')
        .map_or((&*text, false), |(flag, _)| (flag, true));
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !has_inline_value,
        }
    } else {
        FlagAction::Stop
    }
}

/// Arguments partitioned between the configuration loader and the command
/// parser. Both halves start with the program name.
#[derive(Debug, Default)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_arguments: Vec<OsString>,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit::default();
    };

    let mut split = ConfigArgumentSplit {
        config_arguments: vec![program.clone()],
        command_arguments: vec![program.clone()],
    };
    let mut remaining = rest.iter();
    while let Some(argument) = remaining.next() {
        match classify_flag(argument) {
            FlagAction::Include { needs_value } => {
                split.config_arguments.push(argument.clone());
                if needs_value {
                    split.config_arguments.extend(remaining.next().cloned());
                }
            }
            FlagAction::Stop => {
                split.command_arguments.push(argument.clone());
                split.command_arguments.extend(remaining.cloned());
                break;
            }
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case::inline("--log-filter=debug", FlagAction::Include { needs_value: false })]
    #[case::separate("--log-filter", FlagAction::Include { needs_value: true })]
    #[case::command("prompt", FlagAction::Stop)]
    #[case::unknown("--tree", FlagAction::Stop)]
    fn flags_are_classified(#[case] argument: &str, #[case] expected: FlagAction) {
        assert_eq!(classify_flag(OsStr::new(argument)), expected);
    }

    #[test]
    fn leading_config_flags_are_split_from_command() {
        let args = os_args(&[
            "callmap",
            "--log-format",
            "json",
            "--diagram-kind=flowchart",
            "prompt",
            "--tree",
            "tree.json",
            "--log-filter",
            "debug",
        ]);

        let split = split_config_arguments(&args);

        assert_eq!(
            split.config_arguments,
            os_args(&["callmap", "--log-format", "json", "--diagram-kind=flowchart"])
        );
        assert_eq!(
            split.command_arguments,
            os_args(&["callmap", "prompt", "--tree", "tree.json", "--log-filter", "debug"])
        );
    }

    #[test]
    fn empty_arguments_split_to_nothing() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert!(split.command_arguments.is_empty());
    }
}
