use crate::command::{CommandFactory, ExecutableCommand};
use crate::container::{Condition, Operator};
use crate::env::Environment;
use crate::error::CommandError;
use crate::factory::{Factory, Params};
use argh::{EarlyExit, FromArgs};
use std::io::Write;
use tracing::debug;

/// Commands of the transport language known at compile time.
///
/// Operands are parsed using the [`argh`] crate (`FromArgs`) and the command is executed
/// directly against the [`Environment`].
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Leading word of the command, e.g. "ADD".
    fn name() -> &'static str;

    /// Executes the command, writing its console output to `stdout`.
    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<(), CommandError>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<(), CommandError> {
        <T as BuiltinCommand>::execute(*self, stdout, env)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        name: &str,
        args: &[&str],
    ) -> Option<Result<Box<dyn ExecutableCommand>, CommandError>> {
        if name != T::name() {
            return None;
        }
        // Everything after `--` is an operand, so `-5` is a number and not an option.
        let mut operands = Vec::with_capacity(args.len() + 1);
        operands.push("--");
        operands.extend_from_slice(args);
        Some(match T::from_args(&[name], &operands) {
            Ok(cmd) => {
                let cmd: Box<dyn ExecutableCommand> = Box::new(cmd);
                Ok(cmd)
            }
            Err(EarlyExit { output, .. }) => {
                let message = output.split_whitespace().collect::<Vec<_>>().join(" ");
                Err(CommandError::syntax(name, message))
            }
        })
    }
}

#[derive(FromArgs)]
/// Build a transport from key=value parameters and append it to the container.
pub struct Add {
    #[argh(positional)]
    /// transport type: PLANE, TRAIN or TRUCK.
    pub kind: String,

    #[argh(positional, greedy)]
    /// parameters as key=value pairs.
    pub params: Vec<String>,
}

impl BuiltinCommand for Add {
    fn name() -> &'static str {
        "ADD"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<(), CommandError> {
        let params = Params::parse_pairs(self.params.iter().map(String::as_str)).map_err(|token| {
            CommandError::syntax(Self::name(), format!("expected key=value, got `{token}`"))
        })?;

        match env.transports.create(&self.kind, &params) {
            Ok(transport) => {
                debug!(%transport, "added");
                env.container.add(transport);
                Ok(())
            }
            Err(err) => env.tolerate(err.into()),
        }
    }
}

#[derive(FromArgs)]
/// Remove every transport whose field compares true against an integer.
pub struct Rem {
    #[argh(positional)]
    /// attribute name, e.g. speed or volume.
    pub field: String,

    #[argh(positional)]
    /// comparison operator: >, < or ==.
    pub operator: String,

    #[argh(positional)]
    /// integer to compare against.
    pub value: String,

    #[argh(positional, greedy)]
    /// trailing words, ignored.
    pub _rest: Vec<String>,
}

impl BuiltinCommand for Rem {
    fn name() -> &'static str {
        "REM"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<(), CommandError> {
        // Integer even for float fields such as volume.
        let value: i64 = self.value.parse().map_err(|_| {
            CommandError::syntax(
                Self::name(),
                format!("comparison value `{}` is not an integer", self.value),
            )
        })?;

        let removed = match self.operator.parse::<Operator>() {
            Ok(operator) => {
                let condition = Condition::new(self.field, operator, value);
                let removed = env.container.remove_where(&condition);
                debug!(%condition, removed, "removed");
                removed
            }
            Err(err) => {
                env.tolerate(err)?;
                0
            }
        };

        writeln!(stdout, "[REM]")?;
        writeln!(stdout, "Удалено объектов: {removed}")?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Print every stored transport in insertion order.
pub struct Print {
    #[argh(positional, greedy)]
    /// trailing words, ignored.
    pub _rest: Vec<String>,
}

impl BuiltinCommand for Print {
    fn name() -> &'static str {
        "PRINT"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<(), CommandError> {
        writeln!(stdout, "[PRINT]")?;
        if env.container.is_empty() {
            writeln!(stdout, "Контейнер пуст")?;
        } else {
            for line in env.container.print_all() {
                writeln!(stdout, "{line}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Train, Transport, Truck};

    fn output(out: Vec<u8>) -> String {
        String::from_utf8(out).expect("utf8")
    }

    fn create(name: &str, args: &[&str]) -> Result<Box<dyn ExecutableCommand>, CommandError> {
        let factories: Vec<Box<dyn CommandFactory>> = vec![
            Box::new(Factory::<Add>::default()),
            Box::new(Factory::<Rem>::default()),
            Box::new(Factory::<Print>::default()),
        ];
        factories
            .iter()
            .find_map(|f| f.try_create(name, args))
            .expect("known command")
    }

    #[test]
    fn test_add_appends_transport() {
        let mut env = Environment::default();
        let mut out = Vec::new();
        let add = Add {
            kind: "TRAIN".to_string(),
            params: vec![
                "owner=Ivan".into(),
                "speed=100".into(),
                "distance=900".into(),
                "wagons=10".into(),
            ],
        };
        add.execute(&mut out, &mut env).unwrap();

        assert!(out.is_empty());
        let stored: Vec<&Transport> = env.container.iter().collect();
        assert_eq!(stored, [&Transport::from(Train::new("Ivan", 100, 900, 10))]);
    }

    #[test]
    fn test_add_unknown_type_is_silent_by_default() {
        let mut env = Environment::default();
        let add = Add {
            kind: "SHIP".to_string(),
            params: vec!["owner=X".into()],
        };
        assert!(add.execute(&mut Vec::new(), &mut env).is_ok());
        assert!(env.container.is_empty());
    }

    #[test]
    fn test_add_construction_failure_in_strict_mode() {
        let mut env = Environment::new(true);
        let add = Add {
            kind: "TRAIN".to_string(),
            params: vec!["owner=Ivan".into(), "speed=slow".into()],
        };
        let err = add.execute(&mut Vec::new(), &mut env).unwrap_err();
        assert!(matches!(err, CommandError::Transport(_)));
        assert!(env.container.is_empty());
    }

    #[test]
    fn test_add_rejects_token_without_equal() {
        let mut env = Environment::default();
        let add = Add {
            kind: "TRAIN".to_string(),
            params: vec!["owner".into()],
        };
        let err = add.execute(&mut Vec::new(), &mut env).unwrap_err();
        assert_eq!(err.to_string(), "ADD: expected key=value, got `owner`");
    }

    #[test]
    fn test_rem_reports_count() {
        let mut env = Environment::default();
        env.container.add(Train::new("A", 120, 10, 1).into());
        env.container.add(Train::new("B", 80, 10, 1).into());
        let mut out = Vec::new();

        create("REM", &["speed", ">", "100"])
            .unwrap()
            .execute(&mut out, &mut env)
            .unwrap();

        assert_eq!(output(out), "[REM]\nУдалено объектов: 1\n");
        assert_eq!(env.container.len(), 1);
    }

    #[test]
    fn test_rem_negative_value_is_an_operand() {
        let mut env = Environment::default();
        env.container.add(Train::new("A", 120, 10, 1).into());
        let mut out = Vec::new();

        create("REM", &["speed", ">", "-5"])
            .unwrap()
            .execute(&mut out, &mut env)
            .unwrap();

        assert_eq!(output(out), "[REM]\nУдалено объектов: 1\n");
    }

    #[test]
    fn test_rem_unknown_operator() {
        let mut env = Environment::default();
        env.container.add(Train::new("A", 120, 10, 1).into());
        let mut out = Vec::new();
        create("REM", &["speed", ">=", "0"])
            .unwrap()
            .execute(&mut out, &mut env)
            .unwrap();
        assert_eq!(output(out), "[REM]\nУдалено объектов: 0\n");

        let mut strict = Environment::new(true);
        let mut out = Vec::new();
        let err = create("REM", &["speed", ">=", "0"])
            .unwrap()
            .execute(&mut out, &mut strict)
            .unwrap_err();
        assert!(matches!(err, CommandError::UnknownOperator(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_rem_value_parsed_as_integer() {
        let mut env = Environment::default();
        env.container.add(Truck::new("C", 90, 400, 5000, 30.5).into());

        let err = create("REM", &["volume", ">", "30.2"])
            .unwrap()
            .execute(&mut Vec::new(), &mut env)
            .unwrap_err();
        assert!(matches!(err, CommandError::Syntax { .. }));

        let mut out = Vec::new();
        create("REM", &["volume", ">", "30"])
            .unwrap()
            .execute(&mut out, &mut env)
            .unwrap();
        assert_eq!(output(out), "[REM]\nУдалено объектов: 1\n");
    }

    #[test]
    fn test_rem_missing_operands() {
        let err = create("REM", &["speed", ">"]).err().expect("syntax error");
        assert!(matches!(err, CommandError::Syntax { ref command, .. } if command == "REM"));
    }

    #[test]
    fn test_add_without_type() {
        let err = create("ADD", &[]).err().expect("syntax error");
        assert!(matches!(err, CommandError::Syntax { ref command, .. } if command == "ADD"));
    }

    #[test]
    fn test_print_empty_and_filled() {
        let mut env = Environment::default();
        let mut out = Vec::new();
        Print { _rest: vec![] }.execute(&mut out, &mut env).unwrap();
        assert_eq!(output(out), "[PRINT]\nКонтейнер пуст\n");

        env.container.add(Train::new("Ivan", 100, 900, 10).into());
        let mut out = Vec::new();
        Print { _rest: vec![] }.execute(&mut out, &mut env).unwrap();
        assert_eq!(
            output(out),
            "[PRINT]\n[Поезд] Владелец: Ivan, Скорость: 100, Расстояние: 900, Вагоны: 10\n"
        );
    }

    #[test]
    fn test_trailing_words_are_ignored() {
        let mut env = Environment::default();
        env.container.add(Train::new("A", 120, 10, 1).into());
        let mut out = Vec::new();
        create("REM", &["speed", ">", "100", "extra", "words"])
            .unwrap()
            .execute(&mut out, &mut env)
            .unwrap();
        create("PRINT", &["now"])
            .unwrap()
            .execute(&mut out, &mut env)
            .unwrap();
        assert_eq!(
            output(out),
            "[REM]\nУдалено объектов: 1\n[PRINT]\nКонтейнер пуст\n"
        );
    }

    #[test]
    fn test_factory_ignores_other_names() {
        let factory = Factory::<Print>::default();
        assert!(factory.try_create("print", &[]).is_none());
        assert!(factory.try_create("ADD", &[]).is_none());
    }
}
