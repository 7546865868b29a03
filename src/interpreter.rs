use crate::builtin::{Add, Print, Rem};
use crate::command::CommandFactory;
use crate::container::Container;
use crate::env::Environment;
use crate::error::CommandError;
use crate::factory::Factory;
use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, debug_span, info};

/// Counters of one processed command stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank lines seen.
    pub lines: usize,
    /// Lines that ran to completion, tolerated no-ops included.
    pub executed: usize,
    /// Lines reported on the error stream.
    pub failed: usize,
}

/// Line-oriented interpreter of the `ADD` / `REM` / `PRINT` language.
///
/// The interpreter owns an [`Environment`] (the container and the transport
/// registry) and a list of [`CommandFactory`] objects that are queried to create
/// commands by their leading word. See [`Default`] for the commands included out
/// of the box.
///
/// Example
/// ```
/// use transport_commands::Interpreter;
/// let mut interp = Interpreter::default();
/// let mut out = Vec::new();
/// interp.run_line("ADD TRAIN owner=Ivan speed=100 distance=900 wagons=10", &mut out).unwrap();
/// interp.run_line("PRINT", &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "[PRINT]\n[Поезд] Владелец: Ivan, Скорость: 100, Расстояние: 900, Вагоны: 10\n"
/// );
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(env: Environment, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { env, commands }
    }

    /// The default commands, with the given error policy.
    pub fn with_strict(strict: bool) -> Self {
        Self::new(Environment::new(strict), default_commands())
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn container(&self) -> &Container {
        &self.env.container
    }

    /// Run a single command invocation by name with operands.
    pub fn run(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
    ) -> Result<(), CommandError> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(name, args) {
                return cmd?.execute(stdout, &mut self.env);
            }
        }
        self.env
            .tolerate(CommandError::UnknownCommand(name.to_string()))
    }

    /// Split one line on whitespace and run it. Blank lines do nothing.
    pub fn run_line(&mut self, line: &str, stdout: &mut dyn Write) -> Result<(), CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(());
        };
        let args: Vec<&str> = words.collect();
        self.run(name, &args, stdout)
    }

    /// Run every line of `reader` in order.
    ///
    /// A failing line is reported on `stderr` as `line <n>: <error>` and processing
    /// continues with the next one. Only read errors and output write errors abort.
    pub fn run_reader<R: BufRead>(
        &mut self,
        reader: R,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (index, line) in reader.lines().enumerate() {
            let number = index + 1;
            let line = line.with_context(|| format!("cannot read line {number}"))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            summary.lines += 1;

            let _span = debug_span!("line", number).entered();
            debug!(command = line, "dispatching");
            match self.run_line(line, stdout) {
                Ok(()) => summary.executed += 1,
                Err(CommandError::Io(err)) => {
                    return Err(anyhow::Error::from(err).context("cannot write output"));
                }
                Err(err) => {
                    summary.failed += 1;
                    writeln!(stderr, "line {number}: {err}")?;
                }
            }
        }

        stdout.flush()?;
        Ok(summary)
    }

    /// Run the commands file at `path`. The file is closed when this returns.
    pub fn run_file(
        &mut self,
        path: impl AsRef<Path>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<RunSummary> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("cannot open commands file {}", path.display()))?;
        info!(path = %path.display(), "processing commands file");
        self.run_reader(BufReader::new(file), stdout, stderr)
            .with_context(|| format!("while processing {}", path.display()))
    }

    /// Interactive prompt. Ctrl-C or Ctrl-D ends the session.
    pub fn repl(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;
        let mut stdout = std::io::stdout();

        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str())?;
                    if let Err(err) = self.run_line(&line, &mut stdout) {
                        eprintln!("error: {err}");
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

fn default_commands() -> Vec<Box<dyn CommandFactory>> {
    vec![
        Box::new(Factory::<Add>::default()),
        Box::new(Factory::<Rem>::default()),
        Box::new(Factory::<Print>::default()),
    ]
}

impl Default for Interpreter {
    /// Lenient interpreter with the `ADD`, `REM` and `PRINT` commands.
    fn default() -> Self {
        Self::with_strict(false)
    }
}
