use anyhow::Result;
use transport_commands::{Config, Interpreter, logging};
use tracing::info;

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init_logger(config.verbose);

    let mut interpreter = Interpreter::with_strict(config.strict);

    if config.interactive {
        interpreter.repl()?;
        return Ok(());
    }

    let summary = interpreter.run_file(
        &config.path,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;
    info!(
        lines = summary.lines,
        executed = summary.executed,
        failed = summary.failed,
        "done"
    );

    if config.strict && summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
