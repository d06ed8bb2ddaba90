use std::process::ExitCode;
use std::time::Duration;

fn main() -> anyhow::Result<ExitCode> {
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(mudmap::app::run());

    // A stdin read blocked on the player cannot be cancelled
    runtime.shutdown_timeout(Duration::from_millis(100));

    // Snapshots and game output share the terminal
    use std::io::{self, Write};
    let _ = io::stderr().flush();
    let _ = io::stdout().flush();

    result
}
