/*!
 * Legacy Files - Diagnostic Entry Point
 *
 * Runs one composed open against the configured drive map and prints what
 * a legacy program would see:
 *
 *   legacy-files <name> [--search] [--parse]
 */

use legacy_files::{
    close_all_handles, init_tracing, Config, FileManager, OfStruct, OpenFileMode, OpenFileOutcome,
};
use miette::{miette, IntoDiagnostic};
use serde_json::json;
use tracing::info;

const USAGE: &str = "usage: legacy-files <name> [--search] [--parse]";

fn main() -> miette::Result<()> {
    init_tracing();

    let mut name = None;
    let mut mode = OpenFileMode::EXIST;
    for arg in std::env::args().skip(1) {
        if arg == "--search" {
            mode |= OpenFileMode::SEARCH;
        } else if arg == "--parse" {
            mode = OpenFileMode::PARSE;
        } else if arg == "-h" || arg == "--help" {
            println!("{USAGE}");
            return Ok(());
        } else if name.is_none() {
            name = Some(arg);
        } else {
            return Err(miette!("unexpected argument '{arg}'\n{USAGE}"));
        }
    }
    let name = name.ok_or_else(|| miette!("{USAGE}"))?;

    let config = Config::from_env().into_diagnostic()?;
    let manager = FileManager::from_config(&config);
    let mut ctx = manager.new_context(std::process::id());
    info!(name = %name, mode = mode.bits(), "running composed open");

    let mut ofs = OfStruct::new();
    let outcome = manager.open_file(&mut ctx, &name, &mut ofs, mode);
    let stat = match outcome {
        Ok(OpenFileOutcome::Exists) => manager.stat(&mut ctx, &ofs.path_name).ok(),
        _ => None,
    };

    let report = json!({
        "outcome": outcome.as_ref().ok(),
        "ofstruct": ofs,
        "stat": stat,
        "error": ctx.last_error(),
    });
    println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);

    close_all_handles(&mut ctx);
    outcome.map(drop).map_err(Into::into)
}
