use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use flamefold_core::RenderOptions;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut options = RenderOptions::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--width" => {
                let value = args.next().context("--width needs a value")?;
                options.width_budget = value
                    .parse()
                    .with_context(|| format!("invalid --width value {value:?}"))?;
            }
            "--min-width" => {
                let value = args.next().context("--min-width needs a value")?;
                options.min_visible_width = value
                    .parse()
                    .with_context(|| format!("invalid --min-width value {value:?}"))?;
            }
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ if output.is_none() => output = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument {arg:?}"),
        }
    }

    let Some(input) = input else {
        eprintln!("Usage: flamefold <trace.folded> [output.html] [--width N] [--min-width N]");
        std::process::exit(1);
    };
    let output = output.unwrap_or_else(|| PathBuf::from("flame.html"));

    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let html = flamefold_core::render_flame_html(&text, &options)?;
    std::fs::write(&output, html).with_context(|| format!("writing {}", output.display()))?;

    info!("wrote {}", output.display());
    Ok(())
}
