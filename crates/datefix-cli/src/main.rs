use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(
    name = "datefix",
    version,
    about = "Restore photo/video timestamps from Takeout JSON sidecars"
)]
struct Cli {
    /// Directory of album folders
    input: PathBuf,

    /// Mirrored output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Keep an existing output tree instead of deleting it first
    #[arg(long)]
    keep_output: bool,

    /// Override extension handling, e.g. --map webp=image (repeatable)
    #[arg(long = "map", value_name = "EXT=KIND")]
    map: Vec<String>,

    /// Per-file debug logging (current EXIF values, skipped entries)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    let options = datefix_core::ProcessOptions {
        input: cli.input,
        output: cli.output,
        clean: !cli.keep_output,
        extension_overrides: cli.map,
    };
    log::debug!("options: {:?}", options);

    let bar = ProgressBar::new(0);
    bar.set_style(ProgressStyle::with_template("[{bar:40}] {pos}/{len} {msg}")?.progress_chars("=> "));

    let t_total = std::time::Instant::now();
    let bar_cb = bar.clone();
    let result = datefix_core::process(&options, &move |_stage, current, total, message| {
        if bar_cb.length() != Some(total) {
            bar_cb.set_length(total);
        }
        bar_cb.set_position(current);
        bar_cb.set_message(message.to_string());
    })?;
    bar.finish_and_clear();

    println!(
        "Done! {} media files, {} fixed, {} copied without metadata, {} copy failures, {} skipped ({:.2}s)",
        result.total_media,
        result.fixed,
        result.copied_only,
        result.copy_failed,
        result.skipped,
        t_total.elapsed().as_secs_f64()
    );
    println!(
        "Handled extensions: {}",
        result
            .handled_extensions
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );
    for ext in &result.unhandled_extensions {
        eprintln!("WARNING: .{ext} not handled!");
    }
    for failure in &result.failures {
        eprintln!("  {}: {}", failure.path.display(), failure.reason);
    }

    Ok(())
}
