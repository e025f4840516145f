//! Load a resource tree described by a settings file and print a few lookups.
//!
//! ```text
//! cargo run -p resbundle --example load_and_lookup -- bundle.yaml hello welcome
//! ```
//!
//! Without a settings file the `RESBUNDLE_*` environment variables and the
//! defaults (`resources/`, `en`) are used.

use resbundle::{bundle_args, Bundle, BundleSettings};
use resbundle_common::logging::{init_logging, LoggingConfig};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig::development())?;

    let mut args = env::args().skip(1);
    let settings = match args.next() {
        Some(path) => BundleSettings::load_from_file(path)?,
        None => BundleSettings::from_env()?,
    };

    let mut bundle = Bundle::from_settings(&settings)?;
    bundle.load()?;

    println!(
        "Loaded locales: {}",
        bundle
            .locales()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    for id in args {
        println!("{id} => {}", bundle.get(&id, &bundle_args!["world"]));
    }
    Ok(())
}
