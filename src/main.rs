// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

//! Fadeflow CLI entrypoint.
//!
//! Runs the interactive flow editor for one flow variant. Each variant owns a
//! JSON slot under the store directory; missing slots are seeded with the
//! built-in demo flow.

use std::error::Error;

use fadeflow::model::FlowVariant;
use fadeflow::store::{FlowStore, WriteDurability};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<store-dir>] [--flow <variant>] [--durable-writes]\n  {program} --demo [--flow <variant>]\n\n--flow selects the flow variant: call (default), sms or knowledge.\nThe knowledge variant is a read-only grid that re-lays out on resize.\n\nIf store-dir is omitted, the current working directory is used.\n--demo edits the built-in demo flow without persisting and cannot be\ncombined with store-dir.\n\n--durable-writes opts into slower, best-effort durable persistence\n(fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    store_dir: Option<String>,
    flow: Option<FlowVariant>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--flow" => {
                if options.flow.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let variant: FlowVariant = raw.parse().map_err(|_| ())?;
                options.flow = Some(variant);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.store_dir.is_some() {
                    return Err(());
                }
                options.store_dir = Some(arg);
            }
        }
    }

    if options.demo && options.store_dir.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "fadeflow".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let variant = options.flow.unwrap_or(FlowVariant::CallFlow);

        if options.demo {
            fadeflow::tui::run_demo(variant)?;
            return Ok(());
        }

        let dir = options.store_dir.unwrap_or_else(|| ".".to_owned());
        let store = if options.durable_writes {
            FlowStore::new(dir).with_durability(WriteDurability::Durable)
        } else {
            FlowStore::new(dir)
        };

        fadeflow::tui::run(store, variant)?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("fadeflow: {err}");
        std::process::exit(1);
    }
}
