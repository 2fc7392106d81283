//! Grid Panel Binary
//!
//! Command line stand-in for the control panel's buttons.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin grid_panel -- --config panel.toml submit --price-range-low 100 --margin 0.5
//! cargo run --bin grid_panel -- history
//! ```
//!
//! Fields left off the command line fall back to the `[form]` section of the
//! config. Any setting can be overridden with `PANEL_<SECTION>__<KEY>`, which
//! may also live in a `.env` file.

use std::env;
use std::process;

use log::info;

use grid_panel::{
    config::Settings, logging, ControlPanel, FieldMap, FormField, FormInput, HttpBackend,
};

const USAGE: &str = "\
Usage:
  grid_panel [--config <path>] submit [--price-range-low V] [--price-range-high V] [--number-of-grids V] [--margin V]
  grid_panel [--config <path>] history";

enum Command {
    Submit(Vec<(FormField, String)>),
    History,
}

struct Args {
    config_path: Option<String>,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut config_path = None;
    let mut rest = args.iter();

    let command = loop {
        match rest.next().map(String::as_str) {
            Some("--config") => {
                let path = rest.next().ok_or("--config needs a path")?;
                config_path = Some(path.clone());
            }
            Some("submit") => break "submit",
            Some("history") => break "history",
            Some(other) => return Err(format!("Unknown argument: {}", other)),
            None => return Err("Missing command".to_string()),
        }
    };

    if command == "history" {
        if let Some(extra) = rest.next() {
            return Err(format!("Unexpected argument: {}", extra));
        }
        return Ok(Args {
            config_path,
            command: Command::History,
        });
    }

    let mut fields = Vec::new();
    while let Some(flag) = rest.next() {
        let name = flag
            .strip_prefix("--")
            .ok_or_else(|| format!("Unexpected argument: {}", flag))?;
        let field: FormField = name.parse().map_err(|_| format!("Unknown field: {}", flag))?;
        let value = rest
            .next()
            .ok_or_else(|| format!("{} needs a value", flag))?;
        fields.push((field, value.clone()));
    }

    Ok(Args {
        config_path,
        command: Command::Submit(fields),
    })
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            process::exit(2);
        }
    };

    // Load .env before reading PANEL_* overrides
    dotenvy::dotenv().ok();

    let settings = match Settings::new(args.config_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = logging::init(&settings.log) {
        eprintln!("{}", e);
        process::exit(1);
    }

    info!("Using backend at {}", settings.backend.base_url);

    let form = FieldMap::from(FormInput::from(&settings.form));
    let panel = ControlPanel::new(HttpBackend::new(&settings.backend), form);

    match args.command {
        Command::Submit(fields) => {
            for (field, value) in fields {
                panel.form().set(field, value);
            }
            panel.submit_form().await;
        }
        Command::History => panel.get_order_history().await,
    }

    let text = panel.output().text().await;
    if !text.is_empty() {
        println!("{}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_history() {
        let parsed = parse_args(&args(&["--config", "panel.toml", "history"])).unwrap();
        assert_eq!(parsed.config_path.as_deref(), Some("panel.toml"));
        assert!(matches!(parsed.command, Command::History));
    }

    #[test]
    fn test_parse_submit_fields() {
        let parsed =
            parse_args(&args(&["submit", "--price-range-low", "100", "--margin", "0.5"])).unwrap();
        assert!(parsed.config_path.is_none());
        match parsed.command {
            Command::Submit(fields) => assert_eq!(
                fields,
                vec![
                    (FormField::PriceRangeLow, "100".to_string()),
                    (FormField::Margin, "0.5".to_string()),
                ]
            ),
            Command::History => panic!("expected submit"),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["history", "--margin", "1"])).is_err());
        assert!(parse_args(&args(&["submit", "--leverage", "5"])).is_err());
        assert!(parse_args(&args(&["submit", "--margin"])).is_err());
        assert!(parse_args(&args(&["--config"])).is_err());
    }
}
