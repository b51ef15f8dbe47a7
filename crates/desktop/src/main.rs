//! Console entry point for the sales form.

use std::io::{self, BufRead, Write};

use anyhow::Context;

use salesdesk_desktop::config::FormConfig;
use salesdesk_desktop::console::{self, Action, HELP};
use salesdesk_desktop::SalesForm;

fn main() -> anyhow::Result<()> {
    let config = FormConfig::from_env().context("invalid configuration")?;
    salesdesk_observability::tracing::init(config.log_format, "info");

    tracing::info!(digit_grouping = config.digit_grouping, "sales form opened");

    let mut form = SalesForm::new(&config);
    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}\n")?;
    writeln!(out, "{}", console::render(&form.view()))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read from stdin")?;
        match console::parse_action(&line) {
            Ok(Action::Quit) => break,
            Ok(action) => {
                if let Some(text) = console::dispatch(&mut form, action) {
                    writeln!(out, "{text}")?;
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        out.flush()?;
    }

    tracing::info!(rows = form.ledger().len(), "sales form closed");
    Ok(())
}
