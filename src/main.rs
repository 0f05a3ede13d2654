use std::io;
use std::process;

use anyhow::Context;
use rust_decimal_macros::dec;
#[macro_use]
extern crate log;

mod features;
use features::{Console, Pin, Session, Store};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        error!("{e:#}");
        process::exit(1);
    }
}

/// The one account every run starts with.
fn demo_store() -> anyhow::Result<Store> {
    let mut store = Store::new();
    store
        .open_account(Pin::new(1234), dec!(10000.0))
        .context("Unable to open the demo account")?;
    Ok(store)
}

fn run() -> anyhow::Result<()> {
    let store = demo_store()?;
    info!("starting with {} accounts", store.len());

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let mut session = Session::new(store, console);
    session.run().context("Terminal input/output failed")?;

    info!("session ended with {} accounts", session.store().len());
    Ok(())
}
