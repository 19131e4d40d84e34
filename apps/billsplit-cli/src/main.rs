//! # billsplit
//!
//! Entry point of the `billsplit` binary. The actual setup is in lib.rs.

fn main() -> anyhow::Result<()> {
    billsplit_cli::run()
}
