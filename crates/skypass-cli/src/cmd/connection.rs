use clap::Subcommand;

use super::{block_on, finish, Context};

#[derive(Subcommand)]
pub enum ConnectionSubcommand {
    /// Ask the backend to probe a GenieACS server by URL
    Test { url: String },
}

pub fn run(ctx: &Context, subcmd: ConnectionSubcommand) -> anyhow::Result<()> {
    match subcmd {
        ConnectionSubcommand::Test { url } => {
            let dashboard = ctx.dashboard()?;
            let settled = block_on(dashboard.test_connection(&url))?;
            finish(&settled, ctx.json)
        }
    }
}
