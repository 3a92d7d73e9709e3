use super::{block_on, finish, Context};

/// `skypass verify <isp-id>` or `skypass verify --all`.
pub fn run(ctx: &Context, isp_id: Option<u64>, all: bool) -> anyhow::Result<()> {
    let dashboard = ctx.dashboard()?;
    let settled = match (isp_id, all) {
        (_, true) => block_on(dashboard.verify_all())?,
        (Some(id), false) => block_on(dashboard.verify_isp(id))?,
        (None, false) => anyhow::bail!("pass an ISP id or --all"),
    };
    finish(&settled, ctx.json)
}
