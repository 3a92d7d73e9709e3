use clap::Subcommand;

use super::{block_on, finish, Context};

#[derive(Subcommand)]
pub enum AlertSubcommand {
    /// Resend a previously recorded alert
    Resend {
        alerta_id: u64,
        /// ISP name shown in the confirmation prompt
        #[arg(long = "isp", value_name = "NAME")]
        isp_name: String,
    },
    /// Email a fresh usage alert for an ISP
    Send {
        isp_id: u64,
        /// ISP name shown in the confirmation prompt
        #[arg(long = "isp", value_name = "NAME")]
        isp_name: String,
    },
}

pub fn run(ctx: &Context, subcmd: AlertSubcommand) -> anyhow::Result<()> {
    let dashboard = ctx.dashboard()?;
    let settled = match subcmd {
        AlertSubcommand::Resend {
            alerta_id,
            isp_name,
        } => block_on(dashboard.resend_alert(alerta_id, &isp_name))?,
        AlertSubcommand::Send { isp_id, isp_name } => {
            block_on(dashboard.send_alert_email(isp_id, &isp_name))?
        }
    };
    finish(&settled, ctx.json)
}
