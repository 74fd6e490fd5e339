use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::AppContext;

#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        if !ctx.config.is_authenticated() {
            println!("You are not logged in.");
            return Ok(());
        }

        let mut config = ctx.config.clone();
        config.clear_credentials();
        config.save()?;
        ctx.session.sign_out();

        println!("{} Logged out successfully!", "✓".green());

        Ok(())
    }
}
