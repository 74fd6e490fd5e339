use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::AppContext;

#[derive(Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        if !ctx.config.is_authenticated() {
            println!("You are not logged in.");
            println!();
            println!("Use 'muscle-log login' to authenticate.");
            return Ok(());
        }

        println!("Fetching user information...");
        println!();

        match ctx.client.whoami().await {
            Ok(user_info) => {
                println!("{} Authenticated as:", "✓".green());
                println!();
                println!("  Name:     {}", user_info.display_name());
                println!("  Email:    {}", user_info.email);
                println!("  User ID:  {}", user_info.id);

                Ok(())
            }
            Err(e) => {
                println!("{} Failed to fetch user information: {}", "✗".red(), e);
                Err(e.into())
            }
        }
    }
}
