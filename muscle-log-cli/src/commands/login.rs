use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::AppContext;

#[derive(Args)]
pub struct LoginCommand {
    /// Account email (prompted when omitted)
    #[arg(long)]
    email: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        println!("Muscle Log - Login");
        println!();

        let email: String = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };
        let password = Password::new().with_prompt("Password").interact()?;

        println!();
        println!("Logging in as {}...", email);

        match ctx.client.login(&email, &password).await {
            Ok(_) => {}
            Err(e) => {
                println!("{} Login failed: {}", "✗".red(), e);
                return Err(e.into());
            }
        }

        // The token is live in the session; ask who we are for the header name.
        let display_name = match ctx.client.whoami().await {
            Ok(user) => user.display_name(),
            Err(e) => {
                tracing::warn!("Could not fetch profile after login: {}", e);
                email.clone()
            }
        };

        let mut config = ctx.config.clone();
        config.set_credentials(
            ctx.session.token().unwrap_or_default(),
            display_name.clone(),
            email,
        );
        config.save()?;

        println!("{} Login successful!", "✓".green());
        println!();
        println!("Welcome, {}!", display_name);

        Ok(())
    }
}
