use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::AppContext;
use crate::models::NewUser;

#[derive(Args)]
pub struct RegisterCommand {}

impl RegisterCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        println!("Muscle Log - Create account");
        println!();

        let email: String = Input::new().with_prompt("Email").interact_text()?;
        let username: String = Input::new().with_prompt("Username").interact_text()?;
        let password = Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?;

        let user = NewUser {
            email,
            username,
            password,
        };

        match ctx.client.register(&user).await {
            Ok(created) => {
                println!("{} Registered {}.", "✓".green(), created.email);
                println!("Use 'muscle-log login' to sign in.");
                Ok(())
            }
            Err(e) => {
                println!("{} Registration failed: {}", "✗".red(), e);
                Err(e.into())
            }
        }
    }
}
