//! Login and registration prompts.

use anyhow::Result;
use dialoguer::{Input, Password};

use super::MenuContext;
use cinetrack_model::Account;

pub async fn login(ctx: &MenuContext) -> Result<Option<Account>> {
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    match ctx.accounts.authenticate(&username, &password).await {
        Ok(Some(account)) => {
            println!("✅ Welcome back, {}!", account.username);
            Ok(Some(account))
        }
        Ok(None) => {
            println!("❌ Invalid username or password.");
            Ok(None)
        }
        Err(e) => {
            super::report(e);
            Ok(None)
        }
    }
}

pub async fn register(ctx: &MenuContext) -> Result<()> {
    let username: String = Input::new().with_prompt("Choose a username").interact_text()?;

    match ctx.accounts.find_by_username(username.trim()).await {
        Ok(Some(_)) => {
            println!("❌ That username is taken.");
            return Ok(());
        }
        Ok(None) => {}
        Err(e) => {
            super::report(e);
            return Ok(());
        }
    }

    let password = Password::new()
        .with_prompt("Choose a password (min 6 chars)")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    if password.len() < 6 {
        println!("❌ Password must be at least 6 characters long.");
        return Ok(());
    }

    let email: String = Input::new()
        .with_prompt("Email (blank to skip)")
        .allow_empty(true)
        .interact_text()?;
    let email = match email.trim() {
        "" => None,
        trimmed => Some(trimmed),
    };

    let account = match Account::new(&username, &password, email) {
        Ok(account) => account,
        Err(e) => {
            println!("❌ {}", e);
            return Ok(());
        }
    };

    match ctx.accounts.create(&account).await {
        Ok(created) => {
            println!("✅ Account '{}' created! You can now login.", created.username);
        }
        Err(e) => super::report(e),
    }
    Ok(())
}
