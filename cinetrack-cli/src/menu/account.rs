//! Account settings: credentials, contact address, progress summary.

use anyhow::Result;
use dialoguer::{Input, Password, Select};

use super::MenuContext;
use cinetrack_model::Account;

pub async fn settings(ctx: &MenuContext, current: &mut Account) -> Result<()> {
    println!("\n⚙️ ACCOUNT SETTINGS");
    println!("Username: {}", current.username);
    println!(
        "Email: {}",
        current.email.as_deref().unwrap_or("Not provided")
    );
    println!(
        "Member since: {}",
        current.created_at.format("%b %d, %Y")
    );

    let choice = Select::new()
        .with_prompt("Choose an option")
        .items(&[
            "Change Password",
            "Update Email",
            "View Progress Summary",
            "Back",
        ])
        .default(3)
        .interact()?;

    match choice {
        0 => change_password(ctx, current).await,
        1 => update_email(ctx, current).await,
        2 => progress_summary(ctx, current).await,
        _ => Ok(()),
    }
}

async fn change_password(ctx: &MenuContext, current: &mut Account) -> Result<()> {
    let old = Password::new()
        .with_prompt("Enter current password")
        .interact()?;

    let verified = match ctx.accounts.authenticate(&current.username, &old).await {
        Ok(account) => account.is_some(),
        Err(e) => {
            super::report(e);
            return Ok(());
        }
    };
    if !verified {
        println!("❌ Current password is incorrect.");
        return Ok(());
    }

    let new = Password::new()
        .with_prompt("Enter new password (min 6 chars)")
        .with_confirmation("Confirm new password", "Passwords do not match")
        .interact()?;
    if new.len() < 6 {
        println!("❌ Password must be at least 6 characters long.");
        return Ok(());
    }

    // Validate through the model before touching the store.
    if let Err(e) = current.set_password(&new) {
        println!("❌ {}", e);
        return Ok(());
    }

    match ctx.accounts.update_password(current.account_id, &new).await {
        Ok(()) => println!("✅ Password changed successfully!"),
        Err(e) => super::report(e),
    }
    Ok(())
}

async fn update_email(ctx: &MenuContext, current: &mut Account) -> Result<()> {
    let email: String = Input::new()
        .with_prompt("New email (blank to clear)")
        .allow_empty(true)
        .interact_text()?;
    let email = match email.trim() {
        "" => None,
        trimmed => Some(trimmed),
    };

    if let Err(e) = current.set_email(email) {
        println!("❌ {}", e);
        return Ok(());
    }

    match ctx.accounts.update_email(current.account_id, email).await {
        Ok(()) => println!("✅ Email updated!"),
        Err(e) => super::report(e),
    }
    Ok(())
}

async fn progress_summary(ctx: &MenuContext, current: &Account) -> Result<()> {
    match ctx.service.account_summary(current.account_id).await {
        Ok(summary) => {
            println!("\n📊 PROGRESS SUMMARY");
            println!("Total films tracked: {}", summary.total);
            println!("Plan to Start:       {}", summary.plan_to_start);
            println!("In Progress:         {}", summary.in_progress);
            println!("Completed:           {}", summary.completed);
        }
        Err(e) => super::report(e),
    }
    Ok(())
}
