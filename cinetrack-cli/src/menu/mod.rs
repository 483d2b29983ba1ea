//! Menu navigation: the welcome loop and the per-session main menu.

mod account;
mod auth;
mod films;
mod progress;

use std::sync::Arc;

use anyhow::Result;
use dialoguer::Select;

use cinetrack_core::TrackingService;
use cinetrack_core::database::ports::AccountsRepository;
use cinetrack_model::Account;

pub struct MenuContext {
    pub service: TrackingService,
    pub accounts: Arc<dyn AccountsRepository>,
}

impl std::fmt::Debug for MenuContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuContext").finish_non_exhaustive()
    }
}

pub async fn run(ctx: MenuContext) -> Result<()> {
    println!("🎬 Welcome to Cinetrack");

    loop {
        let choice = Select::new()
            .with_prompt("What would you like to do?")
            .items(&["Login", "Register", "Exit"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                if let Some(account) = auth::login(&ctx).await? {
                    session_loop(&ctx, account).await?;
                }
            }
            1 => auth::register(&ctx).await?,
            _ => break,
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Main menu for one logged-in account; returns on logout or exit.
async fn session_loop(ctx: &MenuContext, mut current: Account) -> Result<()> {
    loop {
        let choice = Select::new()
            .with_prompt(format!("Main menu ({})", current.username))
            .items(&[
                "Browse Films",
                "My Progress",
                "Track a Film",
                "Update Progress",
                "Film Statistics",
                "Account Settings",
                "Logout",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => films::browse(ctx).await?,
            1 => progress::my_progress(ctx, &current).await?,
            2 => progress::track(ctx, &current).await?,
            3 => progress::update(ctx, &current).await?,
            4 => films::statistics(ctx).await?,
            5 => account::settings(ctx, &mut current).await?,
            _ => {
                println!("Logged out.");
                return Ok(());
            }
        }
    }
}

/// Print a core error as a one-line console message.
pub(crate) fn report(err: cinetrack_core::TrackerError) {
    println!("❌ {}", err);
}
