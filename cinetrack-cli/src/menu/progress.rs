//! Progress listing, tracking new films, and the update flows.

use std::collections::HashMap;

use anyhow::Result;
use dialoguer::{Input, Select};

use super::{MenuContext, films};
use cinetrack_core::TrackerError;
use cinetrack_model::{Account, Film, FilmId, ProgressRecord, TrackStatus};

pub async fn my_progress(ctx: &MenuContext, account: &Account) -> Result<()> {
    println!("\n📚 MY PROGRESS");

    let records = match ctx.service.progress_for_account(account.account_id).await {
        Ok(records) => records,
        Err(e) => {
            super::report(e);
            return Ok(());
        }
    };

    if records.is_empty() {
        println!("You are not tracking any films yet.");
        return Ok(());
    }

    let titles = film_index(ctx).await?;
    for record in &records {
        print_record(record, &titles);
    }

    match ctx.service.account_summary(account.account_id).await {
        Ok(summary) => {
            println!(
                "\nTracking {} film(s): {} planned, {} in progress, {} completed",
                summary.total, summary.plan_to_start, summary.in_progress, summary.completed
            );
        }
        Err(e) => super::report(e),
    }
    Ok(())
}

pub async fn track(ctx: &MenuContext, account: &Account) -> Result<()> {
    println!("\n➕ TRACK A FILM");
    films::browse(ctx).await?;

    let film_id = match films::prompt_film_id("Enter film ID to track (0 to cancel)")? {
        Some(id) => id,
        None => return Ok(()),
    };

    let status = match prompt_status("Select initial status")? {
        Some(status) => status,
        None => return Ok(()),
    };

    let rating = if status == TrackStatus::Completed {
        prompt_rating()?
    } else {
        None
    };

    match ctx
        .service
        .track_film(account.account_id.as_i32(), film_id.as_i32(), status, rating)
        .await
    {
        Ok(record) => {
            let film = ctx.service.film(record.film_id).await;
            let title = film.map(|f| f.title).unwrap_or_else(|_| "film".into());
            println!("✅ '{}' added to your tracking list!", title);
        }
        Err(TrackerError::DuplicateTracking { .. }) => {
            println!("❌ You are already tracking this film.");
        }
        Err(TrackerError::NotFound(_)) => {
            println!("❌ Film not found.");
        }
        Err(e) => super::report(e),
    }
    Ok(())
}

pub async fn update(ctx: &MenuContext, account: &Account) -> Result<()> {
    println!("\n📝 UPDATE PROGRESS");

    let updatable = match ctx.service.updatable_for_account(account.account_id).await {
        Ok(records) => records,
        Err(e) => {
            super::report(e);
            return Ok(());
        }
    };

    if updatable.is_empty() {
        println!("No films to update. All your tracked films are completed.");
        return Ok(());
    }

    let titles = film_index(ctx).await?;
    let mut labels: Vec<String> = updatable
        .iter()
        .map(|r| {
            format!(
                "{} - {} ({}%)",
                title_of(r.film_id, &titles),
                r.status,
                r.percent
            )
        })
        .collect();
    labels.push("Cancel".to_string());

    let choice = Select::new()
        .with_prompt("Select a film to update")
        .items(&labels)
        .default(0)
        .interact()?;
    if choice >= updatable.len() {
        return Ok(());
    }
    let selected = &updatable[choice];

    let action = Select::new()
        .with_prompt(format!("Updating: {}", title_of(selected.film_id, &titles)))
        .items(&[
            "Change Status",
            "Set Progress Percentage",
            "Add/Edit Notes",
            "Set Rating",
            "Stop Tracking",
            "Cancel",
        ])
        .default(0)
        .interact()?;

    let outcome = match action {
        0 => change_status(ctx, selected).await,
        1 => change_percent(ctx, selected).await,
        2 => change_notes(ctx, selected).await,
        3 => change_rating(ctx, selected).await,
        4 => untrack(ctx, selected).await,
        _ => return Ok(()),
    };

    if let Err(e) = outcome {
        println!("❌ {}", e);
    }
    Ok(())
}

async fn change_status(ctx: &MenuContext, record: &ProgressRecord) -> Result<()> {
    let Some(status) = prompt_status("Select new status")? else {
        return Ok(());
    };

    let updated = ctx.service.set_status(record.progress_id, status).await?;

    // Completing a film is the natural moment to ask for a rating.
    if status == TrackStatus::Completed
        && updated.rating.is_none()
        && let Some(rating) = prompt_rating()?
    {
        ctx.service
            .set_rating(updated.progress_id, Some(rating))
            .await?;
    }

    println!("✅ Status updated successfully!");
    Ok(())
}

async fn change_percent(ctx: &MenuContext, record: &ProgressRecord) -> Result<()> {
    let raw: String = Input::new()
        .with_prompt("New completion percentage (0-100)")
        .interact_text()?;

    let Ok(percent) = raw.trim().parse::<u8>() else {
        println!("❌ Invalid percentage.");
        return Ok(());
    };

    let updated = ctx.service.set_percent(record.progress_id, percent).await?;
    println!("✅ Progress updated: {}% ({})", updated.percent, updated.status);
    Ok(())
}

async fn change_notes(ctx: &MenuContext, record: &ProgressRecord) -> Result<()> {
    println!(
        "Current notes: {}",
        record.notes.as_deref().unwrap_or("None")
    );
    let notes: String = Input::new()
        .with_prompt("New notes (blank to clear)")
        .allow_empty(true)
        .interact_text()?;

    let notes = match notes.trim() {
        "" => None,
        trimmed => Some(trimmed.to_string()),
    };
    ctx.service.set_notes(record.progress_id, notes).await?;
    println!("✅ Notes updated successfully!");
    Ok(())
}

async fn change_rating(ctx: &MenuContext, record: &ProgressRecord) -> Result<()> {
    let Some(rating) = prompt_rating()? else {
        return Ok(());
    };
    ctx.service
        .set_rating(record.progress_id, Some(rating))
        .await?;
    println!("✅ Rating saved!");
    Ok(())
}

async fn untrack(ctx: &MenuContext, record: &ProgressRecord) -> Result<()> {
    ctx.service.untrack(record.progress_id).await?;
    println!("✅ Film removed from your tracking list.");
    Ok(())
}

fn prompt_status(prompt: &str) -> Result<Option<TrackStatus>> {
    let statuses = TrackStatus::all();
    let mut labels: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
    labels.push("Cancel".to_string());

    let choice = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(statuses.get(choice).copied())
}

fn prompt_rating() -> Result<Option<f64>> {
    let raw: String = Input::new()
        .with_prompt("Rate this film (1.0-5.0, blank to skip)")
        .allow_empty(true)
        .interact_text()?;
    if raw.trim().is_empty() {
        return Ok(None);
    }
    match raw.trim().parse::<f64>() {
        Ok(rating) if (1.0..=5.0).contains(&rating) => Ok(Some(rating)),
        _ => {
            println!("❌ Rating must be between 1.0 and 5.0; skipping.");
            Ok(None)
        }
    }
}

async fn film_index(ctx: &MenuContext) -> Result<HashMap<FilmId, Film>> {
    let films = match ctx.service.catalog().await {
        Ok(films) => films,
        Err(e) => {
            super::report(e);
            Vec::new()
        }
    };
    Ok(films.into_iter().map(|f| (f.film_id, f)).collect())
}

fn title_of(film_id: FilmId, titles: &HashMap<FilmId, Film>) -> String {
    titles
        .get(&film_id)
        .map(|f| {
            match f.release_year {
                Some(year) => format!("{} ({})", f.title, year),
                None => f.title.clone(),
            }
        })
        .unwrap_or_else(|| format!("film {}", film_id))
}

fn print_record(record: &ProgressRecord, titles: &HashMap<FilmId, Film>) {
    println!("\n📽️  {}", title_of(record.film_id, titles));
    if let Some(film) = titles.get(&record.film_id)
        && let Some(director) = &film.director
    {
        println!("   Director: {}", director);
    }
    println!("   Status: {}", record.status);
    println!("   Progress: {}%", record.percent);
    if let Some(rating) = record.rating {
        println!("   Your Rating: {:.1}/5.0 ⭐", rating);
    }
    if let Some(started) = record.started_on {
        println!("   Started: {}", started.format("%b %d, %Y"));
    }
    if let Some(completed) = record.completed_on {
        println!("   Completed: {}", completed.format("%b %d, %Y"));
    }
    if let Some(notes) = &record.notes
        && !notes.trim().is_empty()
    {
        println!("   Notes: {}", notes);
    }
    println!(
        "   Last Updated: {}",
        record.last_updated.format("%b %d, %Y %H:%M")
    );
}
