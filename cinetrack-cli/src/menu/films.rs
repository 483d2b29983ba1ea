//! Film catalog browsing and per-film statistics.

use anyhow::Result;
use dialoguer::Input;

use super::MenuContext;
use cinetrack_core::TrackerError;
use cinetrack_model::{Film, FilmId};

pub async fn browse(ctx: &MenuContext) -> Result<()> {
    let films = match ctx.service.catalog().await {
        Ok(films) => films,
        Err(e) => {
            super::report(e);
            return Ok(());
        }
    };

    if films.is_empty() {
        println!("No films available.");
        return Ok(());
    }

    print_catalog(&films);
    Ok(())
}

pub(crate) fn print_catalog(films: &[Film]) {
    println!("{}", "-".repeat(100));
    println!(
        "{:<3} | {:<35} | {:<4} | {:<8} | {:<22} | {:<4}",
        "ID", "Title", "Year", "Runtime", "Director", "Rating"
    );
    println!("{}", "-".repeat(100));
    for film in films {
        println!(
            "{:<3} | {:<35} | {:<4} | {:<8} | {:<22} | {}",
            film.film_id,
            truncate(&film.title, 35),
            film.release_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "N/A".into()),
            film.formatted_runtime(),
            truncate(film.director.as_deref().unwrap_or("Unknown"), 22),
            film.external_rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".into()),
        );
    }
    println!("{}", "-".repeat(100));
}

pub async fn statistics(ctx: &MenuContext) -> Result<()> {
    println!("\n📊 FILM STATISTICS");
    browse(ctx).await?;

    let film_id = match prompt_film_id("Enter film ID to view stats (0 to cancel)")? {
        Some(id) => id,
        None => return Ok(()),
    };

    let film = match ctx.service.film(film_id).await {
        Ok(film) => film,
        Err(TrackerError::NotFound(_)) => {
            println!("❌ Film not found.");
            return Ok(());
        }
        Err(e) => {
            super::report(e);
            return Ok(());
        }
    };

    let stats = match ctx.service.film_stats(film_id).await {
        Ok(stats) => stats,
        Err(e) => {
            super::report(e);
            return Ok(());
        }
    };

    println!("\n📈 Statistics for: {}", film.title);
    println!("Total trackers: {}", stats.total_trackers);
    println!("Plan to Start:  {}", stats.plan_to_start);
    println!("In Progress:    {}", stats.in_progress);
    println!("Completed:      {}", stats.completed);
    if stats.rated_count > 0 {
        println!("Average user rating: {:.1}⭐", stats.average_rating);
    } else {
        println!("Average user rating: no ratings yet");
    }
    if let Some(rating) = film.external_rating {
        println!("Catalog rating: {:.1}⭐", rating);
    }
    Ok(())
}

/// Prompt for a film id; `None` means the user cancelled with 0.
pub(crate) fn prompt_film_id(prompt: &str) -> Result<Option<FilmId>> {
    let raw: String = Input::new().with_prompt(prompt).interact_text()?;
    match raw.trim().parse::<i32>() {
        Ok(0) => Ok(None),
        Ok(id) if id > 0 => Ok(Some(FilmId(id))),
        _ => {
            println!("❌ Invalid film ID.");
            Ok(None)
        }
    }
}

pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
