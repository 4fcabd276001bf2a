use clap::{Parser, Subcommand};
use log::debug;
use std::io::Write;

use craveit::timer::run_countdown;
use craveit::timing::mentions_timing;
use craveit::{
    detect_timing_in_text, format_time_display, scale_ingredient, CraveIt, KitchenTimer,
    PreparedRecipe,
};

#[derive(Parser)]
#[command(name = "craveit", version, about = "AllRecipes recipes, scaled and timed")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a recipe and print it with step timers
    Fetch {
        /// AllRecipes recipe URL
        url: String,
        /// Scale ingredients to this many servings
        #[arg(short, long)]
        servings: Option<u32>,
        /// Print the prepared recipe as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scale a single ingredient line
    Scale {
        line: String,
        #[arg(short, long)]
        factor: f64,
    },
    /// Detect a cooking time in an instruction
    Detect { text: String },
    /// Print the shopping list for a recipe
    ShoppingList {
        url: String,
        #[arg(short, long)]
        servings: Option<u32>,
    },
    /// Detect a cooking time and count it down
    Countdown { text: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Fetch {
            url,
            servings,
            json,
        } => {
            let mut builder = CraveIt::builder().url(url);
            if let Some(servings) = servings {
                builder = builder.servings(servings);
            }
            let prepared = builder.build().await?;
            debug!("Prepared {} steps", prepared.steps.len());

            if json {
                println!("{}", serde_json::to_string_pretty(&prepared)?);
            } else {
                print_recipe(&prepared);
            }
        }
        Command::Scale { line, factor } => {
            println!("{}", scale_ingredient(&line, factor));
        }
        Command::Detect { text } => match detect_timing_in_text(&text) {
            Some(detected) => println!(
                "{} ({}s, from \"{}\")",
                format_time_display(detected.total_seconds),
                detected.total_seconds,
                detected.matched_text
            ),
            None => println!("No timer suggested"),
        },
        Command::ShoppingList { url, servings } => {
            let mut builder = CraveIt::builder().url(url);
            if let Some(servings) = servings {
                builder = builder.servings(servings);
            }
            let prepared = builder.build().await?;
            println!("{}", prepared.shopping_list().to_text());
        }
        Command::Countdown { text } => {
            let Some(mut timer) = detect_timing_in_text(&text)
                .and_then(|detected| KitchenTimer::new("Timer", detected.total_seconds))
            else {
                println!("No timer suggested");
                return Ok(());
            };

            println!(
                "{} for {}",
                timer.name(),
                format_time_display(timer.total_seconds())
            );
            let mut flush_error = None;
            run_countdown(&mut timer, |t| {
                print!("\r{}  ", t.display());
                if let Err(e) = std::io::stdout().flush() {
                    flush_error.get_or_insert(e);
                }
            })
            .await;
            if let Some(e) = flush_error {
                return Err(e.into());
            }
            println!("\nDone!");
        }
    }

    Ok(())
}

fn print_recipe(prepared: &PreparedRecipe) {
    let recipe = &prepared.recipe;
    println!("{}", recipe.title);
    println!();

    let details = &recipe.details;
    for (label, value) in [
        ("Prep", &details.prep_time),
        ("Cook", &details.cook_time),
        ("Total", &details.total_time),
    ] {
        if !value.is_empty() {
            println!("{label}: {value}");
        }
    }
    match prepared.servings {
        Some(servings) if prepared.scale_factor != 1.0 => {
            println!("Servings: {} (originally {})", servings, details.servings)
        }
        _ if !details.servings.is_empty() => println!("Servings: {}", details.servings),
        _ => {}
    }
    if !recipe.nutrition.calories.is_empty() {
        println!("Calories: {}", recipe.nutrition.calories);
    }

    println!();
    println!("Ingredients");
    let show_headings = prepared.ingredients.len() > 1;
    for section in &prepared.ingredients {
        if show_headings {
            println!("  {}", section.name);
        }
        for item in &section.items {
            println!("  - {item}");
        }
    }

    println!();
    println!("Steps");
    for step in &prepared.steps {
        println!("  {}. {}", step.number, step.instruction);
        match &step.timer {
            Some(timer) => println!(
                "     timer: {}",
                format_time_display(timer.total_seconds)
            ),
            None if mentions_timing(&step.instruction) => {
                println!("     no timer suggested")
            }
            None => {}
        }
    }
}
