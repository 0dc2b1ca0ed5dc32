use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use fridgechef_core::ai::{
    generate_recipe, recognize_ingredients, AiConfig, ImageData, OpenRouterTransport,
};
use fridgechef_core::types::RecipeConstraints;

#[derive(Parser)]
#[command(name = "fridgechef")]
#[command(about = "Fridge photo -> ingredients -> recipe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize ingredients in a fridge photo
    Recognize {
        /// Path to the image file
        #[arg(long)]
        image: PathBuf,
        /// MIME type of the image (default: guessed from the extension)
        #[arg(long)]
        mime: Option<String>,
    },
    /// Generate a recipe from a list of ingredients
    Generate {
        /// Comma-separated ingredient names
        #[arg(long)]
        ingredients: String,
        /// Cuisine preference
        #[arg(long, default_value = "상관없음")]
        cuisine: String,
        /// Difficulty preference
        #[arg(long, default_value = "중급")]
        difficulty: String,
        /// Cook time preference
        #[arg(long = "cook-time", default_value = "30분 이내")]
        cook_time: String,
        /// Number of servings
        #[arg(long, default_value_t = 2)]
        servings: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = AiConfig::from_env().context("loading AI configuration")?;
    let transport = OpenRouterTransport::new(&config.base_url, &config.api_key);

    match cli.command {
        Commands::Recognize { image, mime } => {
            let bytes = std::fs::read(&image)
                .with_context(|| format!("reading image {}", image.display()))?;
            let mime = mime.unwrap_or_else(|| guess_mime(&image));
            let image = ImageData::from_bytes(&bytes, mime);

            let outcome = recognize_ingredients(&transport, &config, &image).await?;

            println!("model: {}", outcome.model);
            for ingredient in &outcome.ingredients {
                println!("- {ingredient}");
            }
        }
        Commands::Generate {
            ingredients,
            cuisine,
            difficulty,
            cook_time,
            servings,
        } => {
            let ingredients: Vec<String> = ingredients
                .split(',')
                .map(str::trim)
                .filter(|i| !i.is_empty())
                .map(str::to_string)
                .collect();
            ensure!(!ingredients.is_empty(), "at least one ingredient is required");

            let constraints = RecipeConstraints {
                cuisine,
                difficulty,
                cook_time,
                servings,
            };

            let outcome = generate_recipe(&transport, &config, &ingredients, &constraints).await?;

            println!("model: {}", outcome.model);
            println!("{}", serde_json::to_string_pretty(&outcome.recipe)?);
        }
    }

    Ok(())
}

fn guess_mime(path: &Path) -> String {
    let mime = match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };
    mime.to_string()
}
