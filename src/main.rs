use anyhow::Result;
use clap::{Parser, Subcommand};
use diet_planner_client::app::App;
use diet_planner_client::dom::ERR_CLASS;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "diet-planner")]
#[command(about = "Request diet plans and look up food nutrients")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a diet plan from body metrics.
    Plan {
        #[arg(long)]
        age: f64,
        #[arg(long)]
        height_cm: f64,
        #[arg(long)]
        weight_kg: f64,
        #[arg(long)]
        gender: String,
        #[arg(long, default_value = "moderate")]
        activity_level: String,
        /// One of loss, maintain, gain.
        #[arg(long, default_value = "maintain")]
        goal: String,
        /// Comma separated, e.g. "vegetarian, no nuts".
        #[arg(long, default_value = "")]
        preferences: String,
        /// Copy a text summary of the plan to the clipboard.
        #[arg(long)]
        copy: bool,
        /// Save the raw plan as diet_plan.json in DOWNLOAD_DIR.
        #[arg(long)]
        download: bool,
    },
    /// Search the food database.
    Search {
        query: String,
        #[arg(long, default_value = "5")]
        page_size: String,
        /// Hide branded products.
        #[arg(long)]
        common_only: bool,
        /// Show nutrients for the N-th result (1-based).
        #[arg(long, value_name = "N")]
        pick: Option<usize>,
    },
    /// Show nutrients for one food by its source identifier.
    Details { id: String },
}

fn failed(app: &App, status_selector: &str) -> bool {
    app.document()
        .select(status_selector)
        .is_some_and(|el| el.has_class(ERR_CLASS))
}

async fn run(app: &mut App, command: Command) -> Result<bool> {
    let status = match command {
        Command::Plan {
            age,
            height_cm,
            weight_kg,
            gender,
            activity_level,
            goal,
            preferences,
            copy,
            download,
        } => {
            let doc = app.document_mut();
            doc.set_value("#age", &age.to_string());
            doc.set_value("#height_cm", &height_cm.to_string());
            doc.set_value("#weight_kg", &weight_kg.to_string());
            doc.set_value("#gender", &gender);
            doc.set_value("#activity_level", &activity_level);
            doc.set_value("#goal", &goal);
            doc.set_value("#preferences", &preferences);

            app.submit_diet().await;

            if copy {
                if let Some(outcome) = app.copy_plan().await {
                    eprintln!("{}", outcome.message());
                }
            }
            if download {
                if let Some(location) = app.download_plan().await? {
                    eprintln!("Saved {}", location);
                }
            }
            "#dietStatus"
        }
        Command::Search {
            query,
            page_size,
            common_only,
            pick,
        } => {
            let doc = app.document_mut();
            doc.set_value("#foodQuery", &query);
            doc.set_value("#pageSize", &page_size);
            doc.set_checked("#commonOnly", common_only);

            app.submit_food_search().await;

            if let Some(n) = pick.filter(|n| *n >= 1) {
                if !app.click_result(n - 1).await {
                    eprintln!("No result #{} to open", n);
                }
            }
            "#foodStatus"
        }
        Command::Details { id } => {
            app.show_food_details(&id).await;
            "#foodStatus"
        }
    };

    print!("{}", app.document());
    Ok(!failed(app, status))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diet_planner_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize client: {}", e);
            std::process::exit(1);
        }
    };

    match run(&mut app, args.command).await {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("Command failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_command() {
        let args = CliArgs::try_parse_from([
            "diet-planner",
            "plan",
            "--age",
            "30",
            "--height-cm",
            "180",
            "--weight-kg",
            "75",
            "--gender",
            "male",
            "--goal",
            "loss",
            "--copy",
        ])
        .unwrap();

        match args.command {
            Command::Plan {
                age, goal, copy, download, ..
            } => {
                assert_eq!(age, 30.0);
                assert_eq!(goal, "loss");
                assert!(copy);
                assert!(!download);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_command() {
        let args =
            CliArgs::try_parse_from(["diet-planner", "search", "apple", "--common-only", "--pick", "2"])
                .unwrap();

        match args.command {
            Command::Search {
                query,
                page_size,
                common_only,
                pick,
            } => {
                assert_eq!(query, "apple");
                assert_eq!(page_size, "5");
                assert!(common_only);
                assert_eq!(pick, Some(2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
