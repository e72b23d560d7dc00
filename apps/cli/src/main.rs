mod config;
mod interaction;
mod main_lib;

use clap::{Parser, Subcommand};
use goaltrack_core::goals::FilterCriteria;

use config::Config;
use interaction::{ArgsInteraction, GoalFields};
use main_lib::{build_store, init_tracing, render_goal};

#[derive(Parser)]
#[command(name = "goaltrack", version, about = "Track personal goals")]
struct Cli {
    /// Act as this user instead of $GOALTRACK_USER_ID
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List goals, newest start date first
    List {
        /// Keep goals whose name contains this text
        #[arg(long, conflicts_with = "search")]
        name: Option<String>,
        /// Keep goals whose status ("true"/"false") contains this text
        #[arg(long)]
        status: Option<String>,
        /// Keep goals whose name, category or frequency contains this text
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a goal from the given fields
    Add {
        #[command(flatten)]
        fields: GoalFields,
    },
    /// Edit an existing goal
    Edit {
        /// Identifier of the goal to edit
        id: String,
        #[command(flatten)]
        fields: GoalFields,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(config.log_format);
    let cli = Cli::parse();

    let store = build_store(&config, cli.user)?;

    match cli.command {
        Command::List {
            name,
            status,
            search,
            json,
        } => {
            store.refresh().await?;
            let goals = store.set_criteria(FilterCriteria {
                name,
                status,
                text: search,
            });
            if json {
                println!("{}", serde_json::to_string_pretty(&goals)?);
            } else {
                for goal in &goals {
                    println!("{}", render_goal(goal, store.is_highlighted(goal)));
                }
            }
        }
        Command::Add { fields } => {
            match store
                .create_goal_interactive(&ArgsInteraction::new(fields))
                .await?
            {
                Some(goal) => println!("Created goal {}", goal.id),
                None => println!("Nothing to add"),
            }
        }
        Command::Edit { id, fields } => {
            store.refresh().await?;
            let goal = store
                .goals()
                .into_iter()
                .find(|g| g.id == id)
                .ok_or_else(|| anyhow::anyhow!("No goal with id {}", id))?;

            match store
                .edit_goal_interactive(&ArgsInteraction::new(fields), goal)
                .await?
            {
                Some(ack) => {
                    for goal in store.filtered_goals() {
                        println!("{}", render_goal(&goal, goal.id == ack.oid));
                    }
                }
                None => println!("Nothing to change"),
            }
        }
    }

    Ok(())
}
