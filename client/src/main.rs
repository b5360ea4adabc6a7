//! `skillswap` command-line shell.
//!
//! Every command runs through one [`AppContext`], which restores the
//! persisted session on startup.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use shared::{
    CreateSwapRequest, LoginRequest, ProfileUpdate, RegisterRequest, SwapRequest, SwapStatus,
    User, UserRef, UserSearchParams,
};
use skillswap::core::SkillSwapApi;
use skillswap::lifecycle::available_actions;
use skillswap::{AppContext, ClientConfig, ClientError};

const DEMO_BANNER: &str = "[demo mode] Backend not available, showing demo data";

#[derive(Debug, Parser)]
#[command(name = "skillswap", about = "Skill swap marketplace client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check whether the backend is reachable
    Health,
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register(RegisterArgs),
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Update your profile
    Profile(ProfileArgs),
    /// Browse other users
    Browse(BrowseArgs),
    /// Skills directory
    Skills {
        #[command(subcommand)]
        command: SkillsCommand,
    },
    /// Manage swap requests
    Swaps {
        #[command(subcommand)]
        command: SwapsCommand,
    },
}

#[derive(Debug, Args)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long = "confirm")]
    confirm_password: String,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long)]
    location: Option<String>,
}

#[derive(Debug, Args)]
struct ProfileArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    /// Skill you offer (repeatable); replaces the current list
    #[arg(long = "offer", value_name = "SKILL")]
    offer: Vec<String>,
    /// Skill you want (repeatable); replaces the current list
    #[arg(long = "want", value_name = "SKILL")]
    want: Vec<String>,
    #[arg(long)]
    available: Option<bool>,
}

#[derive(Debug, Args)]
struct BrowseArgs {
    #[arg(long)]
    skill: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    available: Option<bool>,
}

#[derive(Debug, Subcommand)]
enum SkillsCommand {
    /// Most offered skills
    Popular,
    /// Skills grouped by category
    Categories,
}

#[derive(Debug, Subcommand)]
enum SwapsCommand {
    /// Requests you sent or received
    List,
    /// Send a swap request
    Create {
        /// Recipient user id
        #[arg(long)]
        to: String,
        /// Skill you want from them
        #[arg(long)]
        requested: String,
        /// Skill you offer in return
        #[arg(long)]
        offered: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    Accept { id: String },
    Reject { id: String },
    Complete { id: String },
    Cancel { id: String },
    /// Withdraw a pending request you sent
    Delete { id: String },
    /// Rate the other participant of a completed swap
    Rate {
        id: String,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        stars: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let _log_guard = skillswap::logging::init(&skillswap::logging::LogConfig::from_env());

    let cli = Cli::parse();

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = match AppContext::start(config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = run(&ctx, cli.command).await;
    ctx.shutdown();

    match outcome {
        Ok(lines) => {
            if ctx.demo_banner_visible() {
                println!("{}", DEMO_BANNER);
            }
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if ctx.demo_banner_visible() {
                eprintln!("{}", DEMO_BANNER);
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(ctx: &AppContext, command: Command) -> Result<Vec<String>, ClientError> {
    let api = ctx.api();
    let session = ctx.session();

    match command {
        Command::Health => {
            let health = SkillSwapApi::health(api).await;
            Ok(vec![format!("{}: {}", health.status, health.message)])
        }
        Command::Login { email, password } => {
            let user = session.login(LoginRequest { email, password }).await?;
            Ok(vec![format!("Signed in as {}", user.display_name())])
        }
        Command::Register(args) => {
            let user = session
                .register(RegisterRequest {
                    username: args.username,
                    email: args.email,
                    password: args.password,
                    confirm_password: args.confirm_password,
                    first_name: args.first_name,
                    last_name: args.last_name,
                    location: args.location,
                })
                .await?;
            Ok(vec![format!("Welcome, {}", user.display_name())])
        }
        Command::Logout => {
            session.logout().await;
            Ok(vec!["Signed out".to_string()])
        }
        Command::Whoami => Ok(describe_user(&ctx.current_user()?)),
        Command::Profile(args) => {
            let update = ProfileUpdate {
                first_name: args.first_name,
                last_name: args.last_name,
                location: args.location,
                bio: args.bio,
                skills_offered: (!args.offer.is_empty()).then_some(args.offer),
                skills_wanted: (!args.want.is_empty()).then_some(args.want),
                is_available: args.available,
                profile_photo: None,
            };
            Ok(describe_user(&session.update_profile(update).await?))
        }
        Command::Browse(args) => {
            let params = UserSearchParams {
                search: args.search,
                skill: args.skill,
                location: args.location,
                available: args.available,
            };
            let users = SkillSwapApi::search_users(api, params).await?;
            if users.is_empty() {
                return Ok(vec!["No users found".to_string()]);
            }
            Ok(users.iter().map(summarize_user).collect())
        }
        Command::Skills { command } => match command {
            SkillsCommand::Popular => Ok(SkillSwapApi::popular_skills(api)
                .await?
                .into_iter()
                .map(|s| format!("{:<20} {}", s.skill, s.count))
                .collect()),
            SkillsCommand::Categories => Ok(SkillSwapApi::skill_categories(api)
                .await?
                .into_iter()
                .map(|c| format!("{}: {}", c.name, c.skills.join(", ")))
                .collect()),
        },
        Command::Swaps { command } => run_swaps(ctx, command).await,
    }
}

async fn run_swaps(ctx: &AppContext, command: SwapsCommand) -> Result<Vec<String>, ClientError> {
    let api = ctx.api();
    let me = ctx.current_user()?;

    match command {
        SwapsCommand::List => {
            let swaps = SkillSwapApi::list_swaps(api, &me.id).await?;
            if swaps.is_empty() {
                return Ok(vec!["No swap requests yet".to_string()]);
            }
            Ok(swaps.iter().map(|s| describe_swap(s, &me.id)).collect())
        }
        SwapsCommand::Create {
            to,
            requested,
            offered,
            message,
        } => {
            let request = CreateSwapRequest {
                recipient: to,
                requested_skill: requested,
                offered_skill: offered,
                message,
            };
            let swap = SkillSwapApi::create_swap(api, &UserRef::from(&me), request).await?;
            Ok(vec![describe_swap(&swap, &me.id)])
        }
        SwapsCommand::Accept { id } => transition(ctx, &me, &id, SwapStatus::Accepted).await,
        SwapsCommand::Reject { id } => transition(ctx, &me, &id, SwapStatus::Rejected).await,
        SwapsCommand::Complete { id } => transition(ctx, &me, &id, SwapStatus::Completed).await,
        SwapsCommand::Cancel { id } => transition(ctx, &me, &id, SwapStatus::Cancelled).await,
        SwapsCommand::Delete { id } => {
            let swap = ctx.find_swap(&id).await?;
            SkillSwapApi::delete_swap(api, &swap, &me.id).await?;
            Ok(vec![format!("Swap request {} deleted", id)])
        }
        SwapsCommand::Rate { id, stars, comment } => {
            let swap = ctx.find_swap(&id).await?;
            let rating = SkillSwapApi::rate_swap(api, &swap, &me.id, stars, &comment).await?;
            Ok(vec![format!(
                "Rated {} {} star{}",
                rating.rated_user.display_name(),
                rating.rating,
                if rating.rating == 1 { "" } else { "s" }
            )])
        }
    }
}

async fn transition(
    ctx: &AppContext,
    me: &User,
    id: &str,
    status: SwapStatus,
) -> Result<Vec<String>, ClientError> {
    let swap = ctx.find_swap(id).await?;
    let updated = SkillSwapApi::update_swap_status(ctx.api(), &swap, &me.id, status).await?;
    Ok(vec![describe_swap(&updated, &me.id)])
}

fn describe_user(user: &User) -> Vec<String> {
    let rating = user.rating_summary();
    let mut lines = vec![
        format!("{} <{}>", user.display_name(), user.email),
        format!("id: {}", user.id),
    ];
    if user.is_admin() {
        lines.push("role: admin".to_string());
    }
    if !user.location.is_empty() {
        lines.push(format!("location: {}", user.location));
    }
    if !user.bio.is_empty() {
        lines.push(format!("bio: {}", user.bio));
    }
    lines.push(format!("offers: {}", user.skills_offered.join(", ")));
    lines.push(format!("wants: {}", user.skills_wanted.join(", ")));
    lines.push(format!("rating: {:.1} ({} ratings)", rating.average, rating.count));
    lines.push(format!("available: {}", if user.is_available { "yes" } else { "no" }));
    lines
}

fn summarize_user(user: &User) -> String {
    format!(
        "[{}] {} ({}) offers: {} | wants: {} | {:.1}★",
        user.id,
        user.display_name(),
        if user.location.is_empty() { "-" } else { user.location.as_str() },
        user.skills_offered.join(", "),
        user.skills_wanted.join(", "),
        user.rating
    )
}

fn describe_swap(swap: &SwapRequest, me: &str) -> String {
    let direction = if swap.requester.id == me {
        format!("to {}", swap.recipient.display_name())
    } else {
        format!("from {}", swap.requester.display_name())
    };
    let actions: Vec<&str> = available_actions(swap, me)
        .into_iter()
        .map(SwapStatus::as_str)
        .collect();

    let mut line = format!(
        "[{}] {} {}: {} for {}",
        swap.id, swap.status, direction, swap.requested_skill, swap.offered_skill
    );
    if !actions.is_empty() {
        line.push_str(&format!(" (can: {})", actions.join(", ")));
    }
    line
}
