//! CLI command handlers
//!
//! Each handler calls one service operation and renders its result. Expected
//! user-facing failures (missing profile, unknown question) are printed as
//! messages; anything else propagates to `main`.

use tracing::info;

use super::commands::Commands;
use super::output::*;
use super::prompt::TerminalPrompt;
use crate::database::Database;
use crate::models::{QuestionId, UserId};
use crate::service::MatchQuizService;
use crate::{AppConfig, MatchQuizError, Result};

/// Dispatch a parsed command
pub async fn handle_command(
    command: Commands,
    config: &AppConfig,
    database: &Database,
    service: &MatchQuizService,
) -> Result<()> {
    match command {
        Commands::Init => handle_init(database).await,
        Commands::AddQuestion { category, text } => {
            handle_add_question(service, &category, &text.join(" ")).await
        }
        Commands::RemoveQuestion { id } => handle_remove_question(service, id).await,
        Commands::Questions { category } => {
            handle_list_questions(service, category.as_deref()).await
        }
        Commands::Categories => handle_categories(service).await,
        Commands::Start { user, name } => handle_start(service, user, &name).await,
        Commands::Retake { user } => handle_retake(service, user).await,
        Commands::Profile { user } => handle_profile(service, user).await,
        Commands::Matches { user } => handle_matches(service, user).await,
        Commands::Compare { user, other } => handle_compare(service, user, other).await,
        Commands::Leaderboard { limit } => {
            handle_leaderboard(service, limit.unwrap_or(config.leaderboard_size())).await
        }
        Commands::Config => {
            print_config(config);
            Ok(())
        }
    }
}

pub async fn handle_init(database: &Database) -> Result<()> {
    if database.is_schema_initialized().await? {
        print_info("Schema already present, ensuring all tables and indexes exist...");
    } else {
        print_info("🗄️  Initializing database schema...");
    }
    database.init_schema().await?;
    print_success("Database schema initialized");
    Ok(())
}

pub async fn handle_add_question(
    service: &MatchQuizService,
    category: &str,
    text: &str,
) -> Result<()> {
    let question = service.add_question(category, text).await?;
    print_question_added(&question);
    Ok(())
}

pub async fn handle_remove_question(service: &MatchQuizService, id: QuestionId) -> Result<()> {
    match service.remove_question(id).await {
        Ok(()) => {
            print_success(&format!("Question #{id} removed"));
            Ok(())
        }
        Err(MatchQuizError::QuestionNotFound(_)) => {
            print_error(&format!("Question #{id} not found!"));
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub async fn handle_list_questions(service: &MatchQuizService, category: Option<&str>) -> Result<()> {
    let listing = service.list_questions(category).await?;
    print_question_listing(&listing);
    Ok(())
}

pub async fn handle_categories(service: &MatchQuizService) -> Result<()> {
    let categories = service.categories().await?;
    print_categories(&categories);
    Ok(())
}

/// Take the questionnaire, then show the new profile and its matches
pub async fn handle_start(service: &MatchQuizService, user: UserId, name: &str) -> Result<()> {
    let prompt = TerminalPrompt::stdin(service.settings().answer_timeout_secs);

    match service.take_questionnaire(user, name, &prompt).await {
        Ok(profile) => {
            println!();
            print_profile_saved(&profile);
            println!();
            handle_profile(service, user).await?;
            println!();
            handle_matches(service, user).await
        }
        Err(MatchQuizError::NoQuestions) => {
            print_error("No questions available yet! Ask an admin to add some.");
            Ok(())
        }
        Err(MatchQuizError::ProfileExists(_)) => {
            print_warning(
                "You already have a profile! Use `matchquiz retake` to start over or `matchquiz profile` to view your results.",
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub async fn handle_retake(service: &MatchQuizService, user: UserId) -> Result<()> {
    if service.retake(user).await? {
        print_success("Your old profile has been deleted! Use `matchquiz start` to begin again.");
    } else {
        print_error("You don't have a profile yet. Use `matchquiz start` to create one!");
    }
    Ok(())
}

pub async fn handle_profile(service: &MatchQuizService, user: UserId) -> Result<()> {
    match service.profile(user).await {
        Ok(view) => {
            print_profile_view(&view);
            Ok(())
        }
        Err(MatchQuizError::ProfileNotFound(_)) => {
            print_error("This user hasn't completed the questionnaire yet!");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub async fn handle_matches(service: &MatchQuizService, user: UserId) -> Result<()> {
    match service.find_matches(user).await {
        Ok(report) => {
            info!(
                "Showing top {} of {} matches",
                service.settings().top_matches,
                report.total_candidates
            );
            print_match_report(&report, service.settings().top_matches);
            Ok(())
        }
        Err(MatchQuizError::ProfileNotFound(_)) => {
            print_error("Complete the questionnaire first with `matchquiz start`!");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub async fn handle_compare(service: &MatchQuizService, user: UserId, other: UserId) -> Result<()> {
    match service.compare(user, other).await {
        Ok(comparison) => {
            print_comparison(&comparison);
            Ok(())
        }
        Err(MatchQuizError::SelfComparison) => {
            print_error("You can't compare with yourself!");
            Ok(())
        }
        Err(MatchQuizError::ProfileNotFound(id)) if id == user => {
            print_error("You need to complete the questionnaire first!");
            Ok(())
        }
        Err(MatchQuizError::ProfileNotFound(id)) => {
            print_error(&format!("User {id} hasn't completed the questionnaire yet!"));
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub async fn handle_leaderboard(service: &MatchQuizService, limit: usize) -> Result<()> {
    let entries = service.leaderboard(limit).await?;
    print_leaderboard(&entries);
    Ok(())
}
