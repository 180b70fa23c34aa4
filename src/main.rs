//! Command-line front end for the Goodbooks client core.
//!
//! ```text
//! goodbooks-client search "q=dune&min_rating=4"
//! goodbooks-client book 5
//! goodbooks-client login <username> <password>
//! goodbooks-client logout | whoami | home | reading-list | profile
//! ```

use std::num::ParseIntError;
use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use goodbooks_client::adapters::RecordingNavigator;
use goodbooks_client::application::{
    BookDetailsLoader, HomeLoader, LoadStatus, NoticeBoard, ProfileLoader, ReadingListManager,
    RouteDecision, RouteGuard, SearchController, SessionStore,
};
use goodbooks_client::build_gateway;
use goodbooks_client::config::{AppConfig, ConfigError};
use goodbooks_client::domain::foundation::BookId;
use goodbooks_client::ports::TransportError;

/// Why a command failed
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP client setup failed: {0}")]
    Transport(#[from] TransportError),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid book id: {0}")]
    InvalidBookId(#[from] ParseIntError),

    #[error("Book {0} not found")]
    BookNotFound(BookId),

    #[error("Please log in first")]
    SignInRequired,

    #[error("Session is still loading")]
    SessionLoading,

    /// A page or the session reported a user-facing error message.
    #[error("{0}")]
    Failed(String),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(_) | CliError::Transport(_) => 2,
            _ => 1,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => return fail(e.into()),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.client.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.client.is_production() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&config, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn fail(error: CliError) -> ExitCode {
    eprintln!("{}", error);
    ExitCode::from(error.exit_code())
}

async fn run(config: &AppConfig, args: &[String]) -> Result<(), CliError> {
    config.validate().map_err(ConfigError::from)?;
    let gateway = build_gateway(config)?;
    let navigator = RecordingNavigator::new();
    let notices = Arc::new(NoticeBoard::from_config(&config.notices));
    let session = Arc::new(SessionStore::new(Arc::clone(&gateway)));
    session.restore().await;

    let command = args.first().map(String::as_str).unwrap_or("home");
    match command {
        "search" => {
            let controller = SearchController::new(
                Arc::clone(&gateway),
                Arc::new(navigator.clone()),
                config.client.per_page,
            )
            .with_session(Arc::clone(&session));
            controller
                .navigate_to(args.get(1).map(String::as_str).unwrap_or(""))
                .await;
            let state = controller.state();
            if let Some(error) = state.error {
                return Err(CliError::Failed(error));
            }
            if state.is_empty() {
                println!("No books found.");
            }
            if let Some((start, end, total)) = state.result_range() {
                println!("Showing {}-{} of {} results", start, end, total);
            }
            for chip in state.filters.active_filters() {
                println!("[{}]", chip.label);
            }
            for book in &state.books {
                println!("#{}  {} by {} ({:.2})", book.book_id, book.title, book.authors, book.average_rating);
            }
            for tag in &state.tags {
                println!("#{}  {} ({} books)", tag.tag_id, tag.tag_name, tag.book_count);
            }
        }
        "book" => {
            let book_id: BookId = args.get(1).ok_or(CliError::Usage("book <id>"))?.parse()?;
            let loader = BookDetailsLoader::new(
                Arc::clone(&gateway),
                Arc::clone(&notices),
                Arc::new(navigator.clone()),
                config.client.per_page,
            )
            .with_session(Arc::clone(&session));
            loader.load(book_id, session.is_authenticated()).await;
            let state = loader.state();
            match (state.status, state.book) {
                (LoadStatus::NotFound, _) => return Err(CliError::BookNotFound(book_id)),
                (_, Some(book)) => {
                    println!("{} by {}", book.title, book.authors);
                    println!(
                        "Average {:.2} from {} ratings",
                        book.average_rating, book.ratings_count
                    );
                    if state.in_reading_list {
                        println!("On your reading list");
                    }
                    for review in &state.reviews {
                        println!("  {} - {}/5", review.author_label(), review.rating);
                    }
                    for similar in &state.similar {
                        println!("  Similar: {}", similar.title);
                    }
                }
                (_, None) => return Err(CliError::Failed(state.error.unwrap_or_default())),
            }
        }
        "login" => {
            let (Some(username), Some(password)) = (args.get(1), args.get(2)) else {
                return Err(CliError::Usage("login <username> <password>"));
            };
            if !session.login(username, password).await {
                return Err(CliError::Failed(session.error().unwrap_or_default()));
            }
            println!("Signed in as {}", username);
        }
        "logout" => {
            session.logout().await;
            println!("Signed out");
        }
        "whoami" => match session.current_user() {
            Some(user) => println!("{} (#{})", user.username, user.user_id),
            None => println!("Not signed in"),
        },
        "reading-list" => {
            require_session(&session, &navigator)?;
            let manager = ReadingListManager::new(
                Arc::clone(&gateway),
                Arc::clone(&notices),
                config.client.per_page,
            )
            .with_session(Arc::clone(&session));
            manager.load(1).await;
            let state = manager.state();
            if let Some(error) = state.error {
                return Err(CliError::Failed(error));
            }
            for entry in &state.entries {
                println!("#{}  {} by {}", entry.book_id, entry.title, entry.authors);
            }
        }
        "profile" => {
            require_session(&session, &navigator)?;
            let loader = ProfileLoader::new(Arc::clone(&gateway)).with_session(Arc::clone(&session));
            loader.load().await;
            let state = loader.state();
            if let Some(error) = state.error {
                return Err(CliError::Failed(error));
            }
            if let Some(profile) = state.profile {
                println!(
                    "{}: {} ratings, {} to read",
                    profile.user.username, profile.stats.ratings_count, profile.stats.to_read_count
                );
            }
            for pick in &state.recommendations {
                println!("  Recommended: {}", pick.title);
            }
        }
        "home" => {
            let home = HomeLoader::new(Arc::clone(&gateway), Arc::new(navigator.clone()));
            home.load().await;
            let state = home.state();
            if let Some(error) = state.error {
                return Err(CliError::Failed(error));
            }
            for book in &state.popular {
                println!("Popular: {}", book.title);
            }
            for book in &state.top_rated {
                println!("Top rated: {}", book.title);
            }
            let tags: Vec<&str> = state.tags.iter().map(|t| t.tag_name.as_str()).collect();
            println!("Tags: {}", tags.join(", "));
        }
        other => return Err(CliError::UnknownCommand(other.to_string())),
    }

    if let Some(notice) = notices.current() {
        println!("{}", notice.message);
    }
    Ok(())
}

fn require_session(
    session: &SessionStore,
    navigator: &RecordingNavigator,
) -> Result<(), CliError> {
    match RouteGuard::enforce(&session.snapshot(), navigator) {
        RouteDecision::Allow => Ok(()),
        RouteDecision::Wait => Err(CliError::SessionLoading),
        RouteDecision::RedirectToLogin => Err(CliError::SignInRequired),
    }
}
