//! Print this week's timetable and unread counters.
//!
//! Reads BAKALARI_ROUTE, BAKALARI_USERNAME and BAKALARI_PASSWORD from the
//! environment or a `.env` file. Set RUST_LOG=bakalari_core=debug to see
//! every request.

use std::env;

use bakalari_core::{Client, Week};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string());
    let filter = match env::var("RUST_LOG") {
        Ok(rust_log) => EnvFilter::new(rust_log),
        Err(_) => EnvFilter::new(level.to_lowercase()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let route = env::var("BAKALARI_ROUTE")?;
    let username = env::var("BAKALARI_USERNAME")?;
    let password = env::var("BAKALARI_PASSWORD")?;

    let mut client = Client::new(route)?;
    client.login(&username, &password).await?;

    let user = client.get_user().await?;
    println!("{} ({}), {}", user.name, user.user_type_text, user.school_name);

    let today = chrono::Local::now().date_naive();
    let week = Week::containing(today);
    println!("\nRozvrh {} - {}:", week.monday, week.sunday);

    for day in client.get_actual_timetable(None).await? {
        println!("\n{} ({:?})", day.date, day.day_type);
        if let Some(description) = &day.description {
            println!("  {}", description);
        }
        for lesson in &day.lessons {
            let subject = lesson
                .subject
                .as_ref()
                .map(|s| s.abbreviation.as_str())
                .unwrap_or("-");
            let room = lesson
                .room
                .as_ref()
                .and_then(|r| r.abbreviation.as_deref())
                .unwrap_or("");
            let change = lesson
                .change
                .as_ref()
                .map(|c| format!(" [{:?}]", c.change_type))
                .unwrap_or_default();
            println!(
                "  {}. {}-{} {} {}{}",
                lesson.hour.caption, lesson.hour.begin_time, lesson.hour.end_time, subject, room, change
            );
        }
    }

    println!("\nNové známky: {}", client.get_new_marks_count().await?);
    println!("Neuzavřené úkoly: {}", client.get_unclosed_homework_count().await?);

    client.logout();
    Ok(())
}
