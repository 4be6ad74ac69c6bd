//! AstroClub calendar
//!
//! Main application entry point: prints the current month's agenda

use chrono::{Datelike, Utc};
use tracing::{error, info, warn};

use astroclub::{
    calendar::{FilterCriteria, LabelRules},
    config::Settings,
    database::{connection::{create_pool, run_migrations, DatabaseConfig}, DatabaseService},
    services::{CalendarService, MonthView},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer alive
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", astroclub::info());

    info!("Connecting to database...");
    let db_pool = create_pool(&DatabaseConfig::from(&settings.database)).await?;
    run_migrations(&db_pool).await?;

    let database_service = DatabaseService::new(db_pool);
    let calendar = CalendarService::new(database_service.events.clone(), settings.calendar.clone());

    let now = Utc::now();
    let today = now.date_naive();
    let view = match calendar
        .month_view(today.year(), today.month(), &FilterCriteria::default(), today)
        .await
    {
        Ok(view) => view,
        Err(e) => {
            error!(
                severity = %e.severity(),
                recoverable = e.is_recoverable(),
                "Failed to build month view: {}", e
            );
            return Err(e.into());
        }
    };

    if view.total_events == 0 {
        warn!(year = today.year(), month = today.month(), "No events scheduled this month");
    }

    print_month(&view, &LabelRules::try_from(calendar.config())?, now);

    info!("Done.");
    Ok(())
}

fn print_month(view: &MonthView, rules: &LabelRules, now: chrono::DateTime<Utc>) {
    println!("{}-{:02}", view.grid.year, view.grid.month);

    for cell in view.grid.days().filter(|cell| cell.in_month) {
        let marker = if cell.is_today { "*" } else { " " };
        println!("{}{}  {}", marker, cell.date.format("%a %d"), cell.moon.label());

        for event in &cell.visible {
            let badge = rules
                .status_badge(event, now)
                .map(|status| format!(" [{}]", status.label()))
                .unwrap_or_default();
            let club = if event.event_type.is_club_activity() { " [club]" } else { "" };
            println!("      {:>8}  {} ({}){}{}", rules.time_label(event), event.title, event.event_type, club, badge);
        }
        if let Some(more) = cell.overflow_label() {
            println!("      {}", more);
        }
    }

    let (activities, sky): (Vec<_>, Vec<_>) = view.panel.iter().partition(|event| event.event_type.is_club_activity());
    for (heading, events) in [("Celestial events this month:", sky), ("Club activities this month:", activities)] {
        if events.is_empty() {
            continue;
        }
        println!();
        println!("{}", heading);
        for event in events {
            println!("  {}  {}", event.start.format("%B %-d, %Y"), event.title);
        }
    }
}
