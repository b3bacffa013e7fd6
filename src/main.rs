use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use staff_attendance::attendance::{self, DayState};
use staff_attendance::config::Config;
use staff_attendance::database::{self, queries};
use staff_attendance::provider;
use staff_attendance::sales::{self, CommissionWindow};
use staff_attendance::utils::format;
use staff_attendance::utils::time::{local_offset, now_local, start_of_week_sunday};
use std::collections::BTreeMap;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "staff_attendance=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let now = now_local(local_offset(config.utc_offset_minutes)?);

    let pool = database::create_connection(&config.database_url).await?;
    match queries::load_user_session(&pool).await? {
        Some(user) => tracing::info!("Signed in as {} (staff_id={})", user.name, user.id),
        None => tracing::warn!("No stored staff session"),
    }

    if let Some(path) = &config.attendance_file {
        report_attendance(path, now, config.location_update_interval_secs).await?;
    }

    if let Some(path) = &config.orders_file {
        report_commission(path, now).await?;
    }

    if let Some(path) = &config.appointments_file {
        report_appointments(path, now).await?;
    }

    Ok(())
}

async fn read_payload(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn report_attendance(path: &Path, now: NaiveDateTime, interval_secs: u64) -> Result<()> {
    let feed = provider::parse_attendance_response(&read_payload(path).await?)?;
    for issue in &feed.diagnostics {
        println!("{}", format::format_issue(issue));
    }
    if let Some(staff) = &feed.staff {
        println!("Staff: {} ({})", staff.staff_name, staff.status);
    }

    let today = now.date();
    let mut sessions_by_day = BTreeMap::new();

    for day in &feed.days {
        let result = attendance::reconstruct(&day.events);
        for issue in &result.diagnostics {
            println!("{} {}", day.date, format::format_issue(issue));
        }

        let summary = attendance::aggregate(&result.sessions);
        let state = DayState::from_sessions(&result.sessions, day.date < today);
        println!(
            "{}",
            format::format_daily_report(day.date, &result.sessions, &summary, state)
        );

        if day.date == today && state == DayState::OpenSession {
            if let Some(session) = attendance::today_session(&result.sessions) {
                tracing::info!(
                    "Checked in since {}, location refresh every {}s",
                    session.check_in,
                    interval_secs
                );
            }
        }

        sessions_by_day.insert(day.date, result.sessions);
    }

    let week_start = start_of_week_sunday(now).date();
    let week = attendance::summarize_range(&sessions_by_day, week_start, today);
    println!("{}", format::format_range_summary("This week", &week));

    Ok(())
}

async fn report_commission(path: &Path, now: NaiveDateTime) -> Result<()> {
    let records = provider::parse_completed_orders(&read_payload(path).await?)?;
    let records = sales::merge_order_pages(vec![records]);
    tracing::info!("Loaded {} completed order(s)", records.len());

    for window in [CommissionWindow::Today, CommissionWindow::Week, CommissionWindow::AllTime] {
        let (start, end) = window.bounds(now);
        let totals = sales::aggregate_commission(&records, start, end);
        println!("{}", format::format_commission_summary(window, &totals));
    }

    println!(
        "{}",
        format::format_monthly_commission(&sales::monthly_commission(&records))
    );

    Ok(())
}

async fn report_appointments(path: &Path, now: NaiveDateTime) -> Result<()> {
    let appointments = provider::parse_appointments(&read_payload(path).await?)?;
    let summary = sales::summarize_appointments(&appointments, now.date());
    println!("{}", format::format_appointment_summary(now.date(), &summary));
    Ok(())
}
