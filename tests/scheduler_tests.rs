use anyhow::Result;
use chrono::Utc;
use reading_plan_bot::database::{connection::DatabaseManager, models::User};
use reading_plan_bot::services::scheduler::reminder_targets;
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

#[tokio::test]
async fn test_reminders_go_to_active_unfinished_users() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let today = Utc::now().date_naive();

    // Mid-plan, finished, and on the final day.
    User::enroll(&db.pool, 1, None, "Mid", 10, today).await?;
    User::enroll(&db.pool, 2, None, "Done", 1, today).await?;
    User::set_current_day(&db.pool, 2, 366).await?;
    User::enroll(&db.pool, 3, None, "Last", 365, today).await?;

    let active = User::find_active(&db.pool).await?;
    assert_eq!(active.len(), 3);

    let targets = reminder_targets(active);
    let ids: Vec<i64> = targets.iter().map(|u| u.telegram_id).collect();
    assert_eq!(ids, vec![1, 3]);

    Ok(())
}

#[tokio::test]
async fn test_reset_users_receive_no_reminders() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let today = Utc::now().date_naive();

    User::enroll(&db.pool, 1, None, "Keeps", 1, today).await?;
    User::enroll(&db.pool, 2, None, "Quits", 1, today).await?;
    User::reset(&db.pool, 2).await?;

    let targets = reminder_targets(User::find_active(&db.pool).await?);
    let ids: Vec<i64> = targets.iter().map(|u| u.telegram_id).collect();
    assert_eq!(ids, vec![1]);

    Ok(())
}

#[tokio::test]
async fn test_no_users_means_no_targets() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let targets = reminder_targets(User::find_active(&db.pool).await?);
    assert!(targets.is_empty());

    Ok(())
}
