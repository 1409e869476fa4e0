use branchdo::entities::timesheet::{ACTION_START, ACTION_STOP};
use branchdo::report::create_report;
use branchdo::repositories::TimesheetRepository;
use branchdo::storage::{LocalStorage, TodoStore};

const EPOCH: &str = "2000-01-01 00:00:00";
const FAR_FUTURE: &str = "2999-01-01 00:00:00";

#[tokio::test]
async fn test_report_groups_items_and_time_by_repository() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let main = storage.fetch_or_create_project("/work/api", "main").await.unwrap();
    let feature = storage.fetch_or_create_project("/work/api", "feature").await.unwrap();
    let queue = storage.fetch_or_create_project("/work/api", "*").await.unwrap();
    let web = storage.fetch_or_create_project("/work/web", "main").await.unwrap();

    let (done_id, _) = storage.add_item(main, "ship it").await.unwrap();
    storage.add_item(main, "still open").await.unwrap();
    storage.set_done(done_id, true).await.unwrap();
    storage.add_item(queue, "someday").await.unwrap();
    storage.add_item(web, "restyle").await.unwrap();

    let conn = storage.connection();
    TimesheetRepository::insert_at(conn, feature, ACTION_START, "2025-01-14 10:00:00").await.unwrap();
    TimesheetRepository::insert_at(conn, feature, ACTION_STOP, "2025-01-14 10:30:00").await.unwrap();

    let report = create_report(&storage, EPOCH, FAR_FUTURE, None).await.unwrap();
    assert_eq!(report.repos.len(), 2);
    assert_eq!(report.total_sec, 1800);

    let api = report.repos.iter().find(|r| r.repo == "/work/api").unwrap();
    assert_eq!(api.total_sec, 1800);
    let branches: Vec<&str> = api.projects.iter().map(|p| p.branch.as_str()).collect();
    assert_eq!(branches, vec!["main", "feature"], "most recently updated first, queue left out");

    let main_row = &api.projects[0];
    let completed: Vec<&str> = main_row.completed_items.iter().map(|i| i.task.as_str()).collect();
    let created: Vec<&str> = main_row.created_items.iter().map(|i| i.task.as_str()).collect();
    assert_eq!(completed, vec!["ship it"]);
    assert_eq!(created, vec!["still open"]);

    let feature_row = &api.projects[1];
    assert_eq!(feature_row.time_entries.len(), 1);
    assert_eq!(feature_row.time_entries[0].duration_sec, 1800);
    assert!(!feature_row.timer_running);
}

#[tokio::test]
async fn test_report_folder_filter() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let api = storage.fetch_or_create_project("/work/api", "main").await.unwrap();
    let web = storage.fetch_or_create_project("/work/web", "main").await.unwrap();
    storage.add_item(api, "endpoint").await.unwrap();
    storage.add_item(web, "button").await.unwrap();

    let report = create_report(&storage, EPOCH, FAR_FUTURE, Some("/work/web")).await.unwrap();

    assert_eq!(report.repos.len(), 1);
    assert_eq!(report.repos[0].repo, "/work/web");
    assert_eq!(report.repos[0].projects[0].created_items[0].task, "button");
}

#[tokio::test]
async fn test_report_clamps_running_timer_to_period() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let project_id = storage.fetch_or_create_project("/work/api", "main").await.unwrap();
    let conn = storage.connection();
    TimesheetRepository::insert_at(conn, project_id, ACTION_START, "2025-01-14 08:00:00").await.unwrap();

    let report = create_report(&storage, "2025-01-14 09:00:00", "2025-01-14 10:00:00", None)
        .await
        .unwrap();

    let row = &report.repos[0].projects[0];
    assert!(row.timer_running);
    assert_eq!(row.time_entries.len(), 1);
    assert_eq!(row.time_entries[0].from, "2025-01-14 09:00:00");
    assert_eq!(row.time_entries[0].duration_sec, 3600);
    assert_eq!(report.total_sec, 3600);
}

#[tokio::test]
async fn test_empty_report() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let report = create_report(&storage, EPOCH, FAR_FUTURE, None).await.unwrap();
    assert!(report.repos.is_empty());
    assert_eq!(report.total_sec, 0);
}

#[tokio::test]
async fn test_report_json_uses_utc_timestamps() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let project_id = storage.fetch_or_create_project("/work/api", "main").await.unwrap();
    storage.add_item(project_id, "endpoint").await.unwrap();

    let report = create_report(&storage, EPOCH, FAR_FUTURE, None).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["from"].as_str().unwrap().ends_with("+00:00"));
    let project = &json["repos"][0]["projects"][0];
    assert_eq!(project["branch"], "main");
    assert!(project["created_items"][0]["time"].as_str().unwrap().ends_with("+00:00"));
    assert!(project.get("latest_update").is_none());
}
