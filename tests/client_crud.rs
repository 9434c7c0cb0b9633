use anyhow::Result;
use casefile::{FileRecord, RelationshipStatus, SaveOutcome};
use chrono::NaiveDate;

#[path = "util.rs"]
mod util;

#[tokio::test]
async fn save_then_exists() -> Result<()> {
    let pool = util::memory_pool().await?;
    let (service, sink) = util::test_service(pool);

    let client = util::sample_client();
    let outcome = service.save_or_update_client(&client).await;
    assert_eq!(outcome, SaveOutcome::Inserted);
    assert!(service.clients().exists_by_case_number("123456").await);
    assert!(sink.is_empty());
    Ok(())
}

#[tokio::test]
async fn second_save_updates_single_row() -> Result<()> {
    let pool = util::memory_pool().await?;
    let (service, _sink) = util::test_service(pool);

    let client = util::sample_client();
    assert_eq!(
        service.save_or_update_client(&client).await,
        SaveOutcome::Inserted
    );

    let mut changed = client.clone();
    changed.relationship_status = RelationshipStatus::Married;
    assert_eq!(
        service.save_or_update_client(&changed).await,
        SaveOutcome::Updated
    );

    let all = service.load_clients().await;
    assert_eq!(all.len(), 1, "update must not duplicate the row");

    let reloaded = service
        .clients()
        .get_by_case_number("123456")
        .await
        .expect("row present after update");
    assert_eq!(reloaded.relationship_status, RelationshipStatus::Married);
    assert_eq!(reloaded.last_name, client.last_name);
    assert_eq!(reloaded.first_name, client.first_name);
    assert_eq!(reloaded.date_of_birth, client.date_of_birth);
    assert_eq!(reloaded.nationality, client.nationality);
    assert_eq!(reloaded.gender, client.gender);
    Ok(())
}

#[tokio::test]
async fn unknown_case_number_does_not_exist() -> Result<()> {
    let pool = util::memory_pool().await?;
    let (service, _sink) = util::test_service(pool);
    assert!(!service.clients().exists_by_case_number("999999").await);
    Ok(())
}

#[tokio::test]
async fn delete_leaves_dependents_in_place() -> Result<()> {
    let pool = util::memory_pool().await?;
    let (service, sink) = util::test_service(pool);

    let client = util::sample_client();
    service.save_or_update_client(&client).await;
    service
        .save_appointment(&util::sample_appointment("123456"))
        .await;
    service
        .save_documentation(&util::sample_documentation("123456"))
        .await;
    service
        .files()
        .save(FileRecord {
            id: 0,
            case_number: "123456".into(),
            upload_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            content_type: Some("application/pdf".into()),
            file_name: "referral.pdf".into(),
            file_path: "/tmp/uploads/referral.pdf".into(),
        })
        .await
        .expect("file record persists");

    service.clients().delete_by_case_number("123456").await;
    assert!(!service.clients().exists_by_case_number("123456").await);

    // No cascade: dependents survive the owner and stay loadable.
    let caseload = service.load_for_client("123456").await;
    assert_eq!(caseload.appointments.len(), 1);
    assert_eq!(caseload.documentations.len(), 1);
    assert_eq!(caseload.files.len(), 1);

    // The join finds no owner, so the denormalized names are gone.
    assert!(caseload.appointments[0].client_last_name.is_none());
    assert!(caseload.appointments[0].client_first_name.is_none());
    assert!(sink.is_empty());
    Ok(())
}

#[tokio::test]
async fn delete_of_missing_client_is_not_an_error() -> Result<()> {
    let pool = util::memory_pool().await?;
    let (service, sink) = util::test_service(pool);
    service.clients().delete_by_case_number("000000").await;
    assert!(sink.is_empty(), "a zero-row delete is informational only");
    Ok(())
}
