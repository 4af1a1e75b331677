use toolhub_catalog::domain::types::ToolFilter;
use toolhub_catalog::error::CatalogError;
use toolhub_catalog::usecase::moderation::{ListSubmissionsUseCase, ModerateToolUseCase};
use toolhub_domain::role::Role;
use toolhub_domain::tool::ToolStatus;

use crate::helpers::{MockToolRepo, test_tool, test_user};

#[tokio::test]
async fn should_list_submissions_for_owner() {
    let author = test_user(Role::Backend);
    let uc = ListSubmissionsUseCase {
        repo: MockToolRepo::new(vec![
            test_tool(author.id, ToolStatus::Pending, vec![Role::Backend]),
            test_tool(author.id, ToolStatus::Approved, vec![Role::Backend]),
        ]),
    };

    let filter = ToolFilter {
        status: Some(ToolStatus::Pending),
        ..ToolFilter::default()
    };
    let tools = uc.execute(Role::Owner, &filter).await.unwrap();

    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].status, ToolStatus::Pending);
}

#[tokio::test]
async fn should_forbid_submissions_for_non_owner() {
    let uc = ListSubmissionsUseCase {
        repo: MockToolRepo::empty(),
    };

    let result = uc.execute(Role::Pm, &ToolFilter::default()).await;

    assert!(
        matches!(result, Err(CatalogError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_approve_pending_tool() {
    let author = test_user(Role::Qa);
    let tool = test_tool(author.id, ToolStatus::Pending, vec![Role::Qa]);
    let repo = MockToolRepo::new(vec![tool.clone()]);
    let tools_handle = repo.tools_handle();
    let uc = ModerateToolUseCase { repo };

    let updated = uc
        .execute(Role::Owner, tool.id, ToolStatus::Approved)
        .await
        .unwrap();

    assert_eq!(updated.status, ToolStatus::Approved);
    assert_eq!(tools_handle.lock().unwrap()[0].status, ToolStatus::Approved);
}

#[tokio::test]
async fn should_forbid_moderation_for_non_owner() {
    let author = test_user(Role::Qa);
    let tool = test_tool(author.id, ToolStatus::Pending, vec![Role::Qa]);
    let repo = MockToolRepo::new(vec![tool.clone()]);
    let tools_handle = repo.tools_handle();
    let uc = ModerateToolUseCase { repo };

    let result = uc.execute(Role::Qa, tool.id, ToolStatus::Approved).await;

    assert!(
        matches!(result, Err(CatalogError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(tools_handle.lock().unwrap()[0].status, ToolStatus::Pending);
}

#[tokio::test]
async fn should_return_not_found_when_moderating_missing_tool() {
    let uc = ModerateToolUseCase {
        repo: MockToolRepo::empty(),
    };

    let result = uc
        .execute(Role::Owner, uuid::Uuid::new_v4(), ToolStatus::Rejected)
        .await;

    assert!(
        matches!(result, Err(CatalogError::ToolNotFound)),
        "expected ToolNotFound, got {result:?}"
    );
}
