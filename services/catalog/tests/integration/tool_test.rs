use toolhub_catalog::domain::types::{ToolFilter, Viewer};
use toolhub_catalog::error::CatalogError;
use toolhub_catalog::usecase::tool::{CountToolsUseCase, GetToolUseCase, ListToolsUseCase};
use toolhub_domain::role::Role;
use toolhub_domain::tool::ToolStatus;

use crate::helpers::{MockCache, MockToolRepo, test_tool, test_user};

fn viewer(user: &toolhub_catalog::domain::types::User) -> Viewer {
    Viewer {
        user_id: user.id,
        role: user.role,
    }
}

#[tokio::test]
async fn should_list_only_visible_tools() {
    let backend = test_user(Role::Backend);
    let designer = test_user(Role::Designer);
    let approved_for_backend = test_tool(designer.id, ToolStatus::Approved, vec![Role::Backend]);
    let approved_for_design = test_tool(designer.id, ToolStatus::Approved, vec![Role::Designer]);
    let own_pending = test_tool(backend.id, ToolStatus::Pending, vec![Role::Designer]);
    let others_pending = test_tool(designer.id, ToolStatus::Pending, vec![Role::Backend]);

    let uc = ListToolsUseCase {
        repo: MockToolRepo::new(vec![
            approved_for_backend.clone(),
            approved_for_design,
            own_pending.clone(),
            others_pending,
        ]),
    };

    let tools = uc
        .execute(viewer(&backend), &ToolFilter::default())
        .await
        .unwrap();

    let mut ids: Vec<_> = tools.iter().map(|t| t.id).collect();
    ids.sort();
    let mut expected = vec![approved_for_backend.id, own_pending.id];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn should_list_everything_for_owner() {
    let owner = test_user(Role::Owner);
    let qa = test_user(Role::Qa);
    let uc = ListToolsUseCase {
        repo: MockToolRepo::new(vec![
            test_tool(qa.id, ToolStatus::Approved, vec![Role::Qa]),
            test_tool(qa.id, ToolStatus::Pending, vec![Role::Qa]),
            test_tool(qa.id, ToolStatus::Rejected, vec![Role::Qa]),
        ]),
    };

    let tools = uc
        .execute(viewer(&owner), &ToolFilter::default())
        .await
        .unwrap();

    assert_eq!(tools.len(), 3);
}

#[tokio::test]
async fn should_apply_filter_before_visibility() {
    let pm = test_user(Role::Pm);
    let author = test_user(Role::Backend);
    let uc = ListToolsUseCase {
        repo: MockToolRepo::new(vec![
            test_tool(author.id, ToolStatus::Approved, vec![Role::Pm]),
            test_tool(author.id, ToolStatus::Approved, vec![Role::Backend]),
        ]),
    };

    let filter = ToolFilter {
        role: Some(Role::Backend),
        ..ToolFilter::default()
    };
    let tools = uc.execute(viewer(&pm), &filter).await.unwrap();

    assert!(tools.is_empty(), "pm must not see backend-only tools");
}

#[tokio::test]
async fn should_get_visible_tool() {
    let qa = test_user(Role::Qa);
    let author = test_user(Role::Frontend);
    let tool = test_tool(author.id, ToolStatus::Approved, vec![Role::Qa, Role::Frontend]);
    let uc = GetToolUseCase {
        repo: MockToolRepo::new(vec![tool.clone()]),
    };

    let found = uc.execute(viewer(&qa), tool.id).await.unwrap();

    assert_eq!(found.id, tool.id);
}

#[tokio::test]
async fn should_forbid_hidden_tool() {
    let qa = test_user(Role::Qa);
    let author = test_user(Role::Frontend);
    let tool = test_tool(author.id, ToolStatus::Rejected, vec![Role::Qa]);
    let uc = GetToolUseCase {
        repo: MockToolRepo::new(vec![tool.clone()]),
    };

    let result = uc.execute(viewer(&qa), tool.id).await;

    assert!(
        matches!(result, Err(CatalogError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_for_missing_tool() {
    let qa = test_user(Role::Qa);
    let uc = GetToolUseCase {
        repo: MockToolRepo::empty(),
    };

    let result = uc.execute(viewer(&qa), uuid::Uuid::new_v4()).await;

    assert!(
        matches!(result, Err(CatalogError::ToolNotFound)),
        "expected ToolNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_count_from_repo_and_memoize() {
    let author = test_user(Role::Backend);
    let cache = MockCache::empty();
    let uc = CountToolsUseCase {
        repo: MockToolRepo::new(vec![
            test_tool(author.id, ToolStatus::Approved, vec![]),
            test_tool(author.id, ToolStatus::Pending, vec![]),
        ]),
        cache: cache.clone(),
    };

    assert_eq!(uc.execute().await.unwrap(), 2);
    assert_eq!(*cache.tool_count.lock().unwrap(), Some(2));
}

#[tokio::test]
async fn should_prefer_cached_count() {
    let uc = CountToolsUseCase {
        repo: MockToolRepo::empty(),
        cache: MockCache::with_tool_count(41),
    };

    assert_eq!(uc.execute().await.unwrap(), 41);
}

#[tokio::test]
async fn should_memoize_categories() {
    use toolhub_catalog::domain::types::{Category, Tag};
    use toolhub_catalog::usecase::taxonomy::{ListCategoriesUseCase, ListTagsUseCase};

    use crate::helpers::MockTaxonomyRepo;

    let testing = Category {
        id: 5,
        name: "Testing".to_owned(),
        slug: "testing".to_owned(),
    };
    let cache = MockCache::empty();
    let uc = ListCategoriesUseCase {
        repo: MockTaxonomyRepo {
            categories: vec![testing.clone()],
            tags: vec![],
        },
        cache: cache.clone(),
    };

    assert_eq!(uc.execute().await.unwrap(), vec![testing.clone()]);
    assert_eq!(*cache.categories.lock().unwrap(), Some(vec![testing]));

    let tags = ListTagsUseCase {
        repo: MockTaxonomyRepo {
            categories: vec![],
            tags: vec![Tag {
                id: 1,
                name: "qa".to_owned(),
                slug: "qa".to_owned(),
            }],
        },
    };
    assert_eq!(tags.execute().await.unwrap().len(), 1);
}
