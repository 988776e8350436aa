use shared::{
    domain::{NewValue, ValueId, ValueRecord, ValueUpdate, MAX_VALUE_NAME_CHARS},
    error::{ApiError, ErrorCode},
};
use storage::Storage;
use tracing::info;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

pub async fn list_values(ctx: &ApiContext) -> Result<Vec<ValueRecord>, ApiError> {
    ctx.storage.list_values().await.map_err(internal)
}

pub async fn get_value(ctx: &ApiContext, value_id: ValueId) -> Result<ValueRecord, ApiError> {
    ctx.storage
        .get_value(value_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(value_id))
}

pub async fn create_value(
    ctx: &ApiContext,
    value: NewValue,
) -> Result<ValueRecord, ApiError> {
    let value = NewValue {
        name: validate_name(&value.name)?,
        description: value.description,
    };
    let created = ctx.storage.create_value(&value).await.map_err(internal)?;
    info!(value_id = created.id.0, name = %created.name, "value created");
    Ok(created)
}

pub async fn update_value(
    ctx: &ApiContext,
    value_id: ValueId,
    update: ValueUpdate,
) -> Result<ValueRecord, ApiError> {
    let update = ValueUpdate {
        name: update.name.as_deref().map(validate_name).transpose()?,
        description: update.description,
    };
    ctx.storage
        .update_value(value_id, &update)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(value_id))
}

pub async fn delete_value(ctx: &ApiContext, value_id: ValueId) -> Result<ValueRecord, ApiError> {
    let deleted = ctx
        .storage
        .delete_value(value_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(value_id))?;
    info!(value_id = deleted.id.0, "value deleted");
    Ok(deleted)
}

fn validate_name(name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("value name must not be empty"));
    }
    if name.chars().count() > MAX_VALUE_NAME_CHARS {
        return Err(ApiError::validation(format!(
            "value name exceeds {MAX_VALUE_NAME_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}

fn not_found(value_id: ValueId) -> ApiError {
    ApiError::not_found(format!("value {value_id} not found"))
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> ApiContext {
        let storage = Storage::new("sqlite::memory:").await.expect("db");
        ApiContext { storage }
    }

    fn honesty() -> NewValue {
        NewValue {
            name: "  Honesty ".into(),
            description: Some("Tell the truth".into()),
        }
    }

    #[tokio::test]
    async fn create_trims_name_and_lists_it() {
        let ctx = setup().await;
        let created = create_value(&ctx, honesty()).await.expect("create");
        assert_eq!(created.name, "Honesty");

        let values = list_values(&ctx).await.expect("list");
        assert_eq!(values, vec![created]);
    }

    #[tokio::test]
    async fn blank_name_is_a_validation_error() {
        let ctx = setup().await;
        let err = create_value(
            &ctx,
            NewValue {
                name: "   ".into(),
                description: None,
            },
        )
        .await
        .expect_err("should fail");
        assert!(matches!(err.code, ErrorCode::Validation));
    }

    #[tokio::test]
    async fn overlong_name_is_rejected_on_update() {
        let ctx = setup().await;
        let created = create_value(&ctx, honesty()).await.expect("create");
        let err = update_value(
            &ctx,
            created.id,
            ValueUpdate {
                name: Some("x".repeat(MAX_VALUE_NAME_CHARS + 1)),
                description: None,
            },
        )
        .await
        .expect_err("should fail");
        assert!(matches!(err.code, ErrorCode::Validation));
    }

    #[tokio::test]
    async fn unknown_ids_map_to_not_found() {
        let ctx = setup().await;
        let missing = ValueId(7);

        let err = get_value(&ctx, missing).await.expect_err("get");
        assert!(matches!(err.code, ErrorCode::NotFound));
        assert_eq!(err.message, "value 7 not found");

        let err = update_value(&ctx, missing, ValueUpdate::default())
            .await
            .expect_err("update");
        assert!(matches!(err.code, ErrorCode::NotFound));

        let err = delete_value(&ctx, missing).await.expect_err("delete");
        assert!(matches!(err.code, ErrorCode::NotFound));
    }

    #[tokio::test]
    async fn delete_returns_the_removed_value() {
        let ctx = setup().await;
        let created = create_value(&ctx, honesty()).await.expect("create");
        let deleted = delete_value(&ctx, created.id).await.expect("delete");
        assert_eq!(deleted, created);
        assert!(list_values(&ctx).await.expect("list").is_empty());
    }
}
