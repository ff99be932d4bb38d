use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tandem API",
        version = "0.1.0",
        description = "Backend API consumed by the generated frontend client."
    ),
    paths(crate::routes::health),
    components(schemas(crate::dto::HealthResponse)),
    tags(
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&TagPrefixedOperationIds)
)]
pub struct ApiDoc;

/// Renames every tagged operation to `{first tag}-{operation id}`.
///
/// Keeps operation IDs unique when handlers in different tags share a name.
/// The exported schema has the prefix removed again by
/// [`tandem_core::normalize`].
pub struct TagPrefixedOperationIds;

impl utoipa::Modify for TagPrefixedOperationIds {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        for item in openapi.paths.paths.values_mut() {
            let operations = [
                &mut item.get,
                &mut item.put,
                &mut item.post,
                &mut item.delete,
                &mut item.options,
                &mut item.head,
                &mut item.patch,
                &mut item.trace,
            ];
            for operation in operations.into_iter().flatten() {
                let Some(tag) = operation.tags.as_ref().and_then(|tags| tags.first()) else {
                    continue;
                };
                if let Some(operation_id) = operation.operation_id.as_mut() {
                    *operation_id = format!("{tag}-{operation_id}");
                }
            }
        }
    }
}
