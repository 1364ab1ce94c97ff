use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        axum_helpers::ErrorResponse,
        domain_users::User,
        domain_users::NewUser,
        domain_users::UserPatch,
        domain_users::LoginRequest,
        domain_users::TokenResponse,
    )),
    info(
        title = "User API",
        version = "0.1.0",
        description = "Token-guarded CRUD API for the user resource"
    ),
    tags(
        (name = "users", description = "User management operations"),
        (name = "auth", description = "Bearer token login")
    )
)]
pub struct ApiDoc;
