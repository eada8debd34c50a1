use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct NewMessageDoc {
    pub author: String,
    pub content: String,
}

#[derive(ToSchema)]
pub struct UpdateMessageDoc {
    pub id: Uuid,
    pub author: Option<String>,
    pub content: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct MessageDoc {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub like_count: i32,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct MessagePageDoc {
    pub content: Vec<MessageDoc>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::messages::create,
        crate::routes::messages::get,
        crate::routes::messages::update,
        crate::routes::messages::delete,
        crate::routes::messages::list,
    ),
    components(
        schemas(
            HealthResponse,
            NewMessageDoc,
            UpdateMessageDoc,
            MessageDoc,
            MessagePageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "messages")
    )
)]
pub struct ApiDoc;
