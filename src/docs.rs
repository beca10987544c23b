use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::ingest::handler::upload,
        crate::modules::artifacts::handler::clean,
    ),
    tags(
        (name = "Ingest", description = "Download remote media and cut it into HLS segments"),
        (name = "Artifacts", description = "Generated playlists and segments")
    )
)]
pub struct ApiDoc;
