use server_api::ApiContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) max_body_bytes: usize,
}
