use crate::api::routes;
use crate::config::SharedConfig;
use crate::resolver::Resolver;
use std::future::Future;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub resolver: Resolver,
}

pub fn new(config: SharedConfig, resolver: Resolver) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&config.api_bind_addr)
        .serve(routes::new(AppState { config, resolver }).into_make_service())
}
