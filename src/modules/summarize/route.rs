use actix_web::web;

use crate::modules::summarize::client::GenerativeClient;

pub fn configure<C>(cfg: &mut web::ServiceConfig)
where
    C: GenerativeClient + Send + Sync + 'static,
{
    cfg.service(
        web::resource("/upload")
            .route(web::post().to(crate::modules::summarize::handle::upload_file::<C>)),
    );
}
