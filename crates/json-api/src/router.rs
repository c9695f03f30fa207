//! App Router

use salvo::{Router, Service, catcher::Catcher};

use crate::{auth, buses, errors, healthcheck, observability, tenants};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("tenant")
                .push(Router::with_path("register").post(tenants::register::handler))
                .push(Router::with_path("login").post(tenants::login::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("tenant/profile")
                        .get(tenants::profile::handler)
                        .put(tenants::update_profile::handler),
                )
                .push(
                    Router::with_path("bus")
                        .push(Router::with_path("add").post(buses::create::handler))
                        .push(Router::with_path("all").get(buses::index::handler))
                        .push(Router::with_path("stats/overview").get(buses::stats::handler))
                        .push(
                            Router::with_path("{id}")
                                .get(buses::get::handler)
                                .put(buses::update::handler)
                                .delete(buses::delete::handler)
                                .push(
                                    Router::with_path("toggle-status")
                                        .patch(buses::toggle_status::handler),
                                ),
                        ),
                ),
        )
}

/// Wrap `router` with request logging and the error envelope catcher.
pub(crate) fn service(router: Router) -> Service {
    Service::new(router)
        .hoop(observability::request_logging)
        .catcher(Catcher::default().hoop(errors::render_status))
}
