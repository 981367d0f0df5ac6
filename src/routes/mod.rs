pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use crate::auth::AuthMiddleware;
use actix_web::web;

/// Registers the full route tree.
///
/// `/signup` and `/token` are the only unauthenticated API routes; the
/// `/users` and `/tasks` scopes sit behind `AuthMiddleware`, so no task
/// operation is reachable without a verified bearer token.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::signup)
        .service(auth::login)
        .service(web::scope("/users").wrap(AuthMiddleware).service(users::me))
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}
