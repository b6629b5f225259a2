pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod schemas;
pub mod state;

use actix_web::{App, HttpResponse, web};

pub fn create_app(
    state: state::AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(routes::health::healthz)
        .service(routes::auth::register)
        .service(routes::auth::login)
        .service(routes::auth::refresh)
        .service(routes::auth::logout)
        .service(routes::admin::overview)
        .service(routes::admin::list_users)
        .service(routes::admin::create_user)
        .service(routes::admin::edit_user)
        .service(routes::admin::delete_user)
        .service(routes::admin::reset_password)
        .service(routes::admin::list_schedules)
        .service(routes::admin::add_schedule)
        .service(routes::admin::list_payments)
        .service(routes::admin::approve_payment)
        .service(routes::pets::list)
        .service(routes::pets::create)
        .service(routes::pets::update)
        .service(routes::pets::remove)
        .service(routes::pets::add_medical_note)
        .service(routes::pets::add_vaccination)
        .service(routes::appointments::list)
        .service(routes::appointments::book)
        .service(routes::appointments::cancel)
        .service(routes::appointments::reschedule)
        .service(routes::appointments::update_status)
        .service(routes::payments::submit)
        .service(routes::slots::list)
        .service(routes::slots::services)
        .default_service(web::to(|| async { HttpResponse::NotFound().finish() }))
        .wrap(middleware::Authenticate)
}
