//! Booking-form data: candidate days, per-day times, booked flags, and the
//! service catalog.

use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use common::slots::{candidate_days, date_time_key, times_for_date};
use serde_json::json;

use crate::error::HttpApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct SlotQuery {
    pub service: Option<String>,
    pub pet: Option<String>,
    /// Selected date; when present the response includes its time options.
    pub date: Option<String>,
}

#[get("/slots")]
pub async fn list(
    data: web::Data<AppState>,
    _user: AuthUser,
    query: web::Query<SlotQuery>,
) -> actix_web::Result<HttpResponse> {
    let admin_slots = db::admin_slots(&data.db).await.map_err(HttpApiError::from)?;
    let days = candidate_days(Utc::now().date_naive(), &admin_slots);

    let times = match query.date.as_deref() {
        Some(date) => {
            let times = times_for_date(date, &admin_slots);
            // Booked flags need a pet and service; without them every time
            // is reported open. The conflict key is global, so the scan is
            // over everyone's appointments, not just the caller's.
            match (query.pet.as_deref(), query.service.as_deref()) {
                (Some(pet), Some(service)) => {
                    let taken: Vec<String> = db::list_appointments(&data.db, None)
                        .await
                        .map_err(HttpApiError::from)?
                        .into_iter()
                        .filter(|a| {
                            a.pet_name == pet
                                && a.service == service
                                && a.status != "Cancelled"
                        })
                        .map(|a| a.date_time)
                        .collect();
                    times
                        .into_iter()
                        .map(|time| {
                            let booked = taken.contains(&date_time_key(date, &time));
                            json!({ "time": time, "booked": booked })
                        })
                        .collect::<Vec<_>>()
                }
                _ => times
                    .into_iter()
                    .map(|time| json!({ "time": time, "booked": false }))
                    .collect(),
            }
        }
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(json!({ "days": days, "times": times })))
}

#[get("/services")]
pub async fn services() -> HttpResponse {
    HttpResponse::Ok().json(common::SERVICES)
}
