//! Subject catalog endpoints.

use api_protocol::{requests::*, responses::*};
use axum::Json;
use entities::Subject;

use super::convert::entity_to_api_subject;
use crate::error::{ServerError, ServerResult};
use crate::extract::ApiJson;

/// Lists the subject catalog.
pub async fn list_subjects() -> Json<ListSubjectsResponse> {
    Json(ListSubjectsResponse {
        subjects: Subject::catalog().iter().map(entity_to_api_subject).collect(),
    })
}

/// Gets a subject by ID.
pub async fn get_subject(
    ApiJson(request): ApiJson<GetSubjectRequest>,
) -> ServerResult<Json<GetSubjectResponse>> {
    let subject = Subject::find(request.subject_id.trim())
        .ok_or_else(|| ServerError::NotFound("Subject not found".to_string()))?;

    Ok(Json(GetSubjectResponse {
        subject: entity_to_api_subject(&subject),
    }))
}

/// Finds a subject by name, ignoring case.
pub async fn find_subject(
    ApiJson(request): ApiJson<FindSubjectRequest>,
) -> ServerResult<Json<GetSubjectResponse>> {
    let subject = Subject::find_by_name(&request.name)
        .ok_or_else(|| ServerError::NotFound("Subject not found".to_string()))?;

    Ok(Json(GetSubjectResponse {
        subject: entity_to_api_subject(&subject),
    }))
}
