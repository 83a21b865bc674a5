use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use tracing::{debug, error};

use crate::api::response::{ApiError, ApiResult, PrettyJson};
use crate::models::{GenerationDetailsQuery, GenerationList};
use crate::repositories::GenerationRepository;

use super::AppState;

const DEFAULT_PAGE: &str = "1";
const DEFAULT_COUNT: &str = "15";

pub async fn get_generation_details(
    State(state): State<AppState>,
    Query(query): Query<GenerationDetailsQuery>,
) -> ApiResult<GenerationList> {
    let page = parse_positive("page", query.page.as_deref().unwrap_or(DEFAULT_PAGE))?;
    let count = parse_positive("count", query.count.as_deref().unwrap_or(DEFAULT_COUNT))?;
    let offset = (page - 1).saturating_mul(count);

    debug!("Listing generations page {} (count {}, offset {})", page, count, offset);

    match GenerationRepository::new(&state.pool)
        .list_page(count, offset)
        .await
    {
        Ok(rngs) => Ok(PrettyJson(GenerationList { rngs })),
        Err(e) => {
            error!("Failed to list generations: {}", e);
            Err(ApiError::internal("Failed to list generations"))
        }
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<i64, ApiError> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 1 => Ok(value),
        Ok(_) => Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("Value for {} must be at least 1, got '{}'", name, raw),
        )),
        Err(_) => Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("Conversion failed for {} '{}'", name, raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("page", "3").unwrap(), 3);
        assert_eq!(parse_positive("count", " 15 ").unwrap(), 15);

        let err = parse_positive("page", "abc").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Conversion failed for page 'abc'");

        let err = parse_positive("count", "0").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        assert!(parse_positive("page", "1.5").is_err());
    }
}
