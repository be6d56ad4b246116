//! Proximity index.
//!
//! Answers "issues within R km of point P", ranked nearest first. The
//! distance math is a pure function over candidate rows so the radius
//! filter and the reported distance can never disagree.

use civicfix_common::{geo, AppError, AppResult};
use civicfix_db::{
    entities::issue,
    repositories::{IssueCandidateFilter, IssueRepository},
};

/// A proximity query.
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub category_id: Option<String>,
    pub status_id: Option<String>,
    pub limit: usize,
}

/// One ranked proximity result.
#[derive(Debug, Clone)]
pub struct NearbyIssue {
    pub issue: issue::Model,
    pub distance_km: f64,
}

/// Rank candidate issues by great-circle distance from the query point.
///
/// Candidates beyond `radius_km` are dropped. Ordering is ascending
/// distance with ties broken by issue id ascending, so repeated queries
/// over unchanged data return the same sequence.
#[must_use]
pub fn rank_by_distance(
    latitude: f64,
    longitude: f64,
    radius_km: f64,
    candidates: Vec<issue::Model>,
) -> Vec<NearbyIssue> {
    let mut ranked: Vec<NearbyIssue> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance_km =
                geo::haversine_km(latitude, longitude, candidate.latitude, candidate.longitude);
            (distance_km <= radius_km).then_some(NearbyIssue {
                issue: candidate,
                distance_km,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.issue.id.cmp(&b.issue.id))
    });
    ranked
}

/// Proximity query service.
#[derive(Clone)]
pub struct ProximityService {
    issue_repo: IssueRepository,
}

impl ProximityService {
    /// Create a new proximity service.
    #[must_use]
    pub const fn new(issue_repo: IssueRepository) -> Self {
        Self { issue_repo }
    }

    /// Issues within `radius_km` of the query point, nearest first.
    ///
    /// Hidden issues are excluded; category and status filters are
    /// AND-combined when present. Results are a fresh snapshot per call.
    pub async fn nearby(&self, query: NearbyQuery) -> AppResult<Vec<NearbyIssue>> {
        geo::validate_coordinate(query.latitude, query.longitude)?;
        if !query.radius_km.is_finite() || query.radius_km < 0.0 {
            return Err(AppError::BadRequest(format!(
                "radius {} must be a non-negative number of kilometers",
                query.radius_km
            )));
        }

        let filter = IssueCandidateFilter {
            category_id: query.category_id.clone(),
            status_id: query.status_id.clone(),
        };
        let candidates = self.issue_repo.find_visible(&filter).await?;

        let mut ranked =
            rank_by_distance(query.latitude, query.longitude, query.radius_km, candidates);
        ranked.truncate(query.limit);
        Ok(ranked)
    }
}
